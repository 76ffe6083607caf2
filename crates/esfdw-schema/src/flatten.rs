//! Mapping flattener
//!
//! Input is the body returned by the get-mapping API:
//!
//! ```text
//! {"<index>": {"mappings": {"<doc kind>": {"properties": {"<field>": {...}}}}}}
//! ```
//!
//! A field with a `type` is a leaf; a field with `properties` is an object
//! whose leaves become columns named by their path joined with `__`.

use esfdw_query::naming::{field_to_column, NESTED_FIELD_SEPARATOR};
use serde_json::{Map, Value};
use tracing::debug;

use crate::types::translate_type;
use crate::{ColumnSpec, SchemaError, TableSpec};

/// Mapping keys that sit next to doc kinds but are not doc kinds
const RESERVED_DOC_KINDS: &[&str] = &["_default_", ".percolator"];

/// Columns for every leaf field under `properties`, in mapping order
pub fn generate_columns(properties: &Map<String, Value>) -> Result<Vec<ColumnSpec>, SchemaError> {
    let mut columns = Vec::new();
    collect_columns(properties, &mut Vec::new(), &mut Vec::new(), &mut columns)?;
    Ok(columns)
}

fn collect_columns(
    properties: &Map<String, Value>,
    column_path: &mut Vec<String>,
    field_path: &mut Vec<String>,
    out: &mut Vec<ColumnSpec>,
) -> Result<(), SchemaError> {
    for (field, mapping) in properties {
        column_path.push(field_to_column(field));
        field_path.push(field.clone());

        if let Some(es_type) = mapping.get("type").and_then(Value::as_str) {
            out.push(ColumnSpec::new(
                column_path.join(NESTED_FIELD_SEPARATOR),
                translate_type(es_type),
            ));
        } else if let Some(nested) = mapping.get("properties").and_then(Value::as_object) {
            collect_columns(nested, column_path, field_path, out)?;
        } else {
            return Err(SchemaError::MalformedField {
                path: field_path.join("."),
            });
        }

        column_path.pop();
        field_path.pop();
    }
    Ok(())
}

/// Table specs for every doc kind of every index, in mapping order.
///
/// Empty allow-lists include everything. Doc kinds without any leaf field
/// produce no table.
pub fn generate_table_specs(
    mapping: &Value,
    include_indices: &[String],
    include_doc_types: &[String],
) -> Result<Vec<TableSpec>, SchemaError> {
    let indices = mapping.as_object().ok_or(SchemaError::NotAnObject)?;
    let mut specs = Vec::new();

    for (index, index_mapping) in indices {
        if !include_indices.is_empty() && !include_indices.contains(index) {
            continue;
        }

        let doc_kinds = index_mapping
            .get("mappings")
            .and_then(Value::as_object)
            .ok_or_else(|| SchemaError::MissingMappings {
                index: index.clone(),
            })?;

        for (doc_type, doc_mapping) in doc_kinds {
            if RESERVED_DOC_KINDS.contains(&doc_type.as_str()) {
                continue;
            }
            if !include_doc_types.is_empty() && !include_doc_types.contains(doc_type) {
                continue;
            }

            let columns = match doc_mapping.get("properties").and_then(Value::as_object) {
                Some(properties) => generate_columns(properties)?,
                None => Vec::new(),
            };
            if columns.is_empty() {
                debug!(index = %index, doc_type = %doc_type, "Skipping doc type without fields");
                continue;
            }

            specs.push(TableSpec {
                name: field_to_column(doc_type),
                columns,
                doc_type: doc_type.clone(),
                index: index.clone(),
            });
        }
    }

    Ok(specs)
}
