//! Foreign table DDL rendering

use serde_json::Value;

use crate::flatten::generate_table_specs;
use crate::{SchemaError, TableSpec};

/// `DROP` + `CREATE FOREIGN TABLE` for one table, terminated by a newline
pub fn render_table_ddl(spec: &TableSpec, server: &str) -> String {
    let columns = spec
        .columns
        .iter()
        .map(|col| format!("    {} {}", col.column_name, col.data_type))
        .collect::<Vec<_>>()
        .join(",\n");

    format!(
        "DROP FOREIGN TABLE IF EXISTS {table};\n\
         CREATE FOREIGN TABLE {table} (\n\
         {columns}\n\
         ) SERVER {server} OPTIONS (\n    \
         doc_type '{doc_type}',\n    \
         index '{index}',\n    \
         column_name_translation 'true'\n\
         );\n",
        table = spec.name,
        columns = columns,
        server = server,
        doc_type = spec.doc_type,
        index = spec.index,
    )
}

/// One DDL statement pair per generated table, in mapping order
pub fn generate_schema(
    mapping: &Value,
    include_indices: &[String],
    include_doc_types: &[String],
    server: &str,
) -> Result<Vec<String>, SchemaError> {
    Ok(generate_table_specs(mapping, include_indices, include_doc_types)?
        .iter()
        .map(|spec| render_table_ddl(spec, server))
        .collect())
}
