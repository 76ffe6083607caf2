//! Result row materialization

use esfdw_query::naming::ID_FIELD;
use esfdw_query::Scalar;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{BTreeMap, HashMap};
use tracing::warn;

/// One search hit as returned by a scan
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Hit {
    #[serde(rename = "_id")]
    pub id: String,

    /// Requested fields, each an array of values. Fields the document lacks
    /// are absent, and so are fields holding values that are not scalars
    /// (e.g. object-shaped geo points).
    #[serde(default, deserialize_with = "scalar_fields")]
    pub fields: HashMap<String, Vec<Scalar>>,
}

fn scalar_fields<'de, D>(deserializer: D) -> Result<HashMap<String, Vec<Scalar>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = HashMap::<String, Vec<serde_json::Value>>::deserialize(deserializer)?;
    let mut fields = HashMap::with_capacity(raw.len());
    for (name, values) in raw {
        let scalars: Result<Vec<Scalar>, _> = values.into_iter().map(Scalar::deserialize).collect();
        match scalars {
            Ok(scalars) => {
                fields.insert(name, scalars);
            }
            Err(err) => warn!(field = %name, error = %err, "Dropping non-scalar field value"),
        }
    }
    Ok(fields)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    Value(Scalar),
    Array(Vec<Scalar>),
}

impl From<Scalar> for Cell {
    fn from(value: Scalar) -> Self {
        Cell::Value(value)
    }
}

pub type Row = BTreeMap<String, Cell>;

#[derive(Debug, Clone, PartialEq)]
struct Projection {
    column: String,
    field: String,
    is_array: bool,
}

/// How hit fields map onto output columns
#[derive(Debug, Clone, PartialEq)]
pub struct RowShape {
    projections: Vec<Projection>,
}

impl RowShape {
    /// Build from `(column, field, is_array)` entries
    pub fn new<I, C, F>(columns: I) -> Self
    where
        I: IntoIterator<Item = (C, F, bool)>,
        C: Into<String>,
        F: Into<String>,
    {
        Self {
            projections: columns
                .into_iter()
                .map(|(column, field, is_array)| Projection {
                    column: column.into(),
                    field: field.into(),
                    is_array,
                })
                .collect(),
        }
    }

    /// Rows carrying only the document id
    pub fn identity() -> Self {
        Self::new([(ID_FIELD, ID_FIELD, false)])
    }

    /// Field names to request from the backend, in column order
    pub fn fields(&self) -> Vec<String> {
        self.projections.iter().map(|p| p.field.clone()).collect()
    }

    pub fn materialize(&self, hit: &Hit) -> Row {
        let missing = [Scalar::Null];
        self.projections
            .iter()
            .map(|projection| {
                let cell = if projection.field == ID_FIELD {
                    Cell::Value(Scalar::String(hit.id.clone()))
                } else {
                    let values = hit
                        .fields
                        .get(&projection.field)
                        .map(Vec::as_slice)
                        .unwrap_or(&missing);
                    if projection.is_array {
                        Cell::Array(values.to_vec())
                    } else {
                        Cell::Value(values.first().cloned().unwrap_or(Scalar::Null))
                    }
                };
                (projection.column.clone(), cell)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn hit(value: serde_json::Value) -> Hit {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_first_element_for_scalar_columns() {
        let shape = RowShape::new([("bar", "bar", false), ("baz", "baz", true)]);
        let row = shape.materialize(&hit(json!({
            "_id": "1",
            "fields": {"bar": [6, 7], "baz": ["a", "b", "c"]}
        })));

        assert_eq!(row["bar"], Cell::Value(Scalar::Int(6)));
        assert_eq!(
            row["baz"],
            Cell::Array(vec!["a".into(), "b".into(), "c".into()])
        );
    }

    #[test]
    fn test_absent_field_is_null() {
        let shape = RowShape::new([("quux", "quux", false), ("tags", "tags", true)]);
        let row = shape.materialize(&hit(json!({"_id": "1"})));

        assert_eq!(row["quux"], Cell::Value(Scalar::Null));
        assert_eq!(row["tags"], Cell::Array(vec![Scalar::Null]));
    }

    #[test]
    fn test_empty_array_for_scalar_column_is_null() {
        let shape = RowShape::new([("a", "a", false)]);
        let row = shape.materialize(&hit(json!({"_id": "1", "fields": {"a": []}})));

        assert_eq!(row["a"], Cell::Value(Scalar::Null));
    }

    #[test]
    fn test_non_scalar_field_does_not_fail_hit() {
        let shape = RowShape::new([("name", "name", false), ("location", "location", false)]);
        let row = shape.materialize(&hit(json!({
            "_id": "1",
            "fields": {
                "name": ["x"],
                "location": [{"lat": 41.1, "lon": -71.3}]
            }
        })));

        assert_eq!(row["name"], Cell::Value("x".into()));
        assert_eq!(row["location"], Cell::Value(Scalar::Null));
    }

    #[test]
    fn test_identity_shape() {
        let shape = RowShape::identity();
        assert_eq!(shape.fields(), vec!["_id".to_string()]);

        let row = shape.materialize(&hit(json!({"_id": "abc"})));
        assert_eq!(row.len(), 1);
        assert_eq!(row["_id"], Cell::Value("abc".into()));
    }

    #[test]
    fn test_column_and_field_names_differ() {
        let shape = RowShape::new([("f__o_o", "f.o-o", false)]);
        let row = shape.materialize(&hit(json!({"_id": "1", "fields": {"f.o-o": ["value"]}})));

        assert_eq!(shape.fields(), vec!["f.o-o".to_string()]);
        assert_eq!(row["f__o_o"], Cell::Value("value".into()));
    }
}
