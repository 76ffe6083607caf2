//! Translation between relational column names and backend field names
//!
//! Nested fields are flattened with a `__` separator (`foo.bar.baz` is the
//! column `foo__bar__baz`), dashes become underscores, and the Logstash
//! `@timestamp` field is exposed as `timestamp`.

/// Separator for the name components of a nested field
pub const NESTED_FIELD_SEPARATOR: &str = "__";

/// Document identity; returned out of band and never renamed
pub const ID_FIELD: &str = "_id";

pub const TIMESTAMP_FIELD: &str = "@timestamp";
pub const TIMESTAMP_COLUMN: &str = "timestamp";

/// Backend field name for a column
pub fn column_to_field(column: &str) -> String {
    match column {
        ID_FIELD => return ID_FIELD.to_string(),
        TIMESTAMP_COLUMN => return TIMESTAMP_FIELD.to_string(),
        _ => {}
    }
    column.replace(NESTED_FIELD_SEPARATOR, ".").replace('_', "-")
}

/// Column-safe name for one backend name component (field or doc type)
pub fn field_to_column(name: &str) -> String {
    if name == TIMESTAMP_FIELD {
        return TIMESTAMP_COLUMN.to_string();
    }
    name.replace('-', "_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_to_field() {
        assert_eq!(column_to_field("object__nested_field"), "object.nested-field");
        assert_eq!(column_to_field("timestamp"), "@timestamp");
        assert_eq!(column_to_field("plain"), "plain");
        assert_eq!(column_to_field("_id"), "_id");
    }

    #[test]
    fn test_field_to_column() {
        assert_eq!(field_to_column("f-f"), "f_f");
        assert_eq!(field_to_column("@timestamp"), "timestamp");
        assert_eq!(field_to_column("doc-3"), "doc_3");
    }

    #[test]
    fn test_nested_round_trip_for_dashed_names() {
        let column = ["object", "nested-field"]
            .iter()
            .map(|segment| field_to_column(segment))
            .collect::<Vec<_>>()
            .join(NESTED_FIELD_SEPARATOR);

        assert_eq!(column, "object__nested_field");
        assert_eq!(column_to_field(&column), "object.nested-field");
    }
}
