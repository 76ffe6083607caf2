//! Mapping type to column type translation

/// Mapping types whose column type is spelled differently.
/// Anything not listed keeps its name.
const TYPE_MAP: &[(&str, &str)] = &[
    ("string", "text"),
    ("long", "bigint"),
    ("short", "smallint"),
    ("double", "double precision"),
    ("date", "timestamp"),
];

pub fn translate_type(es_type: &str) -> &str {
    TYPE_MAP
        .iter()
        .find(|(from, _)| *from == es_type)
        .map_or(es_type, |&(_, to)| to)
}
