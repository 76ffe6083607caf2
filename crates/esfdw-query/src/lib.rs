//! esfdw filter IR
//!
//! Filter nodes in the Elasticsearch boolean filter grammar, the ordered list
//! used to accumulate them, and the query document that wraps them for a
//! search call. Everything here serializes to the exact JSON shape the
//! backend expects.

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use std::collections::BTreeMap;

pub mod builder;
pub mod document;
pub mod naming;
mod types;

pub use builder::{FilterList, MustLists};
pub use document::{BoolFilter, FilteredQuery, QueryDocument};
pub use types::Scalar;

/// Bound operator of a range filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RangeOp {
    Gt,
    Gte,
    Lt,
    Lte,
}

pub type RangeBounds = BTreeMap<RangeOp, Scalar>;

/// A single filter clause
#[derive(Debug, Clone, PartialEq)]
pub enum FilterNode {
    Term { field: String, value: Scalar },
    Terms { field: String, values: Vec<Scalar> },
    Range { field: String, bounds: RangeBounds },
    Exists { field: String },
    Missing { field: String },
    Prefix { field: String, value: String },
    Regexp { field: String, pattern: String },
    Not(Box<FilterNode>),
    And(Vec<FilterNode>),
    Or(Vec<FilterNode>),
    ConstantScore { filter: Box<FilterNode>, boost: f64 },
}

impl FilterNode {
    pub fn term(field: impl Into<String>, value: impl Into<Scalar>) -> Self {
        FilterNode::Term {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn terms(field: impl Into<String>, values: Vec<Scalar>) -> Self {
        FilterNode::Terms {
            field: field.into(),
            values,
        }
    }

    pub fn range(field: impl Into<String>, bounds: RangeBounds) -> Self {
        FilterNode::Range {
            field: field.into(),
            bounds,
        }
    }

    pub fn exists(field: impl Into<String>) -> Self {
        FilterNode::Exists { field: field.into() }
    }

    pub fn missing(field: impl Into<String>) -> Self {
        FilterNode::Missing { field: field.into() }
    }

    pub fn prefix(field: impl Into<String>, value: impl Into<String>) -> Self {
        FilterNode::Prefix {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn regexp(field: impl Into<String>, pattern: impl Into<String>) -> Self {
        FilterNode::Regexp {
            field: field.into(),
            pattern: pattern.into(),
        }
    }

    /// Wrap this node in a `not` filter
    pub fn negate(self) -> Self {
        FilterNode::Not(Box::new(self))
    }

    /// Wrap this node in a `constant_score` filter with the given boost
    pub fn constant_score(self, boost: f64) -> Self {
        FilterNode::ConstantScore {
            filter: Box::new(self),
            boost,
        }
    }

    /// Field targeted by a leaf filter; `None` for compound nodes
    pub fn field(&self) -> Option<&str> {
        match self {
            FilterNode::Term { field, .. }
            | FilterNode::Terms { field, .. }
            | FilterNode::Range { field, .. }
            | FilterNode::Exists { field }
            | FilterNode::Missing { field }
            | FilterNode::Prefix { field, .. }
            | FilterNode::Regexp { field, .. } => Some(field),
            FilterNode::Not(_)
            | FilterNode::And(_)
            | FilterNode::Or(_)
            | FilterNode::ConstantScore { .. } => None,
        }
    }
}

/// One-entry JSON object `{key: value}`
struct Keyed<'a, T: ?Sized>(&'a str, &'a T);

impl<T: Serialize + ?Sized> Serialize for Keyed<'_, T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(self.0, self.1)?;
        map.end()
    }
}

#[derive(Serialize)]
struct ConstantScoreBody<'a> {
    filter: &'a FilterNode,
    boost: f64,
}

impl Serialize for FilterNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        match self {
            FilterNode::Term { field, value } => map.serialize_entry("term", &Keyed(field, value))?,
            FilterNode::Terms { field, values } => {
                map.serialize_entry("terms", &Keyed(field, values))?
            }
            FilterNode::Range { field, bounds } => {
                map.serialize_entry("range", &Keyed(field, bounds))?
            }
            FilterNode::Exists { field } => map.serialize_entry("exists", &Keyed("field", field))?,
            FilterNode::Missing { field } => {
                map.serialize_entry("missing", &Keyed("field", field))?
            }
            FilterNode::Prefix { field, value } => {
                map.serialize_entry("prefix", &Keyed(field, value))?
            }
            FilterNode::Regexp { field, pattern } => {
                map.serialize_entry("regexp", &Keyed(field, pattern))?
            }
            FilterNode::Not(inner) => map.serialize_entry("not", inner)?,
            FilterNode::And(nodes) => map.serialize_entry("and", nodes)?,
            FilterNode::Or(nodes) => map.serialize_entry("or", nodes)?,
            FilterNode::ConstantScore { filter, boost } => map.serialize_entry(
                "constant_score",
                &ConstantScoreBody {
                    filter,
                    boost: *boost,
                },
            )?,
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn to_json(node: &FilterNode) -> serde_json::Value {
        serde_json::to_value(node).unwrap()
    }

    #[test]
    fn test_leaf_shapes() {
        assert_eq!(to_json(&FilterNode::term("foo", "bar")), json!({"term": {"foo": "bar"}}));
        assert_eq!(
            to_json(&FilterNode::terms("a", vec![1.into(), 2.into()])),
            json!({"terms": {"a": [1, 2]}})
        );
        assert_eq!(to_json(&FilterNode::exists("foo")), json!({"exists": {"field": "foo"}}));
        assert_eq!(to_json(&FilterNode::missing("foo")), json!({"missing": {"field": "foo"}}));
        assert_eq!(to_json(&FilterNode::prefix("d", "g")), json!({"prefix": {"d": "g"}}));
        assert_eq!(to_json(&FilterNode::regexp("d", "h..*")), json!({"regexp": {"d": "h..*"}}));
    }

    #[test]
    fn test_range_bounds_keyed_by_operator() {
        let bounds = RangeBounds::from([
            (RangeOp::Lt, Scalar::from("5")),
            (RangeOp::Gte, Scalar::from("-1")),
        ]);

        assert_eq!(
            to_json(&FilterNode::range("foo", bounds)),
            json!({"range": {"foo": {"gte": "-1", "lt": "5"}}})
        );
    }

    #[test]
    fn test_compound_shapes() {
        let node = FilterNode::And(vec![
            FilterNode::term("c", "x"),
            FilterNode::Or(vec![FilterNode::missing("c")]),
        ])
        .negate()
        .constant_score(1.5);

        assert_eq!(
            to_json(&node),
            json!({
                "constant_score": {
                    "filter": {"not": {"and": [
                        {"term": {"c": "x"}},
                        {"or": [{"missing": {"field": "c"}}]}
                    ]}},
                    "boost": 1.5
                }
            })
        );
    }

    #[test]
    fn test_field_of_compound_is_none() {
        assert_eq!(FilterNode::exists("x").field(), Some("x"));
        assert_eq!(FilterNode::exists("x").negate().field(), None);
    }
}
