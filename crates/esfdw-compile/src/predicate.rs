//! Predicates handed over by the query planner

use esfdw_query::Scalar;

/// List quantifier of a predicate (`col OP ANY(..)` / `col OP ALL(..)`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Quantifier {
    #[default]
    None,
    Any,
    All,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PredicateValue {
    Scalar(Scalar),
    List(Vec<Scalar>),
}

impl PredicateValue {
    /// Elements of a list value; a scalar is treated as a one-element list
    pub fn elements(&self) -> &[Scalar] {
        match self {
            PredicateValue::Scalar(value) => std::slice::from_ref(value),
            PredicateValue::List(values) => values,
        }
    }
}

impl From<Scalar> for PredicateValue {
    fn from(value: Scalar) -> Self {
        PredicateValue::Scalar(value)
    }
}

impl From<Vec<Scalar>> for PredicateValue {
    fn from(values: Vec<Scalar>) -> Self {
        PredicateValue::List(values)
    }
}

/// A single filter condition on one column
///
/// `operator` is the raw planner token, possibly prefixed with `!`.
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    pub field: String,
    pub operator: String,
    pub value: PredicateValue,
    pub quantifier: Quantifier,
}

impl Predicate {
    pub fn new(field: impl Into<String>, operator: impl Into<String>, value: impl Into<Scalar>) -> Self {
        Self {
            field: field.into(),
            operator: operator.into(),
            value: PredicateValue::Scalar(value.into()),
            quantifier: Quantifier::None,
        }
    }

    /// `field OP ANY(values)`
    pub fn any(field: impl Into<String>, operator: impl Into<String>, values: Vec<Scalar>) -> Self {
        Self {
            field: field.into(),
            operator: operator.into(),
            value: PredicateValue::List(values),
            quantifier: Quantifier::Any,
        }
    }

    /// `field OP ALL(values)`
    pub fn all(field: impl Into<String>, operator: impl Into<String>, values: Vec<Scalar>) -> Self {
        Self {
            field: field.into(),
            operator: operator.into(),
            value: PredicateValue::List(values),
            quantifier: Quantifier::All,
        }
    }
}
