//! Operator tokens and their normalization

use esfdw_query::Scalar;
use std::fmt;

/// Prefix the planner puts in front of a negated operator
pub const NEGATION_MARKER: char = '!';

/// Canonical comparison operator
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operator {
    Eq,
    Ne,
    /// `~~` (LIKE)
    Like,
    /// `<@` (value contained in a range literal)
    ContainedIn,
    Lt,
    Le,
    Gt,
    Ge,
    /// Anything else, e.g. `~~*` (ILIKE). Never pushed down.
    Other(String),
}

impl Operator {
    pub fn parse(token: &str) -> Self {
        match token {
            "=" => Operator::Eq,
            "<>" => Operator::Ne,
            "~~" => Operator::Like,
            "<@" => Operator::ContainedIn,
            "<" => Operator::Lt,
            "<=" => Operator::Le,
            ">" => Operator::Gt,
            ">=" => Operator::Ge,
            other => Operator::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Operator::Eq => "=",
            Operator::Ne => "<>",
            Operator::Like => "~~",
            Operator::ContainedIn => "<@",
            Operator::Lt => "<",
            Operator::Le => "<=",
            Operator::Gt => ">",
            Operator::Ge => ">=",
            Operator::Other(token) => token,
        }
    }

    /// Whether the operator (or its negation) can be expressed as a backend filter
    pub fn is_pushed_down(&self) -> bool {
        !matches!(self, Operator::Other(_))
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Split a raw token into its canonical operator and a negation flag.
///
/// Negated operators are handled as their positive counterparts placed in the
/// must-not list. `<>` against a value becomes a negated `=`; `<>` against
/// NULL stays as is, since that is how IS NOT NULL arrives.
pub fn normalize_operator(token: &str, value: &Scalar) -> (Operator, bool) {
    let (token, mut negated) = match token.strip_prefix(NEGATION_MARKER) {
        Some(rest) => (rest, true),
        None => (token, false),
    };
    let mut operator = Operator::parse(token);
    if operator == Operator::Ne && !value.is_null() {
        operator = Operator::Eq;
        negated = true;
    }
    (operator, negated)
}
