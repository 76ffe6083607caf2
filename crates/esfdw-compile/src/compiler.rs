//! Predicate compiler
//!
//! Turns planner predicates into `must` / `must_not` filter lists. Only
//! operators the backend can evaluate exactly are pushed down; everything
//! else is left out and re-checked by the caller on the returned rows.

use esfdw_query::{FilterList, FilterNode, MustLists, RangeBounds, RangeOp, Scalar};
use tracing::{debug, warn};

use crate::interval::parse_interval;
use crate::operator::{normalize_operator, Operator};
use crate::options::ColumnNaming;
use crate::pattern::like_filter;
use crate::predicate::{Predicate, PredicateValue, Quantifier};

#[derive(Debug, Clone, Copy, Default)]
pub struct PredicateCompiler {
    naming: ColumnNaming,
}

impl PredicateCompiler {
    pub fn new(naming: ColumnNaming) -> Self {
        Self { naming }
    }

    /// Compile a predicate list into match lists
    pub fn compile(&self, predicates: &[Predicate]) -> MustLists {
        let mut lists = MustLists::new();
        for predicate in predicates {
            let field = self.naming.field_for(&predicate.field);
            let values = predicate.value.elements();
            match predicate.quantifier {
                Quantifier::Any => compile_any(&mut lists, &field, &predicate.operator, values),
                Quantifier::All => compile_all(&mut lists, &field, &predicate.operator, values),
                // A list without a quantifier is an array comparison, even with one element
                Quantifier::None => match &predicate.value {
                    PredicateValue::Scalar(value) => {
                        process_scalar(&mut lists, &field, &predicate.operator, value)
                    }
                    PredicateValue::List(_) => {
                        debug!(field = %field, "list value without quantifier not pushed down")
                    }
                },
            }
        }
        lists
    }
}

/// Route one scalar condition to `must` or `must_not`
pub fn process_scalar(lists: &mut MustLists, field: &str, token: &str, value: &Scalar) {
    let (operator, negated) = normalize_operator(token, value);
    if !operator.is_pushed_down() {
        debug!(field, operator = %operator, "operator not pushed down");
        return;
    }
    append_compiled(lists.target(negated), field, &operator, value);
}

/// `field OP ANY(values)`
fn compile_any(lists: &mut MustLists, field: &str, token: &str, values: &[Scalar]) {
    if token == "=" {
        lists.must.append_terms(field, values.to_vec());
        return;
    }

    // Normalize against a non-null stand-in so `<>` folds into negated `=`
    let (operator, negated) = normalize_operator(token, &Scalar::Bool(true));
    if !operator.is_pushed_down() {
        debug!(field, operator = %operator, "operator not pushed down");
        return;
    }

    let mut alternatives = FilterList::new();
    for value in values {
        if !append_compiled(&mut alternatives, field, &operator, value) {
            // A partial disjunction would drop matching rows
            return;
        }
    }

    if negated {
        // a <> ANY(x, y) => NOT (a = x AND a = y)
        lists.must_not.push(FilterNode::And(alternatives.into_nodes()));
    } else {
        lists.must.push(FilterNode::Or(alternatives.into_nodes()));
    }
}

/// `field OP ALL(values)`
fn compile_all(lists: &mut MustLists, field: &str, token: &str, values: &[Scalar]) {
    if token == "<>" {
        // a <> ALL(x, y) => NOT (a = x OR a = y)
        lists.must_not.append_terms(field, values.to_vec());
        return;
    }
    for value in values {
        process_scalar(lists, field, token, value);
    }
}

/// Append the filter for a positive operator.
///
/// Returns `false` when nothing could be appended for this value, e.g. a
/// LIKE against a non-string or a malformed range literal.
pub fn append_compiled(list: &mut FilterList, field: &str, operator: &Operator, value: &Scalar) -> bool {
    match operator {
        Operator::Eq if value.is_null() => list.append_missing(field),
        Operator::Eq => list.append_term(field, value.clone()),
        Operator::Ne if value.is_null() => list.append_exists(field),
        Operator::Ne => list.append_filter(FilterNode::term(field, value.clone()), true, None),
        Operator::Like => match value.as_str() {
            Some(pattern) => list.push(like_filter(field, pattern)),
            None => {
                debug!(field, value = ?value, "LIKE against a non-string value not pushed down");
                return false;
            }
        },
        Operator::ContainedIn => {
            let bounds = value.as_str().map(parse_interval);
            match bounds {
                Some(Ok(bounds)) => list.append_range(field, bounds),
                Some(Err(err)) => {
                    warn!(field, error = %err, "range literal not pushed down");
                    return false;
                }
                None => {
                    debug!(field, value = ?value, "range containment against a non-literal not pushed down");
                    return false;
                }
            }
        }
        Operator::Lt => list.append_range(field, single_bound(RangeOp::Lt, value)),
        Operator::Le => list.append_range(field, single_bound(RangeOp::Lte, value)),
        Operator::Gt => list.append_range(field, single_bound(RangeOp::Gt, value)),
        Operator::Ge => list.append_range(field, single_bound(RangeOp::Gte, value)),
        Operator::Other(_) => return false,
    }
    true
}

fn single_bound(op: RangeOp, value: &Scalar) -> RangeBounds {
    RangeBounds::from([(op, value.clone())])
}
