//! Ordered filter accumulation
//!
//! A boolean filter takes lists of sub-filters. `FilterList` collects them in
//! insertion order; the query document consumes it by value once compilation
//! is done.

use crate::{FilterNode, RangeBounds, Scalar};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterList {
    nodes: Vec<FilterNode>,
}

impl FilterList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a filter, optionally enclosed in `not` and then `constant_score`
    pub fn append_filter(&mut self, filter: FilterNode, negate: bool, constant_score: Option<f64>) {
        let mut filter = if negate { filter.negate() } else { filter };
        if let Some(boost) = constant_score {
            filter = filter.constant_score(boost);
        }
        self.nodes.push(filter);
    }

    pub fn push(&mut self, filter: FilterNode) {
        self.append_filter(filter, false, None);
    }

    /// Single term filter. A null value appends nothing.
    pub fn append_term(&mut self, field: &str, value: Scalar) {
        if !value.is_null() {
            self.push(FilterNode::term(field, value));
        }
    }

    pub fn append_terms(&mut self, field: &str, values: Vec<Scalar>) {
        self.push(FilterNode::terms(field, values));
    }

    pub fn append_range(&mut self, field: &str, bounds: RangeBounds) {
        self.push(FilterNode::range(field, bounds));
    }

    /// Put into a must-not list to test for absence
    pub fn append_exists(&mut self, field: &str) {
        self.push(FilterNode::exists(field));
    }

    pub fn append_missing(&mut self, field: &str) {
        self.push(FilterNode::missing(field));
    }

    pub fn append_prefix(&mut self, field: &str, value: impl Into<String>) {
        self.push(FilterNode::prefix(field, value));
    }

    pub fn append_regexp(&mut self, field: &str, pattern: impl Into<String>) {
        self.push(FilterNode::regexp(field, pattern));
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FilterNode> {
        self.nodes.iter()
    }

    pub fn as_slice(&self) -> &[FilterNode] {
        &self.nodes
    }

    pub fn into_nodes(self) -> Vec<FilterNode> {
        self.nodes
    }
}

impl From<Vec<FilterNode>> for FilterList {
    fn from(nodes: Vec<FilterNode>) -> Self {
        Self { nodes }
    }
}

impl IntoIterator for FilterList {
    type Item = FilterNode;
    type IntoIter = std::vec::IntoIter<FilterNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.into_iter()
    }
}

impl<'a> IntoIterator for &'a FilterList {
    type Item = &'a FilterNode;
    type IntoIter = std::slice::Iter<'a, FilterNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter()
    }
}

/// The `must` / `must_not` pair a predicate list compiles into
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MustLists {
    pub must: FilterList,
    pub must_not: FilterList,
}

impl MustLists {
    pub fn new() -> Self {
        Self::default()
    }

    /// The list a filter belongs in given its negation flag
    pub fn target(&mut self, negated: bool) -> &mut FilterList {
        if negated {
            &mut self.must_not
        } else {
            &mut self.must
        }
    }

    pub fn is_empty(&self) -> bool {
        self.must.is_empty() && self.must_not.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_wraps_not_inside_constant_score() {
        let mut list = FilterList::new();
        list.append_filter(FilterNode::exists("foo"), true, Some(2.0));

        assert_eq!(
            list.as_slice(),
            &[FilterNode::exists("foo").negate().constant_score(2.0)]
        );
    }

    #[test]
    fn test_null_term_is_skipped() {
        let mut list = FilterList::new();
        list.append_term("foo", Scalar::Null);
        list.append_term("foo", Scalar::from(100));

        assert_eq!(list.len(), 1);
        assert_eq!(list.as_slice(), &[FilterNode::term("foo", 100)]);
    }

    #[test]
    fn test_preserves_insertion_order() {
        let mut list = FilterList::new();
        list.append_missing("a");
        list.append_prefix("b", "x");
        list.append_regexp("c", ".*");

        let fields: Vec<_> = list.iter().filter_map(FilterNode::field).collect();
        assert_eq!(fields, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_target_routes_by_negation() {
        let mut lists = MustLists::new();
        assert!(lists.is_empty());

        lists.target(true).append_exists("x");
        assert!(lists.must.is_empty());
        assert_eq!(lists.must_not.len(), 1);
    }
}
