//! LIKE pattern translation
//!
//! A pattern whose only wildcard is one trailing `%` becomes a prefix filter.
//! Anything else becomes a regexp filter; the backend anchors regexps to the
//! whole value, so `%` maps to `.*` and `_` to `.` with no `^`/`$`.
//! ESCAPE clauses are not supported.

use esfdw_query::FilterNode;

/// Characters with special meaning in the backend's regexp syntax
const REGEXP_RESERVED: &[char] = &[
    '.', '?', '+', '*', '|', '{', '}', '[', ']', '(', ')', '"', '\\', '#', '@', '&', '<', '>',
    '~', '^', '$',
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LikePattern {
    Prefix(String),
    Regexp(String),
}

impl LikePattern {
    pub fn compile(pattern: &str) -> Self {
        if let Some(prefix) = pattern.strip_suffix('%') {
            if !prefix.contains(&['%', '_'][..]) {
                return LikePattern::Prefix(prefix.to_string());
            }
        }

        let mut regexp = String::with_capacity(pattern.len() * 2);
        for ch in pattern.chars() {
            match ch {
                '%' => regexp.push_str(".*"),
                '_' => regexp.push('.'),
                ch if REGEXP_RESERVED.contains(&ch) => {
                    regexp.push('\\');
                    regexp.push(ch);
                }
                ch => regexp.push(ch),
            }
        }
        LikePattern::Regexp(regexp)
    }

    pub fn into_filter(self, field: &str) -> FilterNode {
        match self {
            LikePattern::Prefix(prefix) => FilterNode::prefix(field, prefix),
            LikePattern::Regexp(pattern) => FilterNode::regexp(field, pattern),
        }
    }
}

pub fn like_filter(field: &str, pattern: &str) -> FilterNode {
    LikePattern::compile(pattern).into_filter(field)
}
