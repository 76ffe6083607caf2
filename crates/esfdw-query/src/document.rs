//! Search request bodies
//!
//! Wraps compiled `must` / `must_not` lists into the `filtered` query envelope:
//!
//! ```text
//! {"query": {"filtered": {"filter": {"bool": {"must": [..], "must_not": [..]}}}},
//!  "fields": [..]}
//! ```
//!
//! Empty lists are left out, and when both are empty the `query` key is
//! omitted entirely so the backend matches every document.

use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::{FilterNode, MustLists};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryDocument {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<FilteredQuery>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilteredQuery {
    pub filtered: Filtered,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Filtered {
    pub filter: BoolClause,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoolClause {
    #[serde(rename = "bool")]
    pub bool_filter: BoolFilter,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BoolFilter {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub must: Vec<FilterNode>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub must_not: Vec<FilterNode>,
}

impl FilteredQuery {
    /// `None` when neither list holds a filter
    pub fn from_lists(lists: MustLists) -> Option<Self> {
        if lists.is_empty() {
            return None;
        }
        Some(Self {
            filtered: Filtered {
                filter: BoolClause {
                    bool_filter: BoolFilter {
                        must: lists.must.into_nodes(),
                        must_not: lists.must_not.into_nodes(),
                    },
                },
            },
        })
    }

    pub fn bool_filter(&self) -> &BoolFilter {
        &self.filtered.filter.bool_filter
    }
}

impl QueryDocument {
    /// Scan request projecting `fields`
    pub fn scan(lists: MustLists, fields: Vec<String>) -> Self {
        Self {
            query: FilteredQuery::from_lists(lists),
            fields: Some(fields),
            size: None,
        }
    }

    /// Count-only request (`size: 0`, no projection)
    pub fn count(lists: MustLists) -> Self {
        Self {
            query: FilteredQuery::from_lists(lists),
            fields: None,
            size: Some(0),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }

    /// SHA-256 of the serialized document, used to correlate log lines
    pub fn fingerprint(&self) -> serde_json::Result<String> {
        let json = serde_json::to_string(self)?;
        let mut hasher = Sha256::new();
        hasher.update(json.as_bytes());
        Ok(format!("{:x}", hasher.finalize()))
    }
}
