//! Search backend abstraction
//!
//! The executor talks to the search cluster only through `SearchBackend`.
//! A real client implements scan as a scroll over the index and count as a
//! `size: 0` search.

use esfdw_query::QueryDocument;
use serde::Deserialize;
use std::cell::RefCell;
use std::error::Error;
use std::time::Duration;

use crate::rows::Hit;

pub type BackendError = Box<dyn Error + Send + Sync>;

/// Scroll through every hit matching `query`
#[derive(Debug, Clone, PartialEq)]
pub struct ScanRequest {
    pub index: String,
    pub doc_kind: String,
    pub query: QueryDocument,
    pub page_size: u64,
    /// How long the server keeps the scroll context between pages
    pub scroll: Duration,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CountRequest {
    pub index: String,
    pub doc_kind: String,
    pub query: QueryDocument,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CountResponse {
    pub hits: HitsTotal,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HitsTotal {
    pub total: u64,
}

impl CountResponse {
    pub fn total(&self) -> u64 {
        self.hits.total
    }
}

pub trait SearchBackend {
    type Hits: Iterator<Item = Result<Hit, BackendError>>;

    fn scan(&self, request: ScanRequest) -> Result<Self::Hits, BackendError>;

    fn count(&self, request: CountRequest) -> Result<CountResponse, BackendError>;
}

/// In-memory backend for tests
///
/// Returns canned hits and totals and records every request it receives.
/// Filtering is not evaluated.
#[derive(Debug, Default)]
pub struct MockSearchBackend {
    hits: Vec<Hit>,
    total: u64,
    scans: RefCell<Vec<ScanRequest>>,
    counts: RefCell<Vec<CountRequest>>,
}

impl MockSearchBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_hits(mut self, hits: Vec<Hit>) -> Self {
        self.hits = hits;
        self
    }

    pub fn with_total(mut self, total: u64) -> Self {
        self.total = total;
        self
    }

    pub fn scans(&self) -> Vec<ScanRequest> {
        self.scans.borrow().clone()
    }

    pub fn counts(&self) -> Vec<CountRequest> {
        self.counts.borrow().clone()
    }
}

impl SearchBackend for MockSearchBackend {
    type Hits = std::vec::IntoIter<Result<Hit, BackendError>>;

    fn scan(&self, request: ScanRequest) -> Result<Self::Hits, BackendError> {
        self.scans.borrow_mut().push(request);
        let hits: Vec<Result<Hit, BackendError>> = self.hits.iter().cloned().map(Ok).collect();
        Ok(hits.into_iter())
    }

    fn count(&self, request: CountRequest) -> Result<CountResponse, BackendError> {
        self.counts.borrow_mut().push(request);
        Ok(CountResponse {
            hits: HitsTotal { total: self.total },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use esfdw_query::MustLists;
    use serde_json::json;

    #[test]
    fn test_count_response_deserializes() {
        let response: CountResponse =
            serde_json::from_value(json!({"took": 3, "hits": {"total": 200, "hits": []}})).unwrap();
        assert_eq!(response.total(), 200);
    }

    #[test]
    fn test_mock_records_requests() {
        let backend = MockSearchBackend::new().with_total(5);
        let response = backend
            .count(CountRequest {
                index: "i".to_string(),
                doc_kind: "d".to_string(),
                query: QueryDocument::count(MustLists::new()),
            })
            .unwrap();

        assert_eq!(response.total(), 5);
        assert_eq!(backend.counts().len(), 1);
        assert!(backend.scans().is_empty());
    }
}
