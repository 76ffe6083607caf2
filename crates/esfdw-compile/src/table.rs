//! Foreign table executor
//!
//! Ties the compiler to a search backend: builds the query document for a
//! scan or a count, logs it, and turns hits into rows lazily.

use esfdw_query::QueryDocument;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, enabled, Level};

use crate::backend::{BackendError, CountRequest, ScanRequest, SearchBackend};
use crate::compiler::PredicateCompiler;
use crate::options::TableOptions;
use crate::predicate::Predicate;
use crate::rows::{Hit, Row, RowShape};

/// Hits per scroll page
pub const SCROLL_SIZE: u64 = 5000;

/// How long the backend keeps a scroll context alive between pages
pub const SCROLL_WINDOW: Duration = Duration::from_secs(5 * 60);

/// Planner cost per requested column
const COST_PER_COLUMN: usize = 100;

#[derive(Debug, Error)]
pub enum ExecError {
    #[error("Unknown column: {0}")]
    UnknownColumn(String),

    #[error("No index configured for doc type {0}")]
    MissingIndex(String),

    #[error("Search backend error: {0}")]
    Backend(#[source] BackendError),

    #[error("Failed to serialize query: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDef {
    pub name: String,
    pub type_name: String,
}

impl ColumnDef {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
        }
    }

    pub fn is_array(&self) -> bool {
        self.type_name.ends_with("[]")
    }
}

pub struct ForeignTable {
    options: TableOptions,
    columns: Vec<ColumnDef>,
    compiler: PredicateCompiler,
}

impl ForeignTable {
    pub fn new(options: TableOptions, columns: Vec<ColumnDef>) -> Self {
        let compiler = PredicateCompiler::new(options.naming);
        Self {
            options,
            columns,
            compiler,
        }
    }

    pub fn options(&self) -> &TableOptions {
        &self.options
    }

    pub fn columns(&self) -> &[ColumnDef] {
        &self.columns
    }

    /// Index to search for the given predicates. Always the configured
    /// index; time-partitioned setups resolve a narrower one here.
    pub fn index_for(&self, _predicates: &[Predicate]) -> Result<String, ExecError> {
        self.options
            .index
            .clone()
            .ok_or_else(|| ExecError::MissingIndex(self.options.doc_type.clone()))
    }

    /// Scan every document matching `predicates`, yielding one row per hit
    /// keyed by the requested column names.
    ///
    /// With no columns requested, rows only carry `_id`.
    pub fn execute<B: SearchBackend>(
        &self,
        backend: &B,
        predicates: &[Predicate],
        columns: &[&str],
    ) -> Result<Rows<B::Hits>, ExecError> {
        let shape = self.row_shape(columns)?;
        let query = QueryDocument::scan(self.compiler.compile(predicates), shape.fields());
        self.log_query("scan", &query)?;

        let hits = backend
            .scan(ScanRequest {
                index: self.index_for(predicates)?,
                doc_kind: self.options.doc_type.clone(),
                query,
                page_size: SCROLL_SIZE,
                scroll: SCROLL_WINDOW,
            })
            .map_err(ExecError::Backend)?;

        Ok(Rows { hits, shape })
    }

    /// Row count estimate and cost for the planner
    pub fn rel_size<B: SearchBackend>(
        &self,
        backend: &B,
        predicates: &[Predicate],
        columns: &[&str],
    ) -> Result<(u64, usize), ExecError> {
        let query = QueryDocument::count(self.compiler.compile(predicates));
        self.log_query("count", &query)?;

        let response = backend
            .count(CountRequest {
                index: self.index_for(predicates)?,
                doc_kind: self.options.doc_type.clone(),
                query,
            })
            .map_err(ExecError::Backend)?;

        Ok((response.total(), columns.len() * COST_PER_COLUMN))
    }

    fn row_shape(&self, columns: &[&str]) -> Result<RowShape, ExecError> {
        if columns.is_empty() {
            return Ok(RowShape::identity());
        }

        let mut entries = Vec::with_capacity(columns.len());
        for &column in columns {
            let def = self
                .columns
                .iter()
                .find(|def| def.name == column)
                .ok_or_else(|| ExecError::UnknownColumn(column.to_string()))?;
            entries.push((column, self.options.naming.field_for(column), def.is_array()));
        }
        Ok(RowShape::new(entries))
    }

    fn log_query(&self, kind: &str, query: &QueryDocument) -> Result<(), ExecError> {
        if !enabled!(Level::DEBUG) {
            return Ok(());
        }
        let fingerprint = query.fingerprint()?;
        let body = query.to_json()?;
        debug!(
            kind,
            doc_type = %self.options.doc_type,
            fingerprint = %fingerprint,
            query = %body,
            "Compiled search query"
        );
        Ok(())
    }
}

/// Lazily materialized rows of a scan
pub struct Rows<I> {
    hits: I,
    shape: RowShape,
}

impl<I> Iterator for Rows<I>
where
    I: Iterator<Item = Result<Hit, BackendError>>,
{
    type Item = Result<Row, ExecError>;

    fn next(&mut self) -> Option<Self::Item> {
        let hit = self.hits.next()?;
        Some(
            hit.map(|hit| self.shape.materialize(&hit))
                .map_err(ExecError::Backend),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_array_column_detection() {
        assert!(ColumnDef::new("baz", "text[]").is_array());
        assert!(!ColumnDef::new("bar", "int").is_array());
    }

    #[test]
    fn test_index_for_uses_configured_index() {
        let table = ForeignTable::new(TableOptions::new("foo_doc", "our_index"), vec![]);
        assert_eq!(table.index_for(&[]).unwrap(), "our_index");
    }

    #[test]
    fn test_missing_index() {
        let mut options = TableOptions::new("foo_doc", "ignored");
        options.index = None;
        let table = ForeignTable::new(options, vec![]);

        assert!(matches!(table.index_for(&[]), Err(ExecError::MissingIndex(doc)) if doc == "foo_doc"));
    }

    #[test]
    fn test_unknown_column() {
        let table = ForeignTable::new(
            TableOptions::new("d", "i"),
            vec![ColumnDef::new("a", "text")],
        );
        assert!(matches!(table.row_shape(&["b"]), Err(ExecError::UnknownColumn(c)) if c == "b"));
    }
}
