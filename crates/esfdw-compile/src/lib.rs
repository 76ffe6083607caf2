//! esfdw predicate compiler and executor
//!
//! Compiles planner predicates into Elasticsearch boolean filters, runs them
//! against a [`SearchBackend`] and materializes hits into rows.
//!
//! ```text
//! predicates -> PredicateCompiler -> MustLists -> QueryDocument -> SearchBackend
//!                                                                     |
//!                                             rows <- RowShape <- hits
//! ```

pub mod backend;
pub mod compiler;
pub mod interval;
pub mod operator;
pub mod options;
pub mod pattern;
pub mod predicate;
pub mod rows;
pub mod table;

pub use backend::{BackendError, CountRequest, MockSearchBackend, ScanRequest, SearchBackend};
pub use compiler::PredicateCompiler;
pub use operator::{normalize_operator, Operator};
pub use options::{ColumnNaming, ConnectionOptions, OptionsError, TableOptions};
pub use predicate::{Predicate, PredicateValue, Quantifier};
pub use rows::{Cell, Hit, Row, RowShape};
pub use table::{ColumnDef, ExecError, ForeignTable, Rows};

pub use esfdw_query::{FilterNode, MustLists, QueryDocument, Scalar};
