//! Foreign table schema generation from search index mappings
//!
//! Flattens the nested field mappings of every doc kind into one column per
//! leaf field and renders `CREATE FOREIGN TABLE` statements for them.

use serde::Serialize;
use thiserror::Error;

pub mod ddl;
pub mod flatten;
pub mod types;

pub use ddl::{generate_schema, render_table_ddl};
pub use flatten::{generate_columns, generate_table_specs};
pub use types::translate_type;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchemaError {
    #[error("Mapping document must be a JSON object keyed by index")]
    NotAnObject,

    #[error("Index {index} has no mappings object")]
    MissingMappings { index: String },

    #[error("Field {path} has neither a type nor properties")]
    MalformedField { path: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnSpec {
    pub column_name: String,
    pub data_type: String,
}

impl ColumnSpec {
    pub fn new(column_name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            column_name: column_name.into(),
            data_type: data_type.into(),
        }
    }
}

/// One foreign table per doc kind per index
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableSpec {
    pub name: String,
    pub columns: Vec<ColumnSpec>,
    pub doc_type: String,
    pub index: String,
}
