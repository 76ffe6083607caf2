//! Foreign table options

use esfdw_query::naming;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum OptionsError {
    #[error("Missing required option: {0}")]
    Missing(&'static str),

    #[error("Invalid value {value:?} for option {option}")]
    Invalid { option: &'static str, value: String },
}

/// How column names map onto backend field names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColumnNaming {
    /// Columns are named exactly like the fields
    #[default]
    Verbatim,
    /// `foo__bar_baz` addresses `foo.bar-baz`, `timestamp` addresses `@timestamp`
    Translated,
}

impl ColumnNaming {
    pub fn field_for(self, column: &str) -> String {
        match self {
            ColumnNaming::Verbatim => column.to_string(),
            ColumnNaming::Translated => naming::column_to_field(column),
        }
    }
}

/// Where the search backend lives. The core only carries these through to
/// whoever constructs the client.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConnectionOptions {
    pub host: Option<String>,
    pub port: Option<u16>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableOptions {
    pub doc_type: String,
    pub index: Option<String>,
    pub naming: ColumnNaming,
    pub connection: ConnectionOptions,
}

impl TableOptions {
    pub fn new(doc_type: impl Into<String>, index: impl Into<String>) -> Self {
        Self {
            doc_type: doc_type.into(),
            index: Some(index.into()),
            naming: ColumnNaming::default(),
            connection: ConnectionOptions::default(),
        }
    }

    pub fn with_naming(mut self, naming: ColumnNaming) -> Self {
        self.naming = naming;
        self
    }

    /// Parse the option map attached to a foreign table definition
    ///
    /// Recognized keys: `doc_type` (required), `index`,
    /// `column_name_translation` (`'true'` enables it), `hostname`, `port`.
    pub fn from_options(options: &HashMap<String, String>) -> Result<Self, OptionsError> {
        let doc_type = options
            .get("doc_type")
            .cloned()
            .ok_or(OptionsError::Missing("doc_type"))?;

        let naming = match options.get("column_name_translation").map(String::as_str) {
            Some("true") => ColumnNaming::Translated,
            _ => ColumnNaming::Verbatim,
        };

        let port = options
            .get("port")
            .map(|port| {
                port.parse::<u16>().map_err(|_| OptionsError::Invalid {
                    option: "port",
                    value: port.clone(),
                })
            })
            .transpose()?;

        Ok(Self {
            doc_type,
            index: options.get("index").cloned(),
            naming,
            connection: ConnectionOptions {
                host: options.get("hostname").cloned(),
                port,
            },
        })
    }
}
