//! Parser error types for tuled-parser.

use std::path::PathBuf;

use tuled_core::CoreError;

/// Fatal conditions while reading a source. Each variant names the record
/// that caused it.
#[derive(Debug, thiserror::Error)]
pub enum ParserError {
    #[error("Failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed CSV in table '{table}': {source}")]
    Csv {
        table: String,
        #[source]
        source: csv::Error,
    },

    #[error("Table '{table}' is missing required column '{column}'")]
    MissingColumn { table: String, column: String },

    #[error("Table '{table}' has duplicate key '{key}'")]
    DuplicateKey { table: String, key: String },

    #[error(
        "Row '{row_id}' in table '{table}' references {column} '{key}', which does not exist in table '{target_table}'"
    )]
    UnresolvedReference {
        table: String,
        row_id: String,
        column: String,
        key: String,
        target_table: String,
    },

    #[error("Matrix taxon '{taxon}' on line {line} has no language mapping")]
    UnmappedTaxon { taxon: String, line: usize },

    #[error(transparent)]
    Core(#[from] CoreError),
}
