//! Error types for the catalog crate.
//!
//! Every variant here is fatal at start-up: a catalog that fails to load
//! must keep the process from serving any request.

use thiserror::Error;

/// Errors that can occur while loading and validating catalog artifacts
#[derive(Error, Debug)]
pub enum CatalogLoadError {
    /// File could not be found or opened
    #[error("Failed to open file: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Item artifact is not valid JSON for the expected shape
    #[error("Failed to decode {file}: {source}")]
    JsonError {
        file: String,
        #[source]
        source: serde_json::Error,
    },

    /// Line in a similarity file couldn't be parsed
    #[error("Parse error at line {line} in {file}: {reason}")]
    ParseError {
        file: String,
        line: usize,
        reason: String,
    },

    /// An item record lacks the field used as its title
    #[error("Record {position} in {file} has no `{field}` field")]
    MissingField {
        file: String,
        position: usize,
        field: String,
    },

    /// A data field had an invalid value
    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },

    /// A similarity row has a different length than the number of rows
    #[error("Similarity matrix in {file} is not square: line {line} has {found} values, expected {expected}")]
    NonSquareMatrix {
        file: String,
        line: usize,
        expected: usize,
        found: usize,
    },

    /// Item count and similarity matrix dimension disagree
    #[error("{catalog} catalog has {items} items but its similarity matrix has dimension {dimension}")]
    LoadMismatch {
        catalog: String,
        items: usize,
        dimension: usize,
    },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, CatalogLoadError>;
