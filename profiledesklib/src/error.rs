//! Error types for profiledesklib

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while configuring tables, querying or loading profiles
#[derive(Error, Debug)]
pub enum ProfileDeskError {
    /// A table was configured without any columns
    #[error("a table needs at least one column")]
    NoColumns,

    /// Two columns share the same key
    #[error("duplicate column key '{0}'")]
    DuplicateColumn(String),

    /// Page size is zero or not one of the offered options
    #[error("invalid page size {size}: {message}")]
    InvalidPageSize { size: usize, message: String },

    /// Pages are 1-based
    #[error("invalid page {0}: pages start at 1")]
    InvalidPage(usize),

    /// A list query parameter could not be interpreted
    #[error("invalid query parameter '{key}={value}': {message}")]
    InvalidQuery {
        key: String,
        value: String,
        message: String,
    },

    /// No client with the given id
    #[error("client not found: {0}")]
    ClientNotFound(String),

    /// Failed to read a profile file
    #[error("failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Profile data is not valid JSON for the expected shape
    #[error("invalid profile data: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
