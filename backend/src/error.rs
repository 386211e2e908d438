//! Error types for the matrix pipeline.
//!
//! Two layers:
//!
//! - [`MatrixError`] - everything the loader and the operations can reject
//! - [`ServerError`] - process-level failures of the HTTP server and CLI
//!
//! Every [`MatrixError`] is a client-side problem: the API layer answers it
//! with `400 Bad Request` and the error's message as the body.

use thiserror::Error;

// =============================================================================
// Core Errors
// =============================================================================

/// Errors produced while loading a matrix or running an operation on it.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MatrixError {
    /// The `file` form field was absent or could not be read.
    #[error("error: {0}. must upload form file with key 'file'")]
    MissingFile(String),

    /// The upload could not be parsed as CSV.
    #[error("error: parse error: {0}")]
    MalformedInput(String),

    /// Parsing succeeded but produced no rows.
    #[error("error: empty matrix")]
    EmptyMatrix,

    /// A row's element count differs from the number of rows.
    #[error("error: not an NxN matrix (row {row} has {found} elements, expected {expected})")]
    NotSquare {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// A cell could not be parsed as a base-10 integer.
    #[error("error: non-int values in matrix ('{value}'). all values must be of type int for {operation}")]
    NonInteger {
        operation: &'static str,
        value: String,
    },

    /// The accumulated result left the signed 64-bit range.
    #[error("error: integer overflow during {operation}")]
    Overflow { operation: &'static str },
}

impl MatrixError {
    /// Short machine-friendly name of the error kind, used in request logs.
    pub fn kind(&self) -> &'static str {
        match self {
            MatrixError::MissingFile(_) => "missing_file",
            MatrixError::MalformedInput(_) => "malformed_input",
            MatrixError::EmptyMatrix => "empty_matrix",
            MatrixError::NotSquare { .. } => "not_square",
            MatrixError::NonInteger { .. } => "non_integer",
            MatrixError::Overflow { .. } => "overflow",
        }
    }
}

// =============================================================================
// Server Errors
// =============================================================================

/// HTTP server and CLI errors.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Matrix rejected by the pipeline.
    #[error(transparent)]
    Matrix(#[from] MatrixError),

    /// Could not bind the listening socket.
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: std::net::SocketAddr,
        source: std::io::Error,
    },

    /// IO error while reading input or serving.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid configuration value.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for loader and operation calls.
pub type MatrixResult<T> = Result<T, MatrixError>;

/// Result type for server operations.
pub type ServerResult<T> = Result<T, ServerError>;
