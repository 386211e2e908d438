//! # matrixops - square CSV matrix operations over HTTP
//!
//! Upload a CSV matrix, get back its echo, transpose, flattened form, sum or
//! product.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  Multipart  │────▶│   Parser    │────▶│  Operation  │────▶│  Text body  │
//! │  'file'     │     │  (N×N grid) │     │  (5 kinds)  │     │  or 400     │
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use matrixops::{load_grid, Operation};
//!
//! let grid = load_grid(b"1,2,3\n4,5,6\n7,8,9\n").unwrap();
//! assert_eq!(Operation::Add.apply(grid).unwrap(), "45");
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Error types
//! - [`config`] - Server configuration
//! - [`parser`] - CSV loading and validation
//! - [`transform`] - Grid, operations and pipeline
//! - [`api`] - HTTP API server

// Core modules
pub mod config;
pub mod error;

// Parsing
pub mod parser;

// Operations
pub mod transform;

// HTTP API
pub mod api;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::ServerConfig;
pub use error::{MatrixError, MatrixResult, ServerError, ServerResult};
pub use parser::{load_grid, load_grid_file, load_grid_reader};
pub use transform::{operations_description, run_bytes, run_file, Grid, Operation};

// Server
pub mod server {
    pub use crate::api::server::{create_router, start_server};
}
