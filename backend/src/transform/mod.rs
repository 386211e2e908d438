//! Matrix operations.
//!
//! - Grid: the validated square matrix and its operations
//! - Operations: the operation catalogue the API and CLI dispatch on
//! - Pipeline: load + apply in one call

pub mod grid;
pub mod operations;
pub mod pipeline;

pub use grid::Grid;
pub use operations::{operations_description, Operation};
pub use pipeline::{run_bytes, run_file};
