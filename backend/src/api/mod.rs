//! HTTP API module.
//!
//! The boundary around the matrix pipeline: routing, multipart extraction,
//! status mapping and request logging.

pub mod logs;
pub mod server;
pub mod types;

pub use logs::*;
pub use server::{create_router, start_server, FILE_FIELD};
pub use types::*;
