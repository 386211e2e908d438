//! REST API types.
//!
//! Successful operations answer with plain text, exactly the operation's
//! output. Failures answer `400 Bad Request` with the error message.

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::MatrixError;
use crate::transform::Operation;

const TEXT_PLAIN: &str = "text/plain; charset=utf-8";

/// Body of a successful operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextResponse(pub String);

impl IntoResponse for TextResponse {
    fn into_response(self) -> Response {
        ([(header::CONTENT_TYPE, TEXT_PLAIN)], self.0).into_response()
    }
}

/// Error returned by the operation endpoints.
///
/// Every matrix error is the client's fault, so there is no server-error
/// variant here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError(pub MatrixError);

impl From<MatrixError> for ApiError {
    fn from(err: MatrixError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut response = (
            StatusCode::BAD_REQUEST,
            [(header::CONTENT_TYPE, TEXT_PLAIN)],
            format!("{}\n", self.0),
        )
            .into_response();
        // Picked up by the request logger
        response.extensions_mut().insert(self.0);
        response
    }
}

/// Health check document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    /// Operation name → endpoint
    pub endpoints: BTreeMap<String, String>,
}

impl HealthResponse {
    pub fn ok() -> Self {
        let mut endpoints: BTreeMap<String, String> = Operation::ALL
            .iter()
            .map(|op| (op.name().to_string(), format!("POST {}", op.path())))
            .collect();
        endpoints.insert("logs".to_string(), "GET /api/logs (SSE)".to_string());

        Self {
            status: "ok".to_string(),
            service: "matrixops".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            endpoints,
        }
    }
}
