//! HTTP Server for the matrix API.
//!
//! # API Endpoints
//!
//! | Method | Path                      | Description                      |
//! |--------|---------------------------|----------------------------------|
//! | GET    | `/health`                 | Health check                     |
//! | POST   | `/echo`                   | Matrix back as CSV               |
//! | POST   | `/invert` (`/transpose`)  | Transposed matrix as CSV         |
//! | POST   | `/flatten`                | All cells on one line            |
//! | POST   | `/add` (`/sum`)           | Sum of all cells                 |
//! | POST   | `/mul` (`/multiply`)      | Product of all cells             |
//! | GET    | `/api/logs`               | SSE stream of request logs       |
//!
//! Every operation endpoint expects a multipart form with the CSV in the
//! `file` field.

use axum::{
    body::Bytes,
    extract::{multipart::MultipartRejection, ConnectInfo, DefaultBodyLimit, Multipart, Request},
    http::{header, Method},
    middleware::{self, Next},
    response::{sse::Event, Json, Response, Sse},
    routing::{get, post},
    Router,
};
use futures::stream::Stream;
use std::{convert::Infallible, net::SocketAddr, time::Duration};
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt as _;
use tower_http::cors::CorsLayer;
use uuid::Uuid;

use super::logs::{log_info, LogEntry, LOG_BROADCASTER};
use super::types::{ApiError, HealthResponse, TextResponse};
use crate::config::ServerConfig;
use crate::error::{MatrixError, ServerError, ServerResult};
use crate::transform::{run_bytes, Operation};

/// Multipart field carrying the CSV upload.
pub const FILE_FIELD: &str = "file";

/// Build the application router.
pub fn create_router(config: &ServerConfig) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .expose_headers([header::CONTENT_TYPE]);

    let mut app = Router::new()
        .route("/", get(health))
        .route("/health", get(health))
        .route("/api/logs", get(sse_logs));

    for op in Operation::ALL {
        let handler = move |multipart: Result<Multipart, MultipartRejection>| {
            run_operation(op, multipart)
        };
        app = app.route(op.path(), post(handler));
        if let Some(alias) = op.alias() {
            app = app.route(alias, post(handler));
        }
    }

    app.layer(DefaultBodyLimit::max(config.max_upload_bytes))
        .layer(middleware::from_fn(log_requests))
        .layer(cors)
}

/// Start the HTTP server
pub async fn start_server(config: ServerConfig) -> ServerResult<()> {
    let addr = config.socket_addr()?;
    let app = create_router(&config);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind { addr, source })?;

    println!("🚀 matrixops server running on http://{}", addr);
    for op in Operation::ALL {
        println!("   POST {:<9} - {}", op.path(), op.name());
    }
    println!("   GET  /api/logs  - SSE log stream");
    println!("   GET  /health    - Health check");
    println!();
    log_info(format!(
        "Accepting uploads up to {} bytes in field '{}'",
        config.max_upload_bytes, FILE_FIELD
    ));

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    log_info("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    // If the handler cannot be installed, run until killed
    if tokio::signal::ctrl_c().await.is_err() {
        std::future::pending::<()>().await;
    }
}

/// Health check endpoint
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}

/// SSE endpoint for real-time log streaming
async fn sse_logs() -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let rx = LOG_BROADCASTER.subscribe();

    let stream = BroadcastStream::new(rx).filter_map(|result| match result {
        Ok(entry) => {
            let json = serde_json::to_string(&entry).ok()?;
            Some(Ok(Event::default().data(json)))
        }
        Err(_) => None,
    });

    Sse::new(stream).keep_alive(
        axum::response::sse::KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("keep-alive"),
    )
}

/// Upload a matrix and run one operation on it
async fn run_operation(
    op: Operation,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<TextResponse, ApiError> {
    let bytes = read_file_field(multipart).await?;
    let output = run_bytes(&bytes, op)?;
    Ok(TextResponse(output))
}

/// Pull the bytes of the `file` field out of a multipart body.
///
/// A request that is not multipart, is cut short, or lacks the field all
/// count as a missing file.
async fn read_file_field(
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Bytes, MatrixError> {
    let mut multipart = multipart.map_err(|e| MatrixError::MissingFile(e.body_text()))?;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| MatrixError::MissingFile(e.body_text()))?
    {
        if field.name() == Some(FILE_FIELD) {
            return field
                .bytes()
                .await
                .map_err(|e| MatrixError::MissingFile(e.body_text()));
        }
    }

    Err(MatrixError::MissingFile("no such file".to_string()))
}

/// Log every request and its outcome.
async fn log_requests(req: Request, next: Next) -> Response {
    let request_id = Uuid::new_v4().to_string();
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let remote = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|info| info.0.to_string())
        .unwrap_or_else(|| "unknown".to_string());

    LOG_BROADCASTER.log(
        LogEntry::info(format!("Request: {} {} from {}", method, path, remote))
            .with_request_id(&request_id),
    );

    let response = next.run(req).await;
    let status = response.status();

    let entry = match response.extensions().get::<MatrixError>() {
        Some(err) => LogEntry::warning(format!(
            "{} {} -> {} ({}): {}",
            method,
            path,
            status.as_u16(),
            err.kind(),
            err
        )),
        None if status.is_client_error() => {
            LogEntry::warning(format!("{} {} -> {}", method, path, status.as_u16()))
        }
        None if status.is_server_error() => {
            LogEntry::error(format!("{} {} -> {}", method, path, status.as_u16()))
        }
        None => LogEntry::success(format!("{} {} -> {}", method, path, status.as_u16())),
    };
    LOG_BROADCASTER.log(entry.with_indent(1).with_request_id(request_id));

    response
}
