//! HTTP surface for the pipeline analysis service
//!
//! Thin plumbing around `pipegraph-core`: three routes, a CORS layer
//! for the pipeline editor, request tracing, and a panic boundary that
//! turns any unexpected failure into a 500 instead of a dropped
//! connection.

use std::any::Any;

use anyhow::{Context, Result};
use axum::http::{header, HeaderValue, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use pipegraph_core::{analyze, validate_pipeline, Pipeline, PipelineAnalysis, PipelineError};
use serde::Serialize;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;

pub const SERVICE_NAME: &str = "pipegraph";

const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Response Types
// ============================================================================

#[derive(Serialize)]
struct HealthStatus {
    status: &'static str,
    message: String,
}

#[derive(Serialize)]
struct HealthDetail {
    status: &'static str,
    service: &'static str,
    version: &'static str,
    endpoints: HealthEndpoints,
}

#[derive(Serialize)]
struct HealthEndpoints {
    parse_pipeline: &'static str,
    health: &'static str,
    root: &'static str,
}

#[derive(Serialize)]
struct ErrorResponse {
    /// Error message
    error: String,
}

/// Error surfaced to the HTTP caller: a status plus a message naming
/// the specific violation.
struct ApiError {
    status: StatusCode,
    message: String,
}

impl From<PipelineError> for ApiError {
    fn from(err: PipelineError) -> Self {
        // Every PipelineError variant is a client input defect.
        Self {
            status: StatusCode::BAD_REQUEST,
            message: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorResponse {
                error: self.message,
            }),
        )
            .into_response()
    }
}

// ============================================================================
// Router
// ============================================================================

/// Build the service router with CORS, tracing, and panic boundary.
pub fn router(cors_origin: &str) -> Result<Router> {
    let origin: HeaderValue = cors_origin
        .parse()
        .with_context(|| format!("invalid CORS origin: {}", cors_origin))?;

    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true);

    // TraceLayer logs all HTTP requests with method, path, status, and latency
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_request(DefaultOnRequest::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    Ok(Router::new()
        .route("/", get(read_root))
        .route("/health", get(health_check))
        .route("/pipelines/parse", post(parse_pipeline))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(cors)
        .layer(trace_layer))
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "unknown panic".to_string()
    };
    tracing::error!(%detail, "request handler panicked");

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: format!("internal server error: {}", detail),
        }),
    )
        .into_response()
}

// ============================================================================
// Handlers
// ============================================================================

async fn read_root() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "healthy",
        message: format!("{} is running", SERVICE_NAME),
    })
}

async fn health_check() -> Json<HealthDetail> {
    Json(HealthDetail {
        status: "healthy",
        service: SERVICE_NAME,
        version: VERSION,
        endpoints: HealthEndpoints {
            parse_pipeline: "/pipelines/parse",
            health: "/health",
            root: "/",
        },
    })
}

async fn parse_pipeline(
    Json(pipeline): Json<Pipeline>,
) -> std::result::Result<Json<PipelineAnalysis>, ApiError> {
    tracing::info!(
        num_nodes = pipeline.nodes.len(),
        num_edges = pipeline.edges.len(),
        "received pipeline"
    );

    validate_pipeline(&pipeline)?;

    Ok(Json(analyze(&pipeline)))
}

// ============================================================================
// Tests
// ============================================================================
