//! HTTP server mode for REST access to the dataset

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::ServerSettings;
use crate::error::{Error, Result};
use crate::service::{DatasetService, QueryParams};

const BANNER: &str = "Dataset query API is running. Use /schema and /data endpoints.";

/// App state shared across handlers
type AppState = Arc<DatasetService>;

/// Error body
#[derive(Debug, Serialize)]
struct ApiResponse {
    success: bool,
    error: String,
}

impl ApiResponse {
    fn error(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            error: msg.into(),
        }
    }
}

/// Failure surfaced by a handler
#[derive(Debug)]
struct ApiError(Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = status_for(&self.0);
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self.0);
        } else {
            tracing::debug!("Request rejected: {}", self.0);
        }
        (status, Json(ApiResponse::error(self.0.to_string()))).into_response()
    }
}

type ApiResult<T> = std::result::Result<Json<T>, ApiError>;

/// HTTP status for a pipeline error
fn status_for(err: &Error) -> StatusCode {
    match err {
        e if e.is_client_error() => StatusCode::BAD_REQUEST,
        e if e.is_data_source() => StatusCode::BAD_GATEWAY,
        Error::EmptyDataset => StatusCode::SERVICE_UNAVAILABLE,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Parse an optional JSON request body; an empty body means no parameters
fn parse_params(body: &[u8]) -> Result<QueryParams> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(QueryParams::default());
    }
    serde_json::from_slice(body).map_err(|e| Error::invalid_query(e.to_string()))
}

/// Build the API router over `service`
pub fn router(service: Arc<DatasetService>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(banner))
        .route("/health", get(health))
        .route("/schema", get(schema))
        .route("/data", post(data))
        .route("/dataWithPagination", post(data_with_pagination))
        .route("/dataWithBasicSorting", post(data_with_sorting))
        .route("/count", get(count))
        .route("/countWithFilter", post(count_with_filter))
        .route("/distinct/:field", get(distinct))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(service)
}

/// Start the HTTP server
pub async fn serve(service: Arc<DatasetService>, settings: &ServerSettings) -> Result<()> {
    let addr = settings.bind_address();
    let source = service.describe_source();
    let app = router(service);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| Error::config(format!("Failed to bind to {addr}: {e}")))?;

    tracing::info!("Starting HTTP server on http://{} serving {}", addr, source);

    axum::serve(listener, app)
        .await
        .map_err(|e| Error::config(format!("Server error: {e}")))?;

    Ok(())
}

async fn banner() -> &'static str {
    BANNER
}

async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

async fn schema(State(service): State<AppState>) -> ApiResult<crate::schema::Schema> {
    Ok(Json(service.schema().await?))
}

async fn data(
    State(service): State<AppState>,
    body: Bytes,
) -> ApiResult<Vec<crate::normalize::NormalizedRecord>> {
    let params = parse_params(&body)?;
    Ok(Json(service.data(params.filter.as_ref()).await?))
}

async fn data_with_pagination(
    State(service): State<AppState>,
    body: Bytes,
) -> ApiResult<Vec<crate::normalize::NormalizedRecord>> {
    let params = parse_params(&body)?;
    let rows = service
        .data_paginated(params.filter.as_ref(), params.limit, params.offset)
        .await?;
    Ok(Json(rows))
}

async fn data_with_sorting(
    State(service): State<AppState>,
    body: Bytes,
) -> ApiResult<Vec<crate::normalize::NormalizedRecord>> {
    let params = parse_params(&body)?;
    let rows = service
        .data_sorted(
            params.filter.as_ref(),
            params.order_by.as_deref(),
            params.direction,
        )
        .await?;
    Ok(Json(rows))
}

async fn count(State(service): State<AppState>) -> ApiResult<usize> {
    Ok(Json(service.count().await?))
}

async fn count_with_filter(State(service): State<AppState>, body: Bytes) -> ApiResult<usize> {
    let params = parse_params(&body)?;
    Ok(Json(service.count_filtered(params.filter.as_ref()).await?))
}

async fn distinct(
    State(service): State<AppState>,
    Path(field): Path<String>,
) -> ApiResult<Vec<serde_json::Value>> {
    Ok(Json(service.distinct(&field).await?))
}
