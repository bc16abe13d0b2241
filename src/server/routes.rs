//! HTTP API routes
//!
//! Defines the REST API endpoints for the server.

use crate::boundary::PreferenceRegion;
use crate::error::Error;
use crate::server::state::AppState;

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Create the API router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/location", post(location_handler))
        .route("/api/regions", get(regions_handler))
        .route("/api/status", get(status_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Location request body
#[derive(Debug, Default, Deserialize)]
pub struct LocationRequest {
    /// Interest regions; empty means global sampling
    #[serde(default)]
    pub preferences: Vec<PreferenceRegion>,
}

/// API error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiError {
    pub error: String,
    pub code: String,
    #[serde(skip)]
    status: Option<u16>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self
            .status
            .and_then(|s| StatusCode::from_u16(s).ok())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        let (code, status) = match &err {
            // A broken boundary index is an operational failure, not a
            // "try again" condition
            Error::IndexUnavailable(_) => ("INDEX_UNAVAILABLE", 503),
            Error::InvalidBounds(_) => ("INVALID_BOUNDS", 400),
            Error::DegenerateGeometry(_) => ("DEGENERATE_GEOMETRY", 400),
            Error::Oracle(_) => ("ORACLE_ERROR", 502),
            Error::Config(_) => ("CONFIG_ERROR", 500),
            _ => ("INTERNAL_ERROR", 500),
        };
        ApiError {
            error: err.to_string(),
            code: code.to_string(),
            status: Some(status),
        }
    }
}

/// Generate a validated location
///
/// POST /api/location
async fn location_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<LocationRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let location = state.pipeline.generate(&request.preferences).await?;
    Ok(Json(location))
}

/// Boundary index statistics
///
/// GET /api/regions
async fn regions_handler(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let stats = state.pipeline.index().stats().await?;
    Ok(Json(stats))
}

/// Status response
#[derive(Debug, Serialize)]
struct StatusResponse {
    version: &'static str,
    oracle_configured: bool,
    dataset_dir: String,
}

/// Server status
///
/// GET /api/status
async fn status_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let dataset_dir = state
        .config
        .dataset_dir()
        .map(|p| p.display().to_string())
        .unwrap_or_default();

    Json(StatusResponse {
        version: env!("CARGO_PKG_VERSION"),
        oracle_configured: !state.config.oracle.api_key.is_empty(),
        dataset_dir,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn test_router(data_dir: &str) -> Router {
        let mut config = Config::default();
        config.dataset.data_dir = data_dir.to_string();
        let state = Arc::new(AppState::new(config).unwrap());
        create_router(state)
    }

    #[tokio::test]
    async fn test_status_endpoint() {
        let app = test_router("/tmp/nonexistent-dataset-dir");

        let response = app
            .oneshot(
                axum::http::Request::builder()
                    .uri("/api/status")
                    .body(axum::body::Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let status: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(status["version"], env!("CARGO_PKG_VERSION"));
        assert_eq!(status["oracle_configured"], false);
    }

    #[tokio::test]
    async fn test_location_endpoint_rejects_invalid_bounds() {
        let app = test_router("/tmp/nonexistent-dataset-dir");

        let body = r#"{"preferences": [{"label": "bad", "north": -10.0, "south": 10.0, "east": 5.0, "west": 0.0}]}"#;
        let response = app
            .oneshot(
                axum::http::Request::builder()
                    .method("POST")
                    .uri("/api/location")
                    .header("content-type", "application/json")
                    .body(axum::body::Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let error: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.code, "INVALID_BOUNDS");
    }

    #[tokio::test]
    async fn test_world_sampling_without_dataset_is_unavailable() {
        let app = test_router("/tmp/nonexistent-dataset-dir");

        let response = app
            .oneshot(
                axum::http::Request::builder()
                    .method("POST")
                    .uri("/api/location")
                    .header("content-type", "application/json")
                    .body(axum::body::Body::from(r#"{"preferences": []}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
