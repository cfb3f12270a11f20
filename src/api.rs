//! HTTP API for the report renderer.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::Serialize;
use serde_json::Value;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::cultural::CulturalService;
use crate::models::{Coordinate, CulturalAssessment};

/// Application state shared across handlers
pub struct AppState {
    pub service: Arc<CulturalService>,
}

pub fn router(service: Arc<CulturalService>) -> Router {
    let state = Arc::new(AppState { service });

    Router::new()
        .route("/health", get(health_handler))
        .route("/api/cultural-resources", post(cultural_resources_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn bad_request(message: impl Into<String>) -> ApiError {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
}

/// Health check endpoint
async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

/// Cultural resources assessment for `{ "lat": .., "lng": .. }`.
///
/// Invalid input is rejected before any upstream call. Everything past
/// validation answers 200, degraded if need be.
async fn cultural_resources_handler(
    State(state): State<Arc<AppState>>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<CulturalAssessment>, ApiError> {
    let Json(body) = body.map_err(|e| bad_request(format!("Invalid JSON body: {}", e.body_text())))?;
    let point = parse_coordinate(&body).map_err(|e| bad_request(e))?;

    info!("Cultural resources assessment requested at {}", point);

    Ok(Json(state.service.assess_isolated(point).await))
}

/// Extract and validate `lat`/`lng` from a request body
pub fn parse_coordinate(body: &Value) -> Result<Coordinate, String> {
    let lat = body.get("lat").filter(|v| !v.is_null());
    let lng = body.get("lng").filter(|v| !v.is_null());

    let (Some(lat), Some(lng)) = (lat, lng) else {
        return Err("lat and lng are required".to_string());
    };
    let (Some(lat), Some(lng)) = (lat.as_f64(), lng.as_f64()) else {
        return Err("lat and lng must be numbers".to_string());
    };

    Coordinate::new(lat, lng).map_err(|e| e.to_string())
}
