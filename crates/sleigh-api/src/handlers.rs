//! JSON API handlers.
//!
//! Each handler reads the aggregator's current snapshot and shapes it
//! into a view; the resolve-emergency handler is the single mutation.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use sleigh_store::StoreError;

use crate::ApiState;
use crate::views::*;

/// Response wrapper for consistent API format.
#[derive(serde::Serialize)]
struct ApiResponse<T: serde::Serialize> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<T: serde::Serialize> ApiResponse<T> {
    fn ok(data: T) -> Json<Self> {
        Json(Self {
            success: true,
            data: Some(data),
            error: None,
        })
    }
}

fn error_response(msg: &str, status: StatusCode) -> impl IntoResponse {
    (
        status,
        Json(ApiResponse::<()> {
            success: false,
            data: None,
            error: Some(msg.to_string()),
        }),
    )
}

/// GET /api/v1/overview
pub async fn overview(State(state): State<ApiState>) -> impl IntoResponse {
    let snapshot = state.mission.snapshot().await;
    ApiResponse::ok(OverviewView::build(&snapshot))
}

/// GET /api/v1/cities
pub async fn cities(State(state): State<ApiState>) -> impl IntoResponse {
    let snapshot = state.mission.snapshot().await;
    ApiResponse::ok(CityRow::build(&snapshot))
}

/// GET /api/v1/deliveries
pub async fn deliveries(State(state): State<ApiState>) -> impl IntoResponse {
    let snapshot = state.mission.snapshot().await;
    ApiResponse::ok(DeliveryRow::build(&snapshot))
}

/// GET /api/v1/fleet
pub async fn fleet(State(state): State<ApiState>) -> impl IntoResponse {
    let snapshot = state.mission.snapshot().await;
    ApiResponse::ok(FleetView::build(&snapshot))
}

/// GET /api/v1/weather
pub async fn weather(State(state): State<ApiState>) -> impl IntoResponse {
    let snapshot = state.mission.snapshot().await;
    ApiResponse::ok(WeatherRow::build(&snapshot))
}

/// GET /api/v1/emergencies
pub async fn emergencies(State(state): State<ApiState>) -> impl IntoResponse {
    let snapshot = state.mission.snapshot().await;
    ApiResponse::ok(EmergencyRow::build(&snapshot))
}

/// GET /api/v1/analytics
pub async fn analytics(State(state): State<ApiState>) -> impl IntoResponse {
    let snapshot = state.mission.snapshot().await;
    ApiResponse::ok(AnalyticsView::build(&snapshot))
}

/// POST /api/v1/emergencies/{id}/resolve
pub async fn resolve_emergency(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    match state.mission.resolve_emergency(&id).await {
        Ok(()) => ApiResponse::ok("resolved").into_response(),
        Err(StoreError::NotFound(_)) => {
            error_response("emergency not found", StatusCode::NOT_FOUND).into_response()
        }
        Err(e) => error_response(&e.to_string(), StatusCode::BAD_GATEWAY).into_response(),
    }
}

/// POST /api/v1/refetch
pub async fn refetch(State(state): State<ApiState>) -> impl IntoResponse {
    state.mission.refetch().await;
    let snapshot = state.mission.snapshot().await;
    match snapshot.error {
        None => ApiResponse::ok("reloaded").into_response(),
        Some(message) => error_response(&message, StatusCode::BAD_GATEWAY).into_response(),
    }
}
