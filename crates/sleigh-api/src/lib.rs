//! sleigh-api — JSON read-model API for Sleigh Command.
//!
//! Axum route handlers over the mission aggregator's read model.
//!
//! # Routes
//!
//! | Route | Handler |
//! |---|---|
//! | `GET /api/v1/overview` | Mission overview |
//! | `GET /api/v1/cities` | City list with delivery status |
//! | `GET /api/v1/deliveries` | Delivery queue |
//! | `GET /api/v1/fleet` | Sleigh telemetry + reindeer roster |
//! | `GET /api/v1/weather` | Active weather fronts |
//! | `GET /api/v1/emergencies` | Unresolved emergencies, worst first |
//! | `GET /api/v1/analytics` | Per-country delivery roll-up |
//! | `POST /api/v1/emergencies/{id}/resolve` | Resolve an emergency |
//! | `POST /api/v1/refetch` | Reload the snapshot |

pub mod handlers;
pub mod views;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};

use sleigh_mission::MissionData;
use sleigh_store::SleighStore;

/// Shared state for API handlers.
#[derive(Clone)]
pub struct ApiState {
    pub mission: Arc<MissionData<SleighStore>>,
}

/// Build the API router.
pub fn api_router(state: ApiState) -> Router {
    Router::new()
        .route("/api/v1/overview", get(handlers::overview))
        .route("/api/v1/cities", get(handlers::cities))
        .route("/api/v1/deliveries", get(handlers::deliveries))
        .route("/api/v1/fleet", get(handlers::fleet))
        .route("/api/v1/weather", get(handlers::weather))
        .route("/api/v1/emergencies", get(handlers::emergencies))
        .route("/api/v1/analytics", get(handlers::analytics))
        .route(
            "/api/v1/emergencies/{id}/resolve",
            post(handlers::resolve_emergency),
        )
        .route("/api/v1/refetch", post(handlers::refetch))
        .with_state(state)
}
