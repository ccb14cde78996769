use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};

use feedback_types::api::{HealthResponse, HealthStatus, StoreStatus};

use crate::state::AppState;

pub const SERVICE_NAME: &str = "feedbackhub";

/// GET /api/health — 503 when the store cannot be reached.
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let database = state.db.health().await;

    let (code, status) = match database.status {
        StoreStatus::BuildTimeSafe | StoreStatus::Connected => {
            (StatusCode::OK, HealthStatus::Healthy)
        }
        StoreStatus::Disconnected => (StatusCode::SERVICE_UNAVAILABLE, HealthStatus::Degraded),
    };

    (
        code,
        Json(HealthResponse {
            status,
            timestamp: chrono::Utc::now(),
            service: SERVICE_NAME.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            database,
        }),
    )
}
