use axum::{Router, routing::get};

use crate::feedback::{create_feedback, list_feedback};
use crate::health::health;
use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/feedback", get(list_feedback).post(create_feedback))
        .route("/api/health", get(health))
        .with_state(state)
}
