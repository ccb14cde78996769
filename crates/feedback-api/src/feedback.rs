use axum::{Json, body::Bytes, extract::State, http::StatusCode, response::IntoResponse};
use tracing::info;

use feedback_types::api::{ApiResponse, CreateFeedbackRequest};
use feedback_types::models::Feedback;
use feedback_types::validation::NewFeedback;

use crate::error::ApiError;
use crate::state::AppState;

/// GET /api/feedback — most recent records, newest first.
pub async fn list_feedback(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Feedback>>>, ApiError> {
    let feedback = state
        .db
        .list_recent(state.page_size)
        .await
        .map_err(ApiError::List)?;

    Ok(Json(ApiResponse::ok(feedback)))
}

/// POST /api/feedback — store a record; the server assigns id and timestamp.
///
/// The body is decoded as JSON whatever its `Content-Type`.
pub async fn create_feedback(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let req: CreateFeedbackRequest =
        serde_json::from_slice(&body).map_err(|e| ApiError::InvalidInput(e.to_string()))?;
    let new = NewFeedback::parse(req.name.as_deref(), req.message.as_deref())?;

    let feedback = state
        .db
        .insert_feedback(&new)
        .await
        .map_err(ApiError::Create)?;

    info!("Feedback {} created", feedback.id);
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(feedback))))
}
