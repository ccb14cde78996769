use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use feedback_db::DbError;
use feedback_types::api::ApiResponse;
use feedback_types::validation::ValidationError;
use thiserror::Error;
use tracing::{debug, error};

/// Handler failures. The display text is what clients see in `error`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Name and message are required")]
    InvalidInput(String),

    #[error("Failed to connect to database")]
    List(#[source] DbError),

    #[error("Failed to create feedback")]
    Create(#[source] DbError),
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::InvalidInput(e.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::InvalidInput(reason) => {
                debug!("Rejected feedback input: {}", reason);
                StatusCode::BAD_REQUEST
            }
            Self::List(e) => {
                error!("Database connection failed: {}", e);
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::Create(e) => {
                error!("Error creating feedback: {}", e);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (status, Json(ApiResponse::<()>::err(self.to_string()))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn validation_error_is_400() {
        let err = ApiError::from(ValidationError::Empty { field: "name" });
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "Name and message are required");
    }

    #[tokio::test]
    async fn storage_errors_are_500_and_generic() {
        let err = ApiError::Create(DbError::Unavailable("socket closed".into()));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["error"], "Failed to create feedback");
    }
}
