use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// -- Envelope --

/// Every feedback endpoint answers with this envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

// -- Feedback --

/// Body of `POST /api/feedback`. Fields are optional here so that a missing
/// field is reported as a validation failure, not a decode error.
#[derive(Debug, Default, Deserialize)]
pub struct CreateFeedbackRequest {
    pub name: Option<String>,
    pub message: Option<String>,
}

// -- Health --

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StoreStatus {
    BuildTimeSafe,
    Connected,
    Disconnected,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseHealth {
    pub status: StoreStatus,
    pub environment: String,
    pub database: String,
    pub user: String,
    pub cluster: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub timestamp: DateTime<Utc>,
    pub service: String,
    pub version: String,
    pub database: DatabaseHealth,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn error_envelope_omits_data() {
        let body = serde_json::to_value(ApiResponse::<()>::err("nope")).unwrap();
        assert_eq!(body, json!({ "success": false, "error": "nope" }));
    }

    #[test]
    fn missing_fields_decode_as_none() {
        let req: CreateFeedbackRequest = serde_json::from_str(r#"{"name":"Ada"}"#).unwrap();
        assert_eq!(req.name.as_deref(), Some("Ada"));
        assert!(req.message.is_none());
    }

    #[test]
    fn store_status_is_kebab_case() {
        let value = serde_json::to_value(StoreStatus::BuildTimeSafe).unwrap();
        assert_eq!(value, json!("build-time-safe"));
    }
}
