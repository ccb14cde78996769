use aws_config::{BehaviorVersion, Region};
use aws_sdk_secretsmanager::error::DisplayErrorContext;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, error};

use crate::settings::DbSettings;

#[derive(Debug, Error)]
pub enum SecretsError {
    #[error("FEEDBACKHUB_SECRET_NAME environment variable not set")]
    MissingSecretName,

    #[error("could not retrieve secret {name}: {reason}")]
    Retrieve { name: String, reason: String },

    #[error("secret {0} has no string value")]
    NoStringValue(String),

    #[error("invalid secret format, expected JSON with a MONGODB_URI field: {0}")]
    InvalidFormat(#[from] serde_json::Error),

    #[error("MONGODB_URI not found in secret data")]
    MissingUri,
}

#[derive(Deserialize)]
struct SecretPayload {
    #[serde(rename = "MONGODB_URI")]
    mongodb_uri: Option<String>,
}

/// Read the MongoDB URI from the Secrets Manager secret named in the settings.
pub async fn fetch_mongodb_uri(settings: &DbSettings) -> Result<String, SecretsError> {
    let name = settings
        .secret_name
        .as_deref()
        .ok_or(SecretsError::MissingSecretName)?;

    let secret = get_secret(&settings.aws_region, name).await?;
    parse_secret(&secret)
}

async fn get_secret(region: &str, name: &str) -> Result<String, SecretsError> {
    debug!("Fetching secret {} in {}", name, region);

    let config = aws_config::defaults(BehaviorVersion::latest())
        .region(Region::new(region.to_string()))
        .load()
        .await;
    let client = aws_sdk_secretsmanager::Client::new(&config);

    let output = client
        .get_secret_value()
        .secret_id(name)
        .send()
        .await
        .map_err(|e| {
            let reason = DisplayErrorContext(&e).to_string();
            error!("Failed to retrieve secret {}: {}", name, reason);
            SecretsError::Retrieve {
                name: name.to_string(),
                reason,
            }
        })?;

    output
        .secret_string()
        .map(str::to_string)
        .ok_or_else(|| SecretsError::NoStringValue(name.to_string()))
}

/// Extract `MONGODB_URI` from a JSON secret body.
pub fn parse_secret(secret: &str) -> Result<String, SecretsError> {
    let payload: SecretPayload = serde_json::from_str(secret)?;
    payload
        .mongodb_uri
        .filter(|uri| !uri.trim().is_empty())
        .ok_or(SecretsError::MissingUri)
}
