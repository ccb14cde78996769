use std::fmt;

use tracing::{info, warn};

use crate::secrets;
use crate::settings::DbSettings;

pub const DEFAULT_DATABASE: &str = "feedbackhub";

/// Default for local development, where the store runs next to the app container.
pub const LOCAL_DEFAULT_URI: &str = "mongodb://host.docker.internal:27017/feedbackhub";

/// Last resort on AWS when the secret cannot be read and no override exists.
pub const AWS_FALLBACK_URI: &str = "mongodb://localhost:27017/feedbackhub";

/// Which backing store is active for this process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionStrategy {
    /// Image/asset build: no store is reachable, writes go to memory.
    BuildTimeSafe,
    /// MongoDB addressed by `MONGODB_URI` or the local default.
    LocalMongo,
    /// MongoDB whose URI lives in AWS Secrets Manager.
    AwsSecretsManager,
}

impl ConnectionStrategy {
    pub fn resolve(settings: &DbSettings) -> Self {
        let build_phase = settings.phase.as_deref() == Some("build");

        if settings.is_production() && build_phase && settings.aws_role_arn.is_none() {
            return Self::BuildTimeSafe;
        }

        if settings.aws_role_arn.is_some()
            && settings.aws_web_identity_token_file.is_some()
            && settings.is_production()
        {
            return Self::AwsSecretsManager;
        }

        Self::LocalMongo
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::BuildTimeSafe => "build-time-safe",
            Self::LocalMongo => "local-mongodb",
            Self::AwsSecretsManager => "aws-secrets-manager",
        }
    }

    pub fn cluster(self) -> &'static str {
        match self {
            Self::BuildTimeSafe => "build-time",
            Self::LocalMongo => "local",
            Self::AwsSecretsManager => "aws",
        }
    }
}

impl fmt::Display for ConnectionStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Reportable view of the active configuration. Never carries credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MongoConfig {
    pub uri: String,
    pub database: String,
    pub username: String,
    pub environment: String,
    pub strategy: ConnectionStrategy,
}

impl MongoConfig {
    pub fn describe(settings: &DbSettings, strategy: ConnectionStrategy) -> Self {
        let (uri, username, environment) = match strategy {
            ConnectionStrategy::BuildTimeSafe => {
                ("build-time-dummy".to_string(), "build-time", "build".to_string())
            }
            ConnectionStrategy::LocalMongo => (
                redact_uri(settings.mongodb_uri.as_deref().unwrap_or(LOCAL_DEFAULT_URI)),
                "from-uri",
                settings.environment.clone(),
            ),
            ConnectionStrategy::AwsSecretsManager => (
                "From AWS Secrets Manager".to_string(),
                "from-secrets-manager",
                settings.environment.clone(),
            ),
        };

        Self {
            uri,
            database: DEFAULT_DATABASE.to_string(),
            username: username.to_string(),
            environment,
            strategy,
        }
    }

    pub fn cluster(&self) -> &'static str {
        self.strategy.cluster()
    }
}

/// Resolve the connection URI for a networked strategy.
///
/// Returns `None` for [`ConnectionStrategy::BuildTimeSafe`], which never connects.
pub async fn resolve_uri(settings: &DbSettings, strategy: ConnectionStrategy) -> Option<String> {
    match strategy {
        ConnectionStrategy::BuildTimeSafe => None,
        ConnectionStrategy::LocalMongo => {
            if let Some(uri) = &settings.mongodb_uri {
                info!("Using MONGODB_URI from environment (local environment)");
                Some(uri.clone())
            } else {
                info!("Using local MongoDB default ({})", redact_uri(LOCAL_DEFAULT_URI));
                Some(LOCAL_DEFAULT_URI.to_string())
            }
        }
        ConnectionStrategy::AwsSecretsManager => match secrets::fetch_mongodb_uri(settings).await {
            Ok(uri) => {
                info!("Retrieved MongoDB URI from AWS Secrets Manager");
                Some(uri)
            }
            Err(e) => {
                warn!("Secrets Manager lookup failed: {}", e);
                Some(aws_fallback_uri(settings))
            }
        },
    }
}

fn aws_fallback_uri(settings: &DbSettings) -> String {
    match &settings.mongodb_uri {
        Some(uri) => {
            warn!("Falling back to MONGODB_URI (AWS environment)");
            uri.clone()
        }
        None => {
            warn!("Falling back to default localhost URI (AWS environment)");
            AWS_FALLBACK_URI.to_string()
        }
    }
}

/// Mask the password part of a connection string's userinfo.
pub fn redact_uri(uri: &str) -> String {
    let Some(scheme_end) = uri.find("://").map(|i| i + 3) else {
        return uri.to_string();
    };
    let rest = &uri[scheme_end..];
    let authority_end = rest.find('/').unwrap_or(rest.len());
    let Some(at) = rest[..authority_end].rfind('@') else {
        return uri.to_string();
    };

    let userinfo = &rest[..at];
    let user = userinfo.split(':').next().unwrap_or_default();
    if user.len() == userinfo.len() {
        return uri.to_string();
    }

    format!("{}{}:***{}", &uri[..scheme_end], user, &rest[at..])
}
