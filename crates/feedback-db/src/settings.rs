/// Every environment input the storage layer looks at, captured once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbSettings {
    /// Deployment environment (`development`, `production`, ...).
    pub environment: String,
    /// Process phase; `build` marks an image/asset build with no store around.
    pub phase: Option<String>,
    /// Set by IRSA when running on EKS.
    pub aws_role_arn: Option<String>,
    /// Set by IRSA when running on EKS.
    pub aws_web_identity_token_file: Option<String>,
    pub aws_region: String,
    /// Secrets Manager secret holding `{"MONGODB_URI": "..."}`.
    pub secret_name: Option<String>,
    pub mongodb_uri: Option<String>,
    /// Insert sample records into an empty collection on first connect.
    pub seed_samples: bool,
}

impl Default for DbSettings {
    fn default() -> Self {
        Self {
            environment: "development".into(),
            phase: None,
            aws_role_arn: None,
            aws_web_identity_token_file: None,
            aws_region: "us-east-1".into(),
            secret_name: None,
            mongodb_uri: None,
            seed_samples: false,
        }
    }
}

impl DbSettings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        Self {
            environment: get("FEEDBACKHUB_ENV").unwrap_or(defaults.environment),
            phase: get("FEEDBACKHUB_PHASE"),
            aws_role_arn: get("AWS_ROLE_ARN"),
            aws_web_identity_token_file: get("AWS_WEB_IDENTITY_TOKEN_FILE"),
            aws_region: get("AWS_REGION").unwrap_or(defaults.aws_region),
            secret_name: get("FEEDBACKHUB_SECRET_NAME"),
            mongodb_uri: get("MONGODB_URI"),
            seed_samples: get("FEEDBACKHUB_SEED_SAMPLES")
                .map(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(false),
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}
