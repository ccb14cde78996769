use std::net::SocketAddr;
use std::path::PathBuf;

/// Listener and asset settings for the binary. Storage settings live in
/// `feedback_db::DbSettings`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Built front-end assets, served at `/` when set.
    pub static_dir: Option<PathBuf>,
}

impl ServerConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("FEEDBACKHUB_HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port: u16 = lookup("FEEDBACKHUB_PORT")
            .unwrap_or_else(|| "3000".into())
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid FEEDBACKHUB_PORT: {}", e))?;
        let static_dir = lookup("FEEDBACKHUB_STATIC_DIR")
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);

        Ok(Self {
            host,
            port,
            static_dir,
        })
    }

    pub fn addr(&self) -> anyhow::Result<SocketAddr> {
        Ok(format!("{}:{}", self.host, self.port).parse()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = ServerConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config.addr().unwrap(), "0.0.0.0:3000".parse().unwrap());
        assert!(config.static_dir.is_none());
    }

    #[test]
    fn overrides() {
        let config = ServerConfig::from_lookup(|key| match key {
            "FEEDBACKHUB_HOST" => Some("127.0.0.1".into()),
            "FEEDBACKHUB_PORT" => Some("8080".into()),
            "FEEDBACKHUB_STATIC_DIR" => Some("./public".into()),
            _ => None,
        })
        .unwrap();
        assert_eq!(config.addr().unwrap(), "127.0.0.1:8080".parse().unwrap());
        assert_eq!(config.static_dir, Some(PathBuf::from("./public")));
    }

    #[test]
    fn bad_port_is_an_error() {
        let result = ServerConfig::from_lookup(|key| {
            (key == "FEEDBACKHUB_PORT").then(|| "not-a-port".to_string())
        });
        assert!(result.is_err());
    }
}
