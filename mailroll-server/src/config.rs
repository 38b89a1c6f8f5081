//! Service configuration
//!
//! Built once at process start (see `mailroll serve`) and handed to
//! [`run_server`](crate::run_server). Handlers only ever see the values
//! captured here; nothing reads the environment after bootstrap.

use std::net::SocketAddr;

use axum::http::HeaderValue;

/// Origins allowed to make cross-origin requests unless overridden.
pub const DEFAULT_ALLOWED_ORIGINS: [&str; 8] = [
    "http://localhost:3000",
    "https://localhost:3000",
    "http://theforumuniversity.com",
    "https://theforumuniversity.com",
    "http://www.theforumuniversity.com",
    "https://www.theforumuniversity.com",
    "http://api.theforumuniversity.com",
    "https://api.theforumuniversity.com",
];

/// Default pool size.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid origin '{origin}': {reason}")]
    InvalidOrigin { origin: String, reason: &'static str },

    #[error("allowed origin list is empty")]
    NoOrigins,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Address to bind to (default: 0.0.0.0:8080)
    pub bind_addr: SocketAddr,

    /// PostgreSQL connection string
    pub database_url: String,

    /// Maximum pooled connections
    pub max_connections: u32,

    /// Cross-origin allow-list
    pub allowed_origins: Vec<HeaderValue>,

    /// Serve Swagger UI and the OpenAPI document
    pub api_docs: bool,
}

impl ServiceConfig {
    /// Config with defaults for everything except the connection string.
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            database_url: database_url.into(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            allowed_origins: DEFAULT_ALLOWED_ORIGINS
                .into_iter()
                .map(HeaderValue::from_static)
                .collect(),
            api_docs: true,
        }
    }

    pub fn with_bind_addr(mut self, bind_addr: SocketAddr) -> Self {
        self.bind_addr = bind_addr;
        self
    }

    pub fn with_max_connections(mut self, max_connections: u32) -> Self {
        self.max_connections = max_connections;
        self
    }

    pub fn with_allowed_origins(mut self, origins: Vec<HeaderValue>) -> Self {
        self.allowed_origins = origins;
        self
    }

    pub fn with_api_docs(mut self, enabled: bool) -> Self {
        self.api_docs = enabled;
        self
    }
}

/// Parse a comma-separated origin list (the `ALLOWED_ORIGINS` override).
///
/// Entries are trimmed and blanks skipped. Each remaining entry must be
/// an `http://` or `https://` origin usable as a header value.
pub fn parse_origins(raw: &str) -> Result<Vec<HeaderValue>, ConfigError> {
    let origins = raw
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            if !(entry.starts_with("http://") || entry.starts_with("https://")) {
                return Err(ConfigError::InvalidOrigin {
                    origin: entry.to_owned(),
                    reason: "must start with http:// or https://",
                });
            }
            HeaderValue::from_str(entry.trim_end_matches('/')).map_err(|_| {
                ConfigError::InvalidOrigin {
                    origin: entry.to_owned(),
                    reason: "not a valid header value",
                }
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    if origins.is_empty() {
        return Err(ConfigError::NoOrigins);
    }
    Ok(origins)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn allows(config: &ServiceConfig, origin: &str) -> bool {
        config.allowed_origins.iter().any(|allowed| allowed == origin)
    }

    #[test]
    fn default_config() {
        let config = ServiceConfig::new("postgres://localhost/mailroll");
        assert_eq!(config.bind_addr.port(), 8080);
        assert_eq!(config.max_connections, 5);
        assert_eq!(config.allowed_origins.len(), 8);
        assert!(config.api_docs);
        assert!(allows(&config, "https://www.theforumuniversity.com"));
        assert!(!allows(&config, "https://evil.example"));
    }

    #[test]
    fn parse_origins_trims_and_skips_blanks() {
        let origins = parse_origins(" http://a.test , ,https://b.test/ ").unwrap();
        assert_eq!(origins, vec!["http://a.test", "https://b.test"]);
    }

    #[test]
    fn parse_origins_rejects_missing_scheme() {
        let err = parse_origins("http://a.test,b.test").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidOrigin { ref origin, .. } if origin == "b.test"));
    }

    #[test]
    fn parse_origins_rejects_empty_list() {
        assert!(matches!(parse_origins(" , "), Err(ConfigError::NoOrigins)));
    }

    #[test]
    fn override_replaces_defaults() {
        let config = ServiceConfig::new("postgres://localhost/mailroll")
            .with_allowed_origins(parse_origins("http://only.test").unwrap());
        assert!(allows(&config, "http://only.test"));
        assert!(!allows(&config, "http://localhost:3000"));
    }
}
