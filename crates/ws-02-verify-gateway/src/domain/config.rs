//! Gateway configuration with validation.
//!
//! Defaults can be overridden by a serialized config or by environment
//! variables (`PORT`, `HOST`, `FRONTEND_URL`, `MAX_REQUEST_SIZE`).

use axum::http::{HeaderName, HeaderValue, Method};
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use tracing::warn;

/// Default origin allowed by CORS (the signing frontend).
pub const DEFAULT_FRONTEND_URL: &str = "http://localhost:3000";

/// Main gateway configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// HTTP server configuration
    pub http: HttpConfig,
    /// CORS configuration
    pub cors: CorsConfig,
    /// Request validation limits
    pub limits: LimitsConfig,
}

impl GatewayConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.limits.max_request_size == 0 {
            return Err(ConfigError::InvalidLimit(
                "max_request_size cannot be 0".into(),
            ));
        }

        if self.cors.enabled && self.cors.allowed_origins.is_empty() {
            return Err(ConfigError::Invalid("no CORS origins configured".into()));
        }

        if self.cors.enabled {
            self.cors.check_header_values()?;
        }

        // tower-http refuses wildcards together with credentials
        if self.cors.allow_credentials
            && (self.cors.allowed_origins.iter().any(|o| o == "*")
                || self.cors.allowed_headers.iter().any(|h| h == "*"))
        {
            return Err(ConfigError::Invalid(
                "wildcard CORS origin or header cannot be combined with credentials".into(),
            ));
        }

        Ok(())
    }

    /// Build configuration from defaults plus process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from defaults plus a key lookup.
    ///
    /// Unparseable values are skipped with a warning.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(port) = lookup("PORT") {
            match port.trim().parse::<u16>() {
                Ok(p) => config.http.port = p,
                Err(_) => warn!(value = %port, "Invalid PORT, using default"),
            }
        }

        if let Some(host) = lookup("HOST") {
            match host.trim().parse::<IpAddr>() {
                Ok(h) => config.http.host = h,
                Err(_) => warn!(value = %host, "Invalid HOST, using default"),
            }
        }

        if let Some(origin) = lookup("FRONTEND_URL") {
            let origin = origin.trim();
            if origin.is_empty() {
                warn!("Empty FRONTEND_URL, using default");
            } else {
                config.cors.allowed_origins = vec![origin.to_string()];
            }
        }

        if let Some(size) = lookup("MAX_REQUEST_SIZE") {
            match size.trim().parse::<usize>() {
                Ok(s) if s > 0 => config.limits.max_request_size = s,
                _ => warn!(value = %size, "Invalid MAX_REQUEST_SIZE, using default"),
            }
        }

        config
    }

    /// Get HTTP server bind address
    pub fn http_addr(&self) -> SocketAddr {
        SocketAddr::new(self.http.host, self.http.port)
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Bind address
    pub host: IpAddr,
    /// Port (default: 3000)
    pub port: u16,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 3000,
        }
    }
}

/// Request limits configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Max request body size in bytes (default: 1MB)
    pub max_request_size: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_request_size: 1024 * 1024,
        }
    }
}

/// CORS configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    /// Enable CORS
    pub enabled: bool,
    /// Allowed origins ("*" for all)
    pub allowed_origins: Vec<String>,
    /// Allowed methods
    pub allowed_methods: Vec<String>,
    /// Allowed headers
    pub allowed_headers: Vec<String>,
    /// Max age for preflight cache
    pub max_age: u64,
    /// Allow credentials
    pub allow_credentials: bool,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            allowed_origins: vec![DEFAULT_FRONTEND_URL.to_string()],
            allowed_methods: vec!["GET".to_string(), "POST".to_string(), "OPTIONS".to_string()],
            allowed_headers: vec!["Content-Type".to_string(), "Authorization".to_string()],
            max_age: 86400, // 24 hours
            allow_credentials: true,
        }
    }
}

impl CorsConfig {
    /// Every origin, method and header must be usable as an HTTP header value.
    fn check_header_values(&self) -> Result<(), ConfigError> {
        let invalid = |kind: &str, value: &str| {
            ConfigError::Invalid(format!("invalid CORS {kind}: {value:?}"))
        };

        for origin in self.allowed_origins.iter().filter(|o| *o != "*") {
            HeaderValue::from_str(origin).map_err(|_| invalid("origin", origin))?;
        }
        for method in &self.allowed_methods {
            Method::from_bytes(method.as_bytes()).map_err(|_| invalid("method", method))?;
        }
        for header in self.allowed_headers.iter().filter(|h| *h != "*") {
            HeaderName::from_bytes(header.as_bytes()).map_err(|_| invalid("header", header))?;
        }
        Ok(())
    }
}

/// Configuration errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Invalid size limit
    #[error("invalid limit: {0}")]
    InvalidLimit(String),
    /// General configuration error
    #[error("invalid configuration: {0}")]
    Invalid(String),
}
