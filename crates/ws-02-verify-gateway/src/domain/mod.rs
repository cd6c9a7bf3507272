//! Domain types for the verification gateway.
//!
//! Configuration and error handling. No I/O.

pub mod config;
pub mod error;

// Re-exports for convenience
pub use config::{ConfigError, CorsConfig, GatewayConfig, HttpConfig, LimitsConfig};
pub use error::{ApiError, ApiResult, GatewayError};
