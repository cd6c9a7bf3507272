//! WS-02 Verify Gateway - HTTP front door for signature verification.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                    VERIFY GATEWAY (ws-02)                     │
//! ├──────────────────────────────────────────────────────────────┤
//! │   HTTP :3000                                                  │
//! │      │                                                        │
//! │   CatchPanic → CORS → Tracing → BodyLimit                     │
//! │      │                                                        │
//! │   ┌──┴─────────────┬──────────────┬──────────────────────┐   │
//! │   │ GET /          │ GET /health  │ POST /verify-signature│   │
//! │   └────────────────┴──────────────┴──────────┬───────────┘   │
//! └──────────────────────────────────────────────┼───────────────┘
//!                                                │
//!                                   ws-01 SignatureVerificationApi
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use ws_02_verify_gateway::{ApiGatewayService, GatewayConfig};
//!
//! let service = ApiGatewayService::new(GatewayConfig::from_env())?;
//! let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();
//! service.start(shutdown_rx).await?;
//! ```
//!
//! # Responses
//!
//! - 200 with `{isValid, signer, originalMessage}` whether or not the
//!   signature recovers
//! - 400 for missing or non-string fields and malformed bodies
//! - 413 for bodies over `limits.max_request_size`
//! - 404 for unknown routes, 500 for anything unexpected

#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod domain;
pub mod middleware;
pub mod router;
pub mod service;

// Re-exports for public API
pub use domain::config::GatewayConfig;
pub use domain::error::{ApiError, ApiResult, GatewayError};
pub use service::ApiGatewayService;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
