//! Verification gateway service - main entry point.
//!
//! Builds the HTTP router and runs it until a shutdown signal arrives.

use crate::domain::config::GatewayConfig;
use crate::domain::error::{ApiError, GatewayError};
use crate::middleware::{create_cors_layer, TracingLayer};
use crate::router::{health_check, not_found, root, verify_signature, AppState};
use axum::extract::DefaultBodyLimit;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use std::any::Any;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;
use tracing::{error, info};
use ws_01_signature_verification::{SignatureVerificationApi, SignatureVerificationService};

/// Verification gateway service state
pub struct ApiGatewayService {
    config: GatewayConfig,
    verifier: Arc<dyn SignatureVerificationApi>,
}

impl ApiGatewayService {
    /// Create a gateway backed by the k256 signature codec
    pub fn new(config: GatewayConfig) -> Result<Self, GatewayError> {
        Self::with_verifier(config, Arc::new(SignatureVerificationService::default()))
    }

    /// Create a gateway around an arbitrary verifier
    pub fn with_verifier(
        config: GatewayConfig,
        verifier: Arc<dyn SignatureVerificationApi>,
    ) -> Result<Self, GatewayError> {
        config
            .validate()
            .map_err(|e| GatewayError::Config(e.to_string()))?;

        Ok(Self { config, verifier })
    }

    /// Active configuration
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Bind the configured HTTP address
    pub async fn bind(&self) -> Result<TcpListener, GatewayError> {
        let addr = self.config.http_addr();
        TcpListener::bind(addr)
            .await
            .map_err(|e| GatewayError::Bind(format!("{addr}: {e}")))
    }

    /// Bind the configured address and serve until `shutdown` fires
    pub async fn start(&self, shutdown: oneshot::Receiver<()>) -> Result<(), GatewayError> {
        let listener = self.bind().await?;
        self.serve(listener, shutdown).await
    }

    /// Serve on an already-bound listener until `shutdown` fires.
    ///
    /// In-flight requests are allowed to finish.
    pub async fn serve(
        &self,
        listener: TcpListener,
        shutdown: oneshot::Receiver<()>,
    ) -> Result<(), GatewayError> {
        let local_addr = listener
            .local_addr()
            .map_err(|e| GatewayError::Bind(e.to_string()))?;
        info!(addr = %local_addr, "Starting HTTP server");

        axum::serve(listener, self.build_router())
            .with_graceful_shutdown(async move {
                // A dropped sender counts as a shutdown request
                let _ = shutdown.await;
                info!("Received shutdown signal");
            })
            .await
            .map_err(|e| {
                error!(error = %e, "HTTP server error");
                GatewayError::Serve(e.to_string())
            })?;

        info!("Verification gateway stopped");
        Ok(())
    }

    /// Build HTTP router
    pub fn build_router(&self) -> Router {
        let state = AppState {
            verifier: Arc::clone(&self.verifier),
        };

        let middleware = ServiceBuilder::new()
            .layer(CatchPanicLayer::custom(handle_panic))
            .layer(create_cors_layer(&self.config.cors))
            .layer(TracingLayer::new());

        Router::new()
            .route("/", get(root).fallback(not_found))
            .route("/health", get(health_check).fallback(not_found))
            .route(
                "/verify-signature",
                post(verify_signature).fallback(not_found),
            )
            .fallback(not_found)
            .layer(DefaultBodyLimit::max(self.config.limits.max_request_size))
            .layer(middleware)
            .with_state(state)
    }
}

/// Turn a handler panic into the generic 500 body.
fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };

    error!(panic = %detail, "Request handler panicked");
    ApiError::internal().into_response()
}
