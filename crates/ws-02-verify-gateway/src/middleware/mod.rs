//! Middleware stack for the verification gateway.
//!
//! Layer order: Request → CatchPanic → CORS → Tracing → BodyLimit → Handler

pub mod cors;
pub mod tracing;

pub use cors::create_cors_layer;
pub use tracing::TracingLayer;
