//! # Inbound Ports (Driving Ports / API)
//!
//! Traits that define the public API of this subsystem.

use crate::domain::entities::{VerificationOutcome, VerifyPayload};
use shared_types::SignatureRequest;

/// Primary Signature Verification API.
///
/// Implementations must be thread-safe (`Send + Sync`) so a single instance
/// can be shared across request handlers.
pub trait SignatureVerificationApi: Send + Sync {
    /// Validate a raw payload and, if it passes, verify it.
    fn verify(&self, payload: &VerifyPayload) -> VerificationOutcome;

    /// Verify an already-validated request.
    ///
    /// Never returns [`VerificationOutcome::Rejected`].
    fn verify_request(&self, request: &SignatureRequest) -> VerificationOutcome;
}
