//! # Signature Verification Service
//!
//! Application service layer that implements the `SignatureVerificationApi` trait.
//!
//! ## Architecture
//!
//! This is the hexagonal "application service" that:
//! - Implements the inbound port (`SignatureVerificationApi`)
//! - Uses the outbound port (`SignatureCodec`) for signer recovery
//! - Delegates payload validation to the domain layer

use crate::domain::ecdsa::EcdsaCodec;
use crate::domain::entities::{VerificationOutcome, VerifyPayload};
use crate::domain::errors::CodecError;
use crate::ports::inbound::SignatureVerificationApi;
use crate::ports::outbound::SignatureCodec;
use shared_types::{SignatureRequest, VerificationResult};
use tracing::{debug, error};

/// Signature Verification Service.
///
/// Stateless apart from its codec; one instance is shared by all requests.
pub struct SignatureVerificationService<C: SignatureCodec> {
    codec: C,
}

impl<C: SignatureCodec> SignatureVerificationService<C> {
    /// Create a new signature verification service.
    pub fn new(codec: C) -> Self {
        Self { codec }
    }
}

impl Default for SignatureVerificationService<EcdsaCodec> {
    fn default() -> Self {
        Self::new(EcdsaCodec::new())
    }
}

impl<C: SignatureCodec> SignatureVerificationApi for SignatureVerificationService<C> {
    fn verify(&self, payload: &VerifyPayload) -> VerificationOutcome {
        match payload.validate() {
            Ok(request) => self.verify_request(&request),
            Err(rejection) => {
                debug!(?rejection, "Rejected verification payload");
                VerificationOutcome::Rejected(rejection)
            }
        }
    }

    fn verify_request(&self, request: &SignatureRequest) -> VerificationOutcome {
        match self.codec.recover(&request.message, &request.signature) {
            Ok(signer) => {
                debug!(%signer, "Signature verified");
                VerificationOutcome::Completed(VerificationResult::valid(
                    signer.to_checksum(),
                    request.message.clone(),
                ))
            }
            Err(CodecError::Signature(reason)) => {
                debug!(%reason, "Signature did not verify");
                VerificationOutcome::Completed(VerificationResult::invalid(request.message.clone()))
            }
            Err(CodecError::Internal(reason)) => {
                error!(%reason, "Signature codec failed");
                VerificationOutcome::Failed { reason }
            }
        }
    }
}
