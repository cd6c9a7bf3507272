//! # Wire Entities
//!
//! JSON bodies exchanged over `POST /verify-signature`.
//!
//! Field names on the wire are camelCase (`isValid`, `originalMessage`).

use serde::{Deserialize, Serialize};

/// Request body for signature verification.
///
/// Both fields are required and non-empty. Constructed per call, never persisted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureRequest {
    /// The exact text that was signed
    pub message: String,
    /// `0x`-prefixed hex signature produced by `personal_sign`
    pub signature: String,
}

impl SignatureRequest {
    pub fn new(message: impl Into<String>, signature: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            signature: signature.into(),
        }
    }
}

/// Outcome of a verification call.
///
/// `is_valid == false` always carries an empty `signer`. A negative outcome is a
/// successful call, not an error.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationResult {
    /// Whether a signer could be recovered
    pub is_valid: bool,
    /// Recovered address, or `""` when invalid
    pub signer: String,
    /// The request's message, byte-for-byte
    pub original_message: String,
}

impl VerificationResult {
    /// Result for a signature that recovered to `signer`.
    pub fn valid(signer: impl Into<String>, original_message: impl Into<String>) -> Self {
        Self {
            is_valid: true,
            signer: signer.into(),
            original_message: original_message.into(),
        }
    }

    /// Result for a signature that failed to recover.
    pub fn invalid(original_message: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            signer: String::new(),
            original_message: original_message.into(),
        }
    }

    /// Check the `is_valid`/`signer` pairing.
    pub fn is_consistent(&self) -> bool {
        self.is_valid != self.signer.is_empty()
    }
}

/// Error body returned with every non-2xx status.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Fixed machine-readable tag, e.g. `"Missing required fields"`
    pub error: String,
    /// Human-readable hint
    pub message: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
        }
    }
}
