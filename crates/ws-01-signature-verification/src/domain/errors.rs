//! # Signature Errors
//!
//! Error types for signature parsing and recovery.

use thiserror::Error;

/// Errors that can occur while decoding or recovering a signature.
///
/// Every variant is a *classified* failure: the verification service reports
/// it as `isValid: false`, never as a server error.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SignatureError {
    /// The signature text is not `0x`-prefixed hex
    #[error("Invalid signature encoding: {0}")]
    InvalidEncoding(String),

    /// The decoded signature is neither 65 bytes nor 64-byte compact form
    #[error("Invalid signature length: {0} bytes")]
    InvalidLength(usize),

    /// R or S is outside [1, n-1]
    #[error("Invalid signature format")]
    InvalidFormat,

    /// Signature has high S value (EIP-2 malleability protection)
    #[error("Malleable signature (high S value)")]
    MalleableSignature,

    /// Invalid recovery ID (v must be 0, 1, 27, 28 or >= 35)
    #[error("Invalid recovery ID: {0}")]
    InvalidRecoveryId(u8),

    /// Failed to recover public key from signature
    #[error("Failed to recover public key")]
    RecoveryFailed,

    /// The signing key refused to produce a signature
    #[error("Signing failed")]
    SigningFailed,
}

/// Errors surfaced by a [`crate::ports::outbound::SignatureCodec`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CodecError {
    /// Known codec-level rejection of the signature
    #[error(transparent)]
    Signature(#[from] SignatureError),

    /// Anything the codec could not classify
    #[error("Codec failure: {0}")]
    Internal(String),
}
