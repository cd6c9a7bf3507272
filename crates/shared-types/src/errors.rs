//! # Shared Errors

use thiserror::Error;

/// Errors raised while parsing an account address from text.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AddressError {
    /// Address text did not start with `0x`
    #[error("address must start with 0x")]
    MissingPrefix,

    /// Address was not exactly 20 bytes
    #[error("address must be 40 hex characters, got {0}")]
    InvalidLength(usize),

    /// Address contained non-hex characters
    #[error("address is not valid hex")]
    InvalidHex,
}
