//! # Client Errors
//!
//! Error types for the signing client.

use thiserror::Error;

/// Fallback text when an error carries nothing usable.
pub const UNEXPECTED_ERROR: &str = "An unexpected error occurred";

/// Errors from a [`crate::ports::outbound::KeyValueStore`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum KVStoreError {
    /// I/O error during read/write.
    #[error("KV store I/O error: {message}")]
    IOError { message: String },
    /// Data corruption in the store.
    #[error("KV store corruption: {message}")]
    CorruptionError { message: String },
}

/// Errors from the message history.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HistoryError {
    /// The backing store failed
    #[error(transparent)]
    Storage(#[from] KVStoreError),

    /// The persisted blob is not a valid history sequence
    #[error("Persisted history is corrupt: {0}")]
    Corrupt(String),

    /// The in-memory history could not be encoded
    #[error("Failed to encode history: {0}")]
    Encode(String),
}

/// Normalized failure of a verification call.
///
/// Only ever carries a human-readable message.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct ClientError {
    pub message: String,
}

impl ClientError {
    /// Wrap a message; blank messages become [`UNEXPECTED_ERROR`].
    pub fn new(message: impl Into<String>) -> Self {
        let message = message.into();
        if message.trim().is_empty() {
            Self::unexpected()
        } else {
            Self { message }
        }
    }

    pub fn unexpected() -> Self {
        Self {
            message: UNEXPECTED_ERROR.to_string(),
        }
    }
}

/// Errors from a [`crate::ports::outbound::WalletSession`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WalletError {
    #[error("Wallet not connected")]
    NotConnected,

    #[error("Failed to get signature from wallet")]
    EmptySignature,

    /// The wallet refused or failed to sign
    #[error("{0}")]
    Rejected(String),
}

/// Why a submission produced no history entry.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SubmitError {
    #[error("Please enter a message")]
    EmptyMessage,

    #[error("{}", signing_message(.0))]
    Signing(WalletError),

    /// The history could not record the signed message
    #[error(transparent)]
    History(#[from] HistoryError),
}

fn signing_message(error: &WalletError) -> String {
    let text = error.to_string();
    if text.trim().is_empty() {
        "Failed to sign message".to_string()
    } else {
        text
    }
}
