//! # Outbound Ports (Driven Ports)
//!
//! Everything the signing client needs from the outside world: storage,
//! a clock, a wallet, the verification service and a place to show
//! notifications.

use crate::domain::errors::{ClientError, KVStoreError, WalletError};
use crate::domain::notify::{NotificationLevel, NotificationOptions};
use async_trait::async_trait;
use shared_types::{SignatureRequest, VerificationResult};

/// Abstract interface for string key-value persistence.
///
/// Production: `FileBackedKVStore`
/// Testing: `InMemoryKVStore`
pub trait KeyValueStore: Send + Sync {
    /// Get a value by key.
    fn get(&self, key: &str) -> Result<Option<String>, KVStoreError>;

    /// Put a single key-value pair, durably.
    fn put(&mut self, key: &str, value: &str) -> Result<(), KVStoreError>;

    /// Delete a key. Deleting an absent key is not an error.
    fn delete(&mut self, key: &str) -> Result<(), KVStoreError>;

    /// Check if a key exists.
    fn exists(&self, key: &str) -> Result<bool, KVStoreError> {
        Ok(self.get(key)?.is_some())
    }
}

/// Abstract interface for time.
pub trait TimeSource: Send + Sync {
    /// Milliseconds since the Unix epoch.
    fn now_millis(&self) -> u64;
}

/// A connected (or not) wallet able to `personal_sign`.
#[async_trait]
pub trait WalletSession: Send + Sync {
    /// Connected account, if any.
    fn address(&self) -> Option<String>;

    /// Sign `message` and return the `0x`-prefixed hex signature.
    async fn sign_message(&self, message: &str) -> Result<String, WalletError>;
}

/// The remote verification service.
#[async_trait]
pub trait VerificationApi: Send + Sync {
    /// One verification call; no retries.
    async fn verify_signature(
        &self,
        request: &SignatureRequest,
    ) -> Result<VerificationResult, ClientError>;
}

/// Somewhere to show transient user-facing notifications.
pub trait Notifier: Send + Sync {
    fn notify(&self, level: NotificationLevel, text: &str, options: &NotificationOptions);
}
