//! In-process wallet backed by a k256 signing key.

use crate::domain::errors::WalletError;
use crate::ports::outbound::WalletSession;
use async_trait::async_trait;
use k256::ecdsa::SigningKey;
use tracing::debug;
use ws_01_signature_verification::{address_from_pubkey, sign_personal_message};

/// Wallet session holding a local secp256k1 key.
///
/// Used by tests and command-line tooling in place of a browser wallet.
pub struct LocalWallet {
    key: Option<SigningKey>,
}

impl LocalWallet {
    pub fn new(key: SigningKey) -> Self {
        Self { key: Some(key) }
    }

    /// Fresh random key.
    pub fn random() -> Self {
        Self::new(SigningKey::random(&mut rand::thread_rng()))
    }

    /// Key from 32 hex-encoded bytes, with or without `0x`.
    pub fn from_hex(secret: &str) -> Result<Self, WalletError> {
        let digits = secret.strip_prefix("0x").unwrap_or(secret);
        let bytes =
            hex::decode(digits).map_err(|e| WalletError::Rejected(format!("invalid key: {e}")))?;
        let key = SigningKey::from_slice(&bytes)
            .map_err(|_| WalletError::Rejected("invalid key".to_string()))?;
        Ok(Self::new(key))
    }

    /// A session with no account connected.
    pub fn disconnected() -> Self {
        Self { key: None }
    }

    /// Drop the key; later signing fails with [`WalletError::NotConnected`].
    pub fn disconnect(&mut self) {
        self.key = None;
    }
}

#[async_trait]
impl WalletSession for LocalWallet {
    fn address(&self) -> Option<String> {
        self.key
            .as_ref()
            .map(|key| address_from_pubkey(key.verifying_key()).to_checksum())
    }

    async fn sign_message(&self, message: &str) -> Result<String, WalletError> {
        let key = self.key.as_ref().ok_or(WalletError::NotConnected)?;
        let signature = sign_personal_message(key, message)
            .map_err(|e| WalletError::Rejected(e.to_string()))?;

        debug!(bytes = message.len(), "Signed message with local wallet");
        Ok(signature.to_hex())
    }
}
