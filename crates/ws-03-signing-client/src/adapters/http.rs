//! [`reqwest`]-backed verification client.

use crate::domain::errors::ClientError;
use crate::ports::outbound::VerificationApi;
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use shared_types::{SignatureRequest, VerificationResult};
use std::time::Duration;
use tracing::{debug, warn};

/// Default verification service location.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";

const VERIFY_PATH: &str = "/verify-signature";

/// Where and how to reach the verification service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub base_url: String,
    /// `None` waits as long as the transport allows
    pub timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
        }
    }
}

impl ClientConfig {
    /// Defaults, with `VERIFY_API_URL` overriding the base URL.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(url) = lookup("VERIFY_API_URL") {
            let url = url.trim();
            if url.is_empty() {
                warn!("Empty VERIFY_API_URL, using default");
            } else {
                config.base_url = url.to_string();
            }
        }
        config
    }

    fn verify_url(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), VERIFY_PATH)
    }
}

/// HTTP client for `POST /verify-signature`.
#[derive(Debug, Clone)]
pub struct VerificationClient {
    inner: reqwest::Client,
    url: String,
}

impl VerificationClient {
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let inner = builder
            .build()
            .map_err(|e| ClientError::new(e.to_string()))?;

        Ok(Self {
            inner,
            url: config.verify_url(),
        })
    }

    /// Full endpoint URL.
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl VerificationApi for VerificationClient {
    async fn verify_signature(
        &self,
        request: &SignatureRequest,
    ) -> Result<VerificationResult, ClientError> {
        let response = self
            .inner
            .post(&self.url)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, url = %self.url, "Verification request failed");
                ClientError::new(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.bytes().await.unwrap_or_default();
            let error = error_from_response(status, &body);
            warn!(status = status.as_u16(), error = %error, "Verification service returned an error");
            return Err(error);
        }

        let result = response
            .json::<VerificationResult>()
            .await
            .map_err(|e| ClientError::new(e.to_string()))?;

        debug!(is_valid = result.is_valid, "Verification completed");
        Ok(result)
    }
}

/// The server's own `message`, else the status line.
fn error_from_response(status: StatusCode, body: &[u8]) -> ClientError {
    let server_message = serde_json::from_slice::<Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_owned))
        .filter(|m| !m.is_empty());

    match server_message {
        Some(message) => ClientError::new(message),
        None => ClientError::new(format!(
            "Request failed with status code {}",
            status.as_u16()
        )),
    }
}
