//! # Signing Workflow
//!
//! Sign → record pending → verify → record outcome.
//!
//! Only a successful signature creates a history entry. Once an entry exists
//! it is moved to a terminal state: if the verification call fails the entry
//! is closed as invalid. The one exception is a store that refuses the final
//! write, which leaves the entry pending.

use crate::domain::entities::{HistoryEntry, UpdateOutcome};
use crate::domain::errors::{ClientError, SubmitError, WalletError};
use crate::domain::history::MessageHistory;
use crate::domain::notify::{NotificationLevel, NotificationOptions, NotificationOverrides};
use crate::ports::outbound::{KeyValueStore, Notifier, TimeSource, VerificationApi, WalletSession};
use shared_types::{SignatureRequest, VerificationResult};
use std::time::Duration;
use tracing::{error, info, warn};

/// Shown when the signature exists but the service could not be reached.
pub const VERIFICATION_FAILED_MESSAGE: &str =
    "Message signed but verification failed. Check console for details.";

/// Shown when the service confirms the signature.
pub const VERIFIED_MESSAGE: &str = "Message signed and verified";

/// Shown when the service answers but the signature does not recover.
pub const INVALID_SIGNATURE_MESSAGE: &str = "Message signed but the signature is invalid";

/// How long error notifications stay up.
const ERROR_AUTO_CLOSE: Duration = Duration::from_secs(5);

/// What happened to a message that was signed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// The service answered; the entry holds its result
    Verified(HistoryEntry),
    /// The call failed; the entry was closed as invalid
    VerificationFailed {
        entry: HistoryEntry,
        error: ClientError,
    },
}

impl Submission {
    pub fn entry(&self) -> &HistoryEntry {
        match self {
            Submission::Verified(entry) => entry,
            Submission::VerificationFailed { entry, .. } => entry,
        }
    }
}

/// Orchestrates one message from wallet to history.
pub struct SigningWorkflow<W, V, N> {
    wallet: W,
    verifier: V,
    notifier: N,
    notifications: NotificationOptions,
}

impl<W, V, N> SigningWorkflow<W, V, N>
where
    W: WalletSession,
    V: VerificationApi,
    N: Notifier,
{
    pub fn new(wallet: W, verifier: V, notifier: N) -> Self {
        Self::with_notifications(wallet, verifier, notifier, NotificationOptions::default())
    }

    /// Use `notifications` as the defaults for every notification shown.
    pub fn with_notifications(
        wallet: W,
        verifier: V,
        notifier: N,
        notifications: NotificationOptions,
    ) -> Self {
        Self {
            wallet,
            verifier,
            notifier,
            notifications,
        }
    }

    pub fn wallet(&self) -> &W {
        &self.wallet
    }

    /// Sign `message`, record it, verify it and record the outcome.
    ///
    /// If persisting the outcome fails, `SubmitError::History` is returned and
    /// the entry stays pending both in memory and in the store. Nothing
    /// reconciles it later; the caller may retry with
    /// [`MessageHistory::update_verification_result`].
    pub async fn submit<S, T>(
        &self,
        history: &mut MessageHistory<S, T>,
        message: &str,
    ) -> Result<Submission, SubmitError>
    where
        S: KeyValueStore,
        T: TimeSource,
    {
        if message.trim().is_empty() {
            return Err(self.fail(SubmitError::EmptyMessage));
        }

        let signature = match self.wallet.sign_message(message).await {
            Ok(signature) if signature.is_empty() => {
                return Err(self.fail(SubmitError::Signing(WalletError::EmptySignature)))
            }
            Ok(signature) => signature,
            Err(e) => {
                error!(error = %e, "Signing error");
                return Err(self.fail(SubmitError::Signing(e)));
            }
        };

        let pending = history
            .add_to_history(message, signature.clone())
            .map_err(|e| self.fail(e.into()))?;

        let request = SignatureRequest::new(message, signature);
        match self.verifier.verify_signature(&request).await {
            Ok(result) => {
                let is_valid = result.is_valid;
                let entry = Self::record(history, pending, result).map_err(|e| self.fail(e))?;
                if is_valid {
                    self.show(NotificationLevel::Success, VERIFIED_MESSAGE, None);
                } else {
                    self.show(NotificationLevel::Warning, INVALID_SIGNATURE_MESSAGE, None);
                }
                info!(id = %entry.id, is_valid, "Message verified");
                Ok(Submission::Verified(entry))
            }
            Err(client_error) => {
                error!(error = %client_error, "Verification error");
                let result = VerificationResult::invalid(message);
                let entry = Self::record(history, pending, result).map_err(|e| self.fail(e))?;
                self.show_error(VERIFICATION_FAILED_MESSAGE);
                Ok(Submission::VerificationFailed {
                    entry,
                    error: client_error,
                })
            }
        }
    }

    /// Store `result` on `pending` and return the updated entry.
    fn record<S, T>(
        history: &mut MessageHistory<S, T>,
        pending: HistoryEntry,
        result: VerificationResult,
    ) -> Result<HistoryEntry, SubmitError>
    where
        S: KeyValueStore,
        T: TimeSource,
    {
        let outcome = history.update_verification_result(&pending.id, result.clone())?;
        if outcome != UpdateOutcome::Updated {
            warn!(id = %pending.id, ?outcome, "Verification result not recorded");
        }

        Ok(history.get(&pending.id).cloned().unwrap_or(HistoryEntry {
            verification_result: Some(result),
            ..pending
        }))
    }

    fn fail(&self, error: SubmitError) -> SubmitError {
        self.show_error(&error.to_string());
        error
    }

    fn show_error(&self, text: &str) {
        let overrides = NotificationOverrides {
            auto_close: Some(Some(ERROR_AUTO_CLOSE)),
            ..Default::default()
        };
        self.show(NotificationLevel::Error, text, Some(&overrides));
    }

    fn show(&self, level: NotificationLevel, text: &str, overrides: Option<&NotificationOverrides>) {
        let options = match overrides {
            Some(overrides) => self.notifications.merged(overrides),
            None => self.notifications.clone(),
        };
        self.notifier.notify(level, text, &options);
    }
}
