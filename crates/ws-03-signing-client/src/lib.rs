//! # Signing Client
//!
//! Client side of the signature verification flow: a wallet signs a personal
//! message, the remote gateway checks it, and every signed message lands in a
//! persistent history.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   sign    ┌──────────────────┐  POST /verify-signature
//! │ WalletSession├──────────►│ SigningWorkflow  ├───────────────► VerificationApi
//! └──────────────┘           └────────┬─────────┘
//!                                     │ add / update
//!                            ┌────────▼─────────┐
//!                            │  MessageHistory  ├──► KeyValueStore
//!                            └──────────────────┘
//! ```
//!
//! ## Entry Lifecycle
//!
//! An entry is created pending right after signing and is moved exactly once
//! to valid or invalid. Terminal entries never change again.

#![deny(unsafe_code)]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

pub use adapters::{
    ClientConfig, FileBackedKVStore, InMemoryKVStore, LocalWallet, SystemTimeSource,
    TracingNotifier, VerificationClient,
};
pub use domain::display::{
    entry_summary, history_signer, signature_preview, status_label, wallet_badge,
};
pub use domain::entities::{EntryState, HistoryEntry, UpdateOutcome};
pub use domain::errors::{ClientError, HistoryError, KVStoreError, SubmitError, WalletError};
pub use domain::history::{MessageHistory, HISTORY_KEY};
pub use domain::notify::{NotificationLevel, NotificationOptions, NotificationOverrides, Position};
pub use ports::outbound::{KeyValueStore, Notifier, TimeSource, VerificationApi, WalletSession};
pub use service::{SigningWorkflow, Submission, VERIFICATION_FAILED_MESSAGE};
