//! # Message History
//!
//! The client-side log of signed messages and their verification outcomes.
//!
//! ## Lifecycle
//!
//! ```text
//! add_to_history ──► Pending ──update_verification_result──► Valid | Invalid
//! ```
//!
//! Entries are prepended (most recent first). Every mutation persists the
//! whole sequence as one JSON blob under [`HISTORY_KEY`] before returning;
//! if the write fails the in-memory log is left untouched.
//!
//! Single owner: mutation takes `&mut self`.

use super::entities::{HistoryEntry, UpdateOutcome};
use super::errors::HistoryError;
use crate::ports::outbound::{KeyValueStore, TimeSource};
use rand::Rng;
use shared_types::VerificationResult;
use tracing::{debug, warn};

/// Storage key for the persisted history blob.
pub const HISTORY_KEY: &str = "web3_message_history";

const ID_SUFFIX_LEN: usize = 7;
const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Ordered, persisted log of [`HistoryEntry`] values.
pub struct MessageHistory<S: KeyValueStore, T: TimeSource> {
    store: S,
    clock: T,
    entries: Vec<HistoryEntry>,
}

impl<S: KeyValueStore, T: TimeSource> MessageHistory<S, T> {
    /// Load the persisted history. A missing key means an empty history.
    pub fn open(store: S, clock: T) -> Result<Self, HistoryError> {
        let entries = match store.get(HISTORY_KEY)? {
            Some(blob) => serde_json::from_str::<Vec<HistoryEntry>>(&blob).map_err(|e| {
                warn!(error = %e, "Persisted history could not be decoded");
                HistoryError::Corrupt(e.to_string())
            })?,
            None => Vec::new(),
        };

        debug!(entries = entries.len(), "Opened message history");
        Ok(Self {
            store,
            clock,
            entries,
        })
    }

    /// Record a freshly signed message as a pending entry.
    ///
    /// Returns the new entry; its id is needed to record the outcome later.
    pub fn add_to_history(
        &mut self,
        message: impl Into<String>,
        signature: impl Into<String>,
    ) -> Result<HistoryEntry, HistoryError> {
        let timestamp = self.clock.now_millis();
        let entry = HistoryEntry {
            id: self.fresh_id(timestamp),
            message: message.into(),
            signature: signature.into(),
            timestamp,
            verification_result: None,
        };

        let mut next = Vec::with_capacity(self.entries.len() + 1);
        next.push(entry.clone());
        next.extend(self.entries.iter().cloned());

        self.persist(&next)?;
        self.entries = next;

        debug!(id = %entry.id, "Added pending history entry");
        Ok(entry)
    }

    /// Move a pending entry to its terminal state.
    ///
    /// Unknown ids and already-terminal entries are left alone.
    pub fn update_verification_result(
        &mut self,
        id: &str,
        result: VerificationResult,
    ) -> Result<UpdateOutcome, HistoryError> {
        let Some(index) = self.entries.iter().position(|e| e.id == id) else {
            debug!(id, "No history entry to update");
            return Ok(UpdateOutcome::NotFound);
        };

        if !self.entries[index].is_pending() {
            warn!(id, "History entry already has a verification result");
            return Ok(UpdateOutcome::AlreadyTerminal);
        }

        let mut next = self.entries.clone();
        next[index].verification_result = Some(result);

        self.persist(&next)?;
        self.entries = next;

        debug!(id, "Recorded verification result");
        Ok(UpdateOutcome::Updated)
    }

    /// Remove every entry and the persisted blob.
    pub fn clear_history(&mut self) -> Result<(), HistoryError> {
        self.store.delete(HISTORY_KEY)?;
        self.entries.clear();
        debug!("Cleared message history");
        Ok(())
    }

    /// All entries, most recent first.
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn get(&self, id: &str) -> Option<&HistoryEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries still waiting for a verification result.
    pub fn pending(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter().filter(|e| e.is_pending())
    }

    /// Backing store, for inspection.
    pub fn store(&self) -> &S {
        &self.store
    }

    fn persist(&mut self, entries: &[HistoryEntry]) -> Result<(), HistoryError> {
        let blob =
            serde_json::to_string(entries).map_err(|e| HistoryError::Encode(e.to_string()))?;
        self.store.put(HISTORY_KEY, &blob)?;
        Ok(())
    }

    fn fresh_id(&self, timestamp: u64) -> String {
        let mut rng = rand::thread_rng();
        loop {
            let suffix: String = (0..ID_SUFFIX_LEN)
                .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
                .collect();
            let id = format!("{timestamp}-{suffix}");
            if self.get(&id).is_none() {
                return id;
            }
        }
    }
}
