//! # Domain Entities
//!
//! History records and the outcomes of operations on them.

use serde::{Deserialize, Serialize};
use shared_types::VerificationResult;

/// One signed message plus its eventual verification outcome.
///
/// Serialized with camelCase names; `verificationResult` is omitted while
/// the entry is pending.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    /// `<created_ms>-<7 base36 chars>`
    pub id: String,
    pub message: String,
    pub signature: String,
    /// Creation time, milliseconds since epoch
    pub timestamp: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verification_result: Option<VerificationResult>,
}

impl HistoryEntry {
    /// Lifecycle state derived from the stored result.
    pub fn state(&self) -> EntryState {
        match &self.verification_result {
            None => EntryState::Pending,
            Some(result) if result.is_valid => EntryState::Valid,
            Some(_) => EntryState::Invalid,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.verification_result.is_none()
    }
}

/// Lifecycle of a [`HistoryEntry`].
///
/// `Pending` moves exactly once to `Valid` or `Invalid`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntryState {
    Pending,
    Valid,
    Invalid,
}

impl EntryState {
    pub fn is_terminal(self) -> bool {
        !matches!(self, EntryState::Pending)
    }
}

/// Result of [`crate::MessageHistory::update_verification_result`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// The entry moved to its terminal state
    Updated,
    /// No entry has that id; nothing changed
    NotFound,
    /// The entry was already terminal; nothing changed
    AlreadyTerminal,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pending() -> HistoryEntry {
        HistoryEntry {
            id: "1700000000000-abc1234".into(),
            message: "hello".into(),
            signature: "0xsig".into(),
            timestamp: 1_700_000_000_000,
            verification_result: None,
        }
    }

    #[test]
    fn test_pending_omits_result_field() {
        let json = serde_json::to_value(pending()).unwrap();
        assert!(json.get("verificationResult").is_none());
        assert_eq!(json["timestamp"], 1_700_000_000_000u64);
    }

    #[test]
    fn test_state_follows_result() {
        let mut entry = pending();
        assert_eq!(entry.state(), EntryState::Pending);
        assert!(!entry.state().is_terminal());

        entry.verification_result = Some(VerificationResult::valid("0xabc", "hello"));
        assert_eq!(entry.state(), EntryState::Valid);

        entry.verification_result = Some(VerificationResult::invalid("hello"));
        assert_eq!(entry.state(), EntryState::Invalid);
        assert!(entry.state().is_terminal());
    }

    #[test]
    fn test_nested_result_uses_wire_names() {
        let mut entry = pending();
        entry.verification_result = Some(VerificationResult::invalid("hello"));

        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["verificationResult"]["isValid"], false);
        assert_eq!(json["verificationResult"]["originalMessage"], "hello");

        let back: HistoryEntry = serde_json::from_value(json).unwrap();
        assert_eq!(back, entry);
    }
}
