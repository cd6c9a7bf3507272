//! Compact renderings of addresses, signatures and entry states.

use super::entities::{EntryState, HistoryEntry};
use shared_types::shorten;

/// Characters of signature shown before the ellipsis.
const SIGNATURE_PREVIEW_LEN: usize = 20;

/// Connected-wallet badge: `0x1234...abcd`.
pub fn wallet_badge(address: &str) -> String {
    shorten(address, 6, 4)
}

/// Signer as shown in a history row: `0x123456...abcdef`.
pub fn history_signer(address: &str) -> String {
    shorten(address, 8, 6)
}

/// First 20 characters of a signature followed by `...`.
pub fn signature_preview(signature: &str) -> String {
    let head: String = signature.chars().take(SIGNATURE_PREVIEW_LEN).collect();
    format!("{head}...")
}

/// Human label for an entry's state.
pub fn status_label(state: EntryState) -> &'static str {
    match state {
        EntryState::Pending => "Pending verification",
        EntryState::Valid => "Valid",
        EntryState::Invalid => "Invalid",
    }
}

/// One-line summary of a history entry.
pub fn entry_summary(entry: &HistoryEntry) -> String {
    let state = entry.state();
    match (&entry.verification_result, state) {
        (Some(result), EntryState::Valid) => format!(
            "[{}] {} by {}",
            status_label(state),
            signature_preview(&entry.signature),
            history_signer(&result.signer)
        ),
        _ => format!(
            "[{}] {}",
            status_label(state),
            signature_preview(&entry.signature)
        ),
    }
}
