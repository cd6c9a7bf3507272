//! Text helpers for showing addresses and signatures in compact form.

/// Keep the first `head` and last `tail` characters, joined by `...`.
///
/// Strings too short to benefit are returned unchanged.
pub fn shorten(text: &str, head: usize, tail: usize) -> String {
    let count = text.chars().count();
    if count <= head + tail {
        return text.to_string();
    }

    let start: String = text.chars().take(head).collect();
    let end: String = text.chars().skip(count - tail).collect();
    format!("{start}...{end}")
}
