//! Overlapping character-window chunker.
//!
//! Section text longer than the configured window is split so each API call
//! stays within the model's input budget. Consecutive windows overlap so a
//! sentence straddling a boundary is seen whole by at least one call.
//!
//! Windows are measured in characters, not bytes — slicing is done on char
//! boundaries so multi-byte text (the `£` signs are everywhere in a benefits
//! Act) can never split a code point.

/// Split `text` into windows of at most `max_chars` characters, with
/// `overlap` characters shared between consecutive windows.
///
/// `overlap` must be smaller than `max_chars` (enforced by
/// [`crate::config::SummarizeConfigBuilder::build`]); equal or larger values
/// would stall the window. Text at or under the limit comes back as a single
/// chunk.
pub fn chunk_text(text: &str, max_chars: usize, overlap: usize) -> Vec<String> {
    debug_assert!(overlap < max_chars, "overlap must be < max_chars");

    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= max_chars {
        return vec![text.to_string()];
    }

    let step = max_chars - overlap;
    let mut chunks = Vec::new();
    let mut start = 0usize;
    while start < chars.len() {
        let end = (start + max_chars).min(chars.len());
        chunks.push(chars[start..end].iter().collect());
        if end == chars.len() {
            break;
        }
        start += step;
    }
    chunks
}
