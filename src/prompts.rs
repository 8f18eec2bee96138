//! Prompts for the section summarisation stage.
//!
//! Centralising every prompt here serves two purposes:
//!
//! 1. **Single source of truth** — tweaking the labels or the bullet rules
//!    requires editing exactly one place, and the merge parser in
//!    [`crate::summarize::merge`] reads the same [`LABELS`] constant.
//!
//! 2. **Testability** — unit tests can build and inspect prompts directly
//!    without a live API, so a prompt regression shows up in CI.

/// Labels the model is instructed to emit, in the order they appear in a
/// [`crate::model::SectionSummary`]. The merge parser matches on exactly
/// these strings (case-insensitive, at the start of a bullet).
pub const LABELS: [&str; 5] = [
    "PURPOSE",
    "DEFINITIONS",
    "ELIGIBILITY",
    "OBLIGATIONS",
    "ENFORCEMENT",
];

/// System prompt fixing the output contract for every chunk call.
pub const SYSTEM_PROMPT: &str = "\
You are summarising one section of a piece of primary legislation. \
Produce 3-5 concise bullets, each starting with one of the labels \
PURPOSE:, DEFINITIONS:, ELIGIBILITY:, OBLIGATIONS:, or ENFORCEMENT:. \
Use a label only when the text actually covers it. \
Output only the bullets — no preamble, no commentary.";

/// Build the user prompt for one chunk of a section.
///
/// The chunk index is included so the model knows it may be seeing a
/// fragment; `chunk_total` of 1 means the whole section fits in one call.
pub fn chunk_prompt(heading: &str, chunk_index: usize, chunk_total: usize, chunk: &str) -> String {
    format!(
        "SECTION: {heading}\nCHUNK {n}/{total}:\n\n{chunk}",
        n = chunk_index + 1,
        total = chunk_total,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chunk_prompt_numbers_are_one_based() {
        let p = chunk_prompt("Section 1 Entitlement", 0, 3, "body text");
        assert!(p.contains("CHUNK 1/3"));
        assert!(p.contains("Section 1 Entitlement"));
        assert!(p.ends_with("body text"));
    }

    #[test]
    fn system_prompt_names_every_label() {
        for label in LABELS {
            assert!(
                SYSTEM_PROMPT.contains(label),
                "system prompt missing label {label}"
            );
        }
    }
}
