//! Parse labelled bullets from model output and merge chunk results.
//!
//! The prompt asks for bullets of the form `LABEL: text` using the five
//! labels in [`crate::prompts::LABELS`]. Models follow that contract most of
//! the time but decorate it freely — leading `-`/`*`/`•` markers, bold
//! `**PURPOSE:**` labels, mixed case. The parser tolerates all of those and
//! drops anything it cannot attribute to a label rather than guessing.
//!
//! Merging is deterministic: per label, bullet texts are concatenated in
//! chunk order, separated by a single space. No second model call is made to
//! "combine" chunks, so the same chunk responses always merge to the same
//! summary.

use crate::model::SectionSummary;
use crate::prompts::LABELS;
use once_cell::sync::Lazy;
use regex::Regex;

/// One bullet line: optional list marker / bold markup, then a label from
/// [`LABELS`], a colon, and the text.
static RE_BULLET: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^[\s\-\*•]*(PURPOSE|DEFINITIONS|ELIGIBILITY|OBLIGATIONS|ENFORCEMENT)\**\s*:\s*\**\s*(.+)$",
    )
    .unwrap()
});

/// Extract `(label, text)` pairs from one model response.
///
/// Labels are normalised to upper case; lines with no recognised label are
/// ignored.
pub fn parse_bullets(response: &str) -> Vec<(String, String)> {
    response
        .lines()
        .filter_map(|line| {
            RE_BULLET.captures(line).map(|caps| {
                (
                    caps[1].to_uppercase(),
                    caps[2].trim().trim_end_matches("**").trim().to_string(),
                )
            })
        })
        .filter(|(_, text)| !text.is_empty())
        .collect()
}

/// Merge the per-chunk responses for one section into a summary.
///
/// Responses must be passed in chunk order; per label, texts are joined with
/// a single space. A label no chunk emitted stays `None`.
pub fn merge_chunk_responses(section_id: u32, responses: &[String]) -> SectionSummary {
    let mut fields: [Vec<String>; 5] = Default::default();

    for response in responses {
        for (label, text) in parse_bullets(response) {
            if let Some(slot) = LABELS.iter().position(|l| *l == label) {
                fields[slot].push(text);
            }
        }
    }

    let mut joined = fields.into_iter().map(|texts| {
        if texts.is_empty() {
            None
        } else {
            Some(texts.join(" "))
        }
    });

    SectionSummary {
        section_id,
        purpose: joined.next().unwrap(),
        definitions: joined.next().unwrap(),
        eligibility: joined.next().unwrap(),
        obligations: joined.next().unwrap(),
        enforcement: joined.next().unwrap(),
    }
}
