//! Section segmentation: split per-page text at heading-like lines.
//!
//! ## Heading heuristics
//!
//! UK Acts (and most Commonwealth drafting styles) open their structural
//! units with a fixed vocabulary — `Section 3`, `CHAPTER 2`, `SCHEDULE 1`,
//! `PART 4`, the `CONTENTS` table, and the closing `Short title` clause.
//! A line starting with one of those words opens a new section; everything
//! up to the next such line is its body. Font information would be more
//! robust but plain-text extraction does not carry it, and the keyword
//! alternation holds up well on real statute PDFs.
//!
//! Text before the first heading (title page, enacting formula) becomes a
//! leading section so nothing is dropped — a document with N headings yields
//! N sections, plus one when that preamble is non-empty.

use crate::model::{PageRange, Section};
use once_cell::sync::Lazy;
use regex::Regex;

/// Maximum characters kept from the heading line.
const MAX_HEADING_CHARS: usize = 200;

static RE_HEADING: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:Section|SECTION|SCHEDULE|Schedule|CHAPTER|PART|CONTENTS|Short title)\b")
        .unwrap()
});

static RE_WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// True when a line opens a new section.
pub fn is_heading_line(line: &str) -> bool {
    RE_HEADING.is_match(line.trim_start())
}

/// Collapse all whitespace runs to single spaces and trim.
pub fn normalize_whitespace(s: &str) -> String {
    RE_WHITESPACE.replace_all(s, " ").trim().to_string()
}

/// One block being accumulated: its lines and the page span they came from.
struct Block {
    lines: Vec<String>,
    first_page: u32,
    last_page: u32,
}

impl Block {
    fn new(line: &str, page: u32) -> Self {
        Self {
            lines: vec![line.to_string()],
            first_page: page,
            last_page: page,
        }
    }

    fn push(&mut self, line: &str, page: u32) {
        self.lines.push(line.to_string());
        self.last_page = page;
    }

    fn into_section(self, id: u32) -> Option<Section> {
        let raw_text = normalize_whitespace(&self.lines.join("\n"));
        if raw_text.is_empty() {
            return None;
        }
        let heading = self
            .lines
            .iter()
            .map(|l| l.trim())
            .find(|l| !l.is_empty())
            .unwrap_or("")
            .chars()
            .take(MAX_HEADING_CHARS)
            .collect();
        Some(Section {
            id,
            heading,
            raw_text,
            page_range: PageRange {
                start: self.first_page,
                end: self.last_page,
            },
        })
    }
}

/// Segment per-page text (page 1 first) into sections in page order.
///
/// Blank blocks are dropped; ids are assigned 1-based after the drop so the
/// id sequence is always contiguous.
pub fn segment_pages(pages: &[String]) -> Vec<Section> {
    let mut blocks: Vec<Block> = Vec::new();
    let mut current: Option<Block> = None;

    for (page_idx, page_text) in pages.iter().enumerate() {
        let page = page_idx as u32 + 1;
        for line in page_text.lines() {
            if is_heading_line(line) {
                if let Some(done) = current.take() {
                    blocks.push(done);
                }
                current = Some(Block::new(line, page));
            } else {
                match current.as_mut() {
                    Some(block) => block.push(line, page),
                    // Preamble before the first heading.
                    None => current = Some(Block::new(line, page)),
                }
            }
        }
    }
    if let Some(done) = current.take() {
        blocks.push(done);
    }

    let mut sections = Vec::with_capacity(blocks.len());
    let mut next_id = 1u32;
    for block in blocks {
        if let Some(section) = block.into_section(next_id) {
            sections.push(section);
            next_id += 1;
        }
    }
    sections
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pages(texts: &[&str]) -> Vec<String> {
        texts.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn heading_vocabulary() {
        assert!(is_heading_line("Section 1 Entitlement"));
        assert!(is_heading_line("SCHEDULE 2"));
        assert!(is_heading_line("CHAPTER 1"));
        assert!(is_heading_line("PART 3"));
        assert!(is_heading_line("Short title, commencement and extent"));
        assert!(is_heading_line("  Schedule 1")); // leading indent
        assert!(!is_heading_line("Sections are referenced below")); // word boundary
        assert!(!is_heading_line("the Secretary of State may"));
        assert!(!is_heading_line(""));
    }

    #[test]
    fn normalize_collapses_runs() {
        assert_eq!(normalize_whitespace("  a\n\n b\t\tc  "), "a b c");
    }

    #[test]
    fn n_headings_yield_n_sections() {
        let input = pages(&[
            "Section 1 Entitlement\nA claimant is entitled.\nSection 2 Claims\nA claim must be made.",
        ]);
        let sections = segment_pages(&input);
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].heading, "Section 1 Entitlement");
        assert_eq!(sections[1].heading, "Section 2 Claims");
        assert_eq!(sections[0].id, 1);
        assert_eq!(sections[1].id, 2);
    }

    #[test]
    fn preamble_becomes_leading_section() {
        let input = pages(&["Universal Credit Act 2025\nAn Act to make provision.\nSection 1 Entitlement\nBody."]);
        let sections = segment_pages(&input);
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].heading, "Universal Credit Act 2025");
        assert!(sections[0].raw_text.contains("An Act to make provision."));
    }

    #[test]
    fn page_range_spans_pages() {
        let input = pages(&[
            "Section 1 Entitlement\nfirst page body",
            "continues on second page",
            "Section 2 Claims\nbody",
        ]);
        let sections = segment_pages(&input);
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].page_range, PageRange { start: 1, end: 2 });
        assert_eq!(sections[1].page_range, PageRange { start: 3, end: 3 });
    }

    #[test]
    fn body_is_whitespace_normalised() {
        let input = pages(&["Section 1 Entitlement\n  a   claimant\n\tis  entitled  "]);
        let sections = segment_pages(&input);
        assert_eq!(
            sections[0].raw_text,
            "Section 1 Entitlement a claimant is entitled"
        );
    }

    #[test]
    fn heading_is_truncated_to_200_chars() {
        let long = format!("Section 1 {}", "x".repeat(300));
        let input = pages(&[long.as_str()]);
        let sections = segment_pages(&input);
        assert_eq!(sections[0].heading.chars().count(), 200);
    }

    #[test]
    fn blank_pages_produce_no_sections() {
        let input = pages(&["", "   \n  ", ""]);
        assert!(segment_pages(&input).is_empty());
    }

    #[test]
    fn deterministic_across_runs() {
        let input = pages(&["Section 1 A\nbody\nSCHEDULE 1\nschedule body"]);
        assert_eq!(segment_pages(&input), segment_pages(&input));
    }
}
