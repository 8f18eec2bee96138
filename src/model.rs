//! Data model shared by the three pipeline stages.
//!
//! These types *are* the JSON contracts between the binaries: a [`SectionSet`]
//! is the whole of `extracted_sections.json`, a [`SummarySet`] the whole of
//! `summary.json`, and a [`Report`] the whole of `report.json`. Field order in
//! the structs is therefore load-bearing — `serde_json` serialises struct
//! fields in declaration order and both the extractor and the checker promise
//! byte-identical output across runs.

use serde::{Deserialize, Serialize};
use std::fmt;

// ── Extraction ───────────────────────────────────────────────────────────

/// Inclusive 1-based page span contributing text to a section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRange {
    pub start: u32,
    pub end: u32,
}

/// A heading-delimited block of extracted PDF text.
///
/// Immutable once written: the summarizer and the checker read sections, they
/// never modify them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// 1-based, assigned in page order.
    pub id: u32,
    /// First line of the block, truncated to 200 characters.
    pub heading: String,
    /// Body text with runs of whitespace collapsed to single spaces.
    pub raw_text: String,
    pub page_range: PageRange,
}

/// The extractor's full output — `outputs/extracted_sections.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionSet {
    /// Path of the PDF the sections were extracted from.
    pub source: String,
    pub sections: Vec<Section>,
}

impl SectionSet {
    /// Look up a section by id.
    pub fn section(&self, id: u32) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == id)
    }
}

// ── Summarisation ────────────────────────────────────────────────────────

/// Structured summary of one section.
///
/// Fields are absent (not empty strings) when the model did not emit the
/// corresponding label for any chunk of the section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionSummary {
    pub section_id: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purpose: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub definitions: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eligibility: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub obligations: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enforcement: Option<String>,
}

impl SectionSummary {
    /// True when no label was detected at all.
    pub fn is_empty(&self) -> bool {
        self.purpose.is_none()
            && self.definitions.is_none()
            && self.eligibility.is_none()
            && self.obligations.is_none()
            && self.enforcement.is_none()
    }
}

/// The summarizer's full output — `outputs/summary.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummarySet {
    /// Model identifier the summaries were produced with.
    pub model: String,
    pub summaries: Vec<SectionSummary>,
}

// ── Rule checking ────────────────────────────────────────────────────────

/// Outcome of a single checklist rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleStatus {
    Pass,
    Fail,
}

impl fmt::Display for RuleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleStatus::Pass => write!(f, "pass"),
            RuleStatus::Fail => write!(f, "fail"),
        }
    }
}

/// Result of evaluating one fixed checklist rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleResult {
    pub rule_name: String,
    pub status: RuleStatus,
    /// Section heading plus a snippet around the first keyword match.
    /// Absent when the rule failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evidence: Option<String>,
    /// Heuristic confidence in the verdict, 0.0–1.0.
    pub confidence: f64,
}

/// Per-keyword-group match detail backing a rule verdict.
///
/// Kept alongside the terse `rule_checks` so a reviewer can see *where* a
/// rule passed without re-opening the Act.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldHits {
    pub field: String,
    /// Total matching sections across all keywords in the group.
    pub num_hits: u32,
    /// First few matches: "keyword @ section heading".
    pub examples: Vec<String>,
}

/// The checker's full output — `outputs/report.json`.
///
/// Deliberately contains no timestamps or host data: two runs over the same
/// `extracted_sections.json` must serialise to identical bytes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// Source path copied through from the [`SectionSet`].
    pub source: String,
    pub rule_checks: Vec<RuleResult>,
    pub fields: Vec<FieldHits>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_skips_absent_fields() {
        let s = SectionSummary {
            section_id: 3,
            purpose: Some("Establishes the credit.".into()),
            ..Default::default()
        };
        let json = serde_json::to_string(&s).unwrap();
        assert!(json.contains("purpose"));
        assert!(!json.contains("eligibility"));
        assert!(!json.contains("enforcement"));
    }

    #[test]
    fn rule_status_serialises_lowercase() {
        assert_eq!(serde_json::to_string(&RuleStatus::Pass).unwrap(), "\"pass\"");
        assert_eq!(serde_json::to_string(&RuleStatus::Fail).unwrap(), "\"fail\"");
    }

    #[test]
    fn section_lookup_by_id() {
        let set = SectionSet {
            source: "data/act.pdf".into(),
            sections: vec![Section {
                id: 1,
                heading: "Short title".into(),
                raw_text: "This Act may be cited as…".into(),
                page_range: PageRange { start: 1, end: 1 },
            }],
        };
        assert!(set.section(1).is_some());
        assert!(set.section(2).is_none());
    }

    #[test]
    fn section_roundtrip() {
        let s = Section {
            id: 7,
            heading: "SCHEDULE 2".into(),
            raw_text: "Amounts of the standard allowance".into(),
            page_range: PageRange { start: 14, end: 16 },
        };
        let json = serde_json::to_string(&s).unwrap();
        let back: Section = serde_json::from_str(&json).unwrap();
        assert_eq!(back, s);
    }
}
