//! Stage 3: fixed compliance checklist over extracted sections.
//!
//! Seven named keyword groups are searched case-insensitively across every
//! section's text; six of them back a checklist rule, while `obligations`
//! feeds the per-field detail only. A rule passes when any keyword of its
//! group matches anywhere; the evidence is a snippet around the first match,
//! and confidence grows with the number of distinct sections that matched.
//! Purely deterministic pattern matching — no model, no network, no clock.
//!
//! The keyword lists are deliberately aggressive (high recall): a false
//! "pass" still carries its evidence snippet for a human to discount, while
//! a false "fail" on a statute that plainly defines its terms would make the
//! whole report untrustworthy.

use crate::model::{FieldHits, Report, RuleResult, RuleStatus, Section, SectionSet};
use once_cell::sync::Lazy;
use regex::Regex;

/// Characters of context kept on each side of a keyword match.
const SNIPPET_RADIUS: usize = 200;

/// Hits per field reported in [`FieldHits::examples`].
const MAX_EXAMPLES: usize = 3;

/// One named keyword group, searched across every section's text.
#[derive(Debug, Clone, Copy)]
pub struct FieldGroup {
    /// Short field key used in [`FieldHits`].
    pub field: &'static str,
    /// Case-insensitive literal keywords; any match is a hit.
    pub keywords: &'static [&'static str],
}

/// One fixed checklist rule: a verdict over the hits of a keyword group.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    /// The [`FieldGroup`] this rule draws its hits from.
    pub field: &'static str,
    /// The requirement sentence reported as `rule_name`.
    pub requirement: &'static str,
}

/// Keyword groups reported in the per-field detail, in report order.
///
/// `obligations` backs no checklist rule; its hits appear in the detail
/// only, as extra material for a human reviewer.
pub const FIELD_GROUPS: [FieldGroup; 7] = [
    FieldGroup {
        field: "definitions",
        keywords: &["definition", "interpretation", "means", "defined"],
    },
    FieldGroup {
        field: "eligibility",
        keywords: &["entitled", "eligible", "eligibility", "claimant", "entitlement"],
    },
    FieldGroup {
        field: "obligations",
        keywords: &["obligation", "duty", "must", "required to", "shall", "required"],
    },
    FieldGroup {
        field: "responsibilities",
        keywords: &[
            "Secretary of State",
            "Department",
            "responsible for",
            "administer",
            "authority",
        ],
    },
    FieldGroup {
        field: "penalties",
        keywords: &[
            "penalty",
            "penalties",
            "offence",
            "sanction",
            "fine",
            "liable",
            "enforcement",
            "criminal",
        ],
    },
    FieldGroup {
        field: "payments",
        keywords: &["amount", "allowance", "standard allowance", "£", "element"],
    },
    FieldGroup {
        field: "record_keeping",
        keywords: &[
            "record",
            "report",
            "retain",
            "register",
            "accounts",
            "audit",
            "retention",
            "submit",
        ],
    },
];

/// The checklist, in report order. Every `field` names a [`FIELD_GROUPS`] entry.
pub const CHECKLIST: [Rule; 6] = [
    Rule {
        field: "definitions",
        requirement: "Act must define key terms",
    },
    Rule {
        field: "eligibility",
        requirement: "Act must specify eligibility criteria",
    },
    Rule {
        field: "responsibilities",
        requirement: "Act must specify responsibilities of the administering authority",
    },
    Rule {
        field: "penalties",
        requirement: "Act must include enforcement or penalties",
    },
    Rule {
        field: "payments",
        requirement: "Act must include payment calculation or entitlement structure",
    },
    Rule {
        field: "record_keeping",
        requirement: "Act must include record-keeping or reporting requirements",
    },
];

/// Compiled `(?i)` literal patterns, one inner vec per field group.
static KEYWORD_PATTERNS: Lazy<Vec<Vec<Regex>>> = Lazy::new(|| {
    FIELD_GROUPS
        .iter()
        .map(|group| {
            group
                .keywords
                .iter()
                .map(|kw| Regex::new(&format!("(?i){}", regex::escape(kw))).unwrap())
                .collect()
        })
        .collect()
});

/// One keyword match, with enough context to justify the verdict.
#[derive(Debug, Clone)]
struct Hit {
    section_id: u32,
    heading: String,
    keyword: &'static str,
    snippet: String,
}

/// Run every checklist rule and build the full report for a document.
pub fn build_report(doc: &SectionSet) -> Report {
    let per_group: Vec<Vec<Hit>> = FIELD_GROUPS
        .iter()
        .enumerate()
        .map(|(idx, _)| scan_group(idx, &doc.sections))
        .collect();

    let rule_checks = CHECKLIST
        .iter()
        .map(|rule| {
            let hits = FIELD_GROUPS
                .iter()
                .zip(&per_group)
                .find(|(group, _)| group.field == rule.field)
                .map(|(_, hits)| hits.as_slice())
                .unwrap_or(&[]);
            verdict(rule, hits)
        })
        .collect();

    let fields = FIELD_GROUPS
        .iter()
        .zip(&per_group)
        .map(|(group, hits)| FieldHits {
            field: group.field.to_string(),
            num_hits: hits.len() as u32,
            examples: hits
                .iter()
                .take(MAX_EXAMPLES)
                .map(|h| format!("{} @ {}", h.keyword, h.heading))
                .collect(),
        })
        .collect();

    Report {
        source: doc.source.clone(),
        rule_checks,
        fields,
    }
}

/// Evaluate the checklist without the per-field detail.
pub fn run_checks(doc: &SectionSet) -> Vec<RuleResult> {
    build_report(doc).rule_checks
}

// ── Internals ────────────────────────────────────────────────────────────

/// Scan all sections for one group's keywords, in section order then keyword
/// order — the ordering fixes which hit becomes the evidence snippet.
fn scan_group(group_idx: usize, sections: &[Section]) -> Vec<Hit> {
    let group = &FIELD_GROUPS[group_idx];
    let patterns = &KEYWORD_PATTERNS[group_idx];
    let mut hits = Vec::new();

    for section in sections {
        for (kw, pattern) in group.keywords.iter().zip(patterns) {
            if let Some(m) = pattern.find(&section.raw_text) {
                hits.push(Hit {
                    section_id: section.id,
                    heading: section.heading.clone(),
                    keyword: kw,
                    snippet: snippet_around(&section.raw_text, m.start(), m.end()),
                });
            }
        }
    }
    hits
}

/// Convert a rule's hits into a verdict.
///
/// Confidence: 0.3 on fail; on pass 0.9 plus 0.01 per additional distinct
/// matching section, capped at 0.95.
fn verdict(rule: &Rule, hits: &[Hit]) -> RuleResult {
    if hits.is_empty() {
        return RuleResult {
            rule_name: rule.requirement.to_string(),
            status: RuleStatus::Fail,
            evidence: None,
            confidence: 0.3,
        };
    }

    let mut section_ids: Vec<u32> = hits.iter().map(|h| h.section_id).collect();
    section_ids.sort_unstable();
    section_ids.dedup();
    let confidence = (0.9 + 0.01 * (section_ids.len() - 1) as f64).min(0.95);

    let first = &hits[0];
    RuleResult {
        rule_name: rule.requirement.to_string(),
        status: RuleStatus::Pass,
        evidence: Some(format!("{} — {}", first.heading, first.snippet)),
        confidence,
    }
}

/// Extract up to [`SNIPPET_RADIUS`] characters of context on each side of a
/// match, never splitting a UTF-8 code point.
fn snippet_around(text: &str, match_start: usize, match_end: usize) -> String {
    let mut start = match_start.saturating_sub(SNIPPET_RADIUS);
    while start > 0 && !text.is_char_boundary(start) {
        start -= 1;
    }
    let mut end = (match_end + SNIPPET_RADIUS).min(text.len());
    while end < text.len() && !text.is_char_boundary(end) {
        end += 1;
    }
    text[start..end].trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PageRange;

    fn doc_with(texts: &[&str]) -> SectionSet {
        SectionSet {
            source: "data/act.pdf".into(),
            sections: texts
                .iter()
                .enumerate()
                .map(|(i, t)| Section {
                    id: i as u32 + 1,
                    heading: format!("Section {}", i + 1),
                    raw_text: t.to_string(),
                    page_range: PageRange {
                        start: i as u32 + 1,
                        end: i as u32 + 1,
                    },
                })
                .collect(),
        }
    }

    #[test]
    fn checklist_has_six_rules_over_seven_field_groups() {
        assert_eq!(CHECKLIST.len(), 6);
        assert_eq!(FIELD_GROUPS.len(), 7);
        assert_eq!(KEYWORD_PATTERNS.len(), 7);
        for rule in &CHECKLIST {
            assert!(
                FIELD_GROUPS.iter().any(|g| g.field == rule.field),
                "rule '{}' names an unknown field group",
                rule.field
            );
        }
    }

    #[test]
    fn obligations_appear_in_field_detail_but_back_no_rule() {
        let doc = doc_with(&["A claimant must notify the Department of any change."]);
        let report = build_report(&doc);

        let obligations = report.fields.iter().find(|f| f.field == "obligations").unwrap();
        assert_eq!(obligations.num_hits, 1);
        assert!(obligations.examples[0].starts_with("must @ "));

        assert_eq!(report.rule_checks.len(), 6);
        assert!(report
            .rule_checks
            .iter()
            .all(|c| !c.rule_name.to_lowercase().contains("obligation")));
    }

    #[test]
    fn all_rules_fail_on_unrelated_text() {
        let doc = doc_with(&["The quick brown fox jumps over the lazy dog."]);
        let checks = run_checks(&doc);
        assert!(checks.iter().all(|c| c.status == RuleStatus::Fail));
        assert!(checks.iter().all(|c| c.confidence == 0.3));
        assert!(checks.iter().all(|c| c.evidence.is_none()));
    }

    #[test]
    fn definitions_rule_matches_case_insensitively() {
        let doc = doc_with(&["In this Act, 'claimant' MEANS a person who has made a claim."]);
        let checks = run_checks(&doc);
        let definitions = &checks[0];
        assert_eq!(definitions.rule_name, "Act must define key terms");
        assert_eq!(definitions.status, RuleStatus::Pass);
        let evidence = definitions.evidence.as_ref().unwrap();
        assert!(evidence.starts_with("Section 1 — "));
        assert!(evidence.contains("MEANS"));
    }

    #[test]
    fn confidence_grows_with_matching_sections() {
        let one = doc_with(&["the penalty applies"]);
        let three = doc_with(&["the penalty applies", "an offence is committed", "liable to a fine"]);
        let penalties = |doc: &SectionSet| {
            run_checks(doc)
                .into_iter()
                .find(|c| c.rule_name.contains("enforcement or penalties"))
                .unwrap()
        };
        assert_eq!(penalties(&one).confidence, 0.9);
        assert!((penalties(&three).confidence - 0.92).abs() < 1e-9);
    }

    #[test]
    fn confidence_is_capped() {
        let texts: Vec<String> = (0..10).map(|_| "a penalty applies".to_string()).collect();
        let refs: Vec<&str> = texts.iter().map(String::as_str).collect();
        let doc = doc_with(&refs);
        let penalty = run_checks(&doc)
            .into_iter()
            .find(|c| c.rule_name.contains("enforcement or penalties"))
            .unwrap();
        assert_eq!(penalty.confidence, 0.95);
    }

    #[test]
    fn snippet_is_bounded_and_char_safe() {
        let text = format!("{}penalty{}", "£".repeat(300), "£".repeat(300));
        let m = text.find("penalty").unwrap();
        let snippet = snippet_around(&text, m, m + "penalty".len());
        assert!(snippet.contains("penalty"));
        assert!(snippet.len() <= 2 * SNIPPET_RADIUS + "penalty".len());
    }

    #[test]
    fn payments_rule_matches_pound_sign() {
        let doc = doc_with(&["The standard allowance is £311.68 per month."]);
        let payments = run_checks(&doc)
            .into_iter()
            .find(|c| c.rule_name.contains("payment calculation"))
            .unwrap();
        assert_eq!(payments.status, RuleStatus::Pass);
    }

    #[test]
    fn report_carries_field_detail() {
        let doc = doc_with(&["A claimant is entitled to the standard allowance."]);
        let report = build_report(&doc);
        let eligibility = report.fields.iter().find(|f| f.field == "eligibility").unwrap();
        // "entitled" and "claimant" both match
        assert_eq!(eligibility.num_hits, 2);
        assert!(eligibility.examples[0].contains("@ Section 1"));
    }

    #[test]
    fn report_is_deterministic() {
        let doc = doc_with(&[
            "In this Act 'claimant' means a person.",
            "The Secretary of State must administer the scheme.",
            "A person who fails to keep a record commits an offence.",
        ]);
        let a = serde_json::to_string(&build_report(&doc)).unwrap();
        let b = serde_json::to_string(&build_report(&doc)).unwrap();
        assert_eq!(a, b);
    }
}
