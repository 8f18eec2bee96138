//! # actlint
//!
//! Extract, summarise, and rule-check legal acts from PDF.
//!
//! ## Pipeline Overview
//!
//! ```text
//! data/act.pdf
//!  │
//!  ├─ 1. Extract    per-page text via pdf-extract, heading-heuristic
//!  │                segmentation            → outputs/extracted_sections.json
//!  ├─ 2. Summarize  chunk long sections, one chat-completion call per chunk,
//!  │                merge labelled bullets  → outputs/summary.json
//!  └─ 3. Check      fixed six-rule keyword checklist with evidence snippets
//!                   and confidence scores   → outputs/report.json
//! ```
//!
//! Each stage is an independent binary (`actlint-extract`, `actlint-summarize`,
//! `actlint-check`); the JSON files on disk are the only handoff between them.
//! Stages run sequentially and single-threaded — the one blocking operation is
//! the awaited HTTP call per chunk in the summarizer.
//!
//! The extractor and the checker are fully deterministic: re-running either on
//! the same input produces byte-identical output. Only the summarizer talks to
//! the network (an OpenAI-compatible chat completions endpoint, authenticated
//! via `OPENAI_API_KEY`).
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use actlint::{extract_sections, rules};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let doc = extract_sections("data/act.pdf")?;
//!     let report = rules::build_report(&doc);
//!     for check in &report.rule_checks {
//!         println!("{}: {}", check.rule_name, check.status);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the three binaries (clap + anyhow + tracing-subscriber + indicatif) |

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod error;
pub mod extract;
pub mod model;
pub mod progress;
pub mod prompts;
pub mod rules;
pub mod store;
pub mod summarize;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{SummarizeConfig, SummarizeConfigBuilder};
pub use error::ActlintError;
pub use extract::extract_sections;
pub use model::{
    PageRange, Report, RuleResult, RuleStatus, Section, SectionSet, SectionSummary, SummarySet,
};
pub use progress::{NoopProgressCallback, ProgressCallback, SummarizeProgressCallback};
pub use summarize::{summarize_section, summarize_sections};
