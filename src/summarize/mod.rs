//! Stage 2: per-section summarisation through a chat-completions API.
//!
//! ## Data Flow
//!
//! ```text
//! sections ──▶ chunk ──▶ llm ──▶ merge
//! (from stage 1)  (overlapping windows)  (one call per chunk)  (labelled bullets)
//! ```
//!
//! 1. [`chunk`] — split long section text into overlapping char windows
//! 2. [`llm`]   — drive the API call with retry/backoff; the only module in
//!    the crate with network I/O
//! 3. [`merge`] — parse labelled bullets and join chunk outputs per field
//!
//! Sections are processed strictly one at a time, chunks within a section
//! likewise — there is no concurrent dispatch. A run over a long Act can
//! still die halfway (network, ^C), so after each section the partial result
//! list is checkpointed to disk; the next invocation picks up where the last
//! one stopped and the checkpoint is deleted once `summary.json` is written.

pub mod chunk;
pub mod llm;
pub mod merge;

pub use llm::LlmClient;

use crate::config::SummarizeConfig;
use crate::error::ActlintError;
use crate::model::{Section, SectionSet, SectionSummary, SummarySet};
use crate::prompts;
use crate::store;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Summarise one section: chunk, call the API per chunk, merge.
pub async fn summarize_section(
    client: &LlmClient,
    section: &Section,
    config: &SummarizeConfig,
) -> Result<SectionSummary, ActlintError> {
    let chunks = chunk::chunk_text(&section.raw_text, config.chunk_chars, config.chunk_overlap);
    debug!(
        "Section {} ('{}'): {} chunk(s)",
        section.id,
        section.heading,
        chunks.len()
    );

    let mut responses = Vec::with_capacity(chunks.len());
    for (i, chunk_text) in chunks.iter().enumerate() {
        let user = prompts::chunk_prompt(&section.heading, i, chunks.len(), chunk_text);
        let response = client.complete(prompts::SYSTEM_PROMPT, &user).await?;
        if response.trim().is_empty() {
            return Err(ActlintError::EmptyCompletion {
                section_id: section.id,
            });
        }
        responses.push(response);
    }

    let summary = merge::merge_chunk_responses(section.id, &responses);
    if summary.is_empty() {
        warn!(
            "Section {}: model output contained no recognised labels",
            section.id
        );
    }
    Ok(summary)
}

/// Summarise every section of a document in order.
///
/// When a [`Checkpoint`] is given, sections already present in it are
/// skipped and the partial list is saved after each section. Checkpoint
/// entries whose `section_id` does not occur in `doc` (a leftover from a
/// run against a different document) are discarded, so every summary in the
/// result references a section of `doc`. The checkpoint file is *not*
/// cleared here — callers clear it after persisting the final
/// [`SummarySet`], so a crash between the two never loses work.
pub async fn summarize_sections(
    doc: &SectionSet,
    config: &SummarizeConfig,
    checkpoint: Option<&Checkpoint>,
) -> Result<SummarySet, ActlintError> {
    let client = LlmClient::new(config)?;
    let mut summaries = checkpoint.map(Checkpoint::load).unwrap_or_default();

    let loaded = summaries.len();
    summaries.retain(|s| doc.section(s.section_id).is_some());
    if summaries.len() < loaded {
        warn!(
            "Ignoring {} checkpoint entr{} for sections not in this document",
            loaded - summaries.len(),
            if loaded - summaries.len() == 1 { "y" } else { "ies" }
        );
    }
    if !summaries.is_empty() {
        info!("Resuming: {} section(s) already summarised", summaries.len());
    }

    let pending = pending_sections(doc, &summaries);
    if let Some(cb) = &config.progress_callback {
        cb.on_run_start(pending.len(), summaries.len());
    }

    for section in pending {
        if let Some(cb) = &config.progress_callback {
            cb.on_section_start(section.id, &section.heading);
        }
        let summary = summarize_section(&client, section, config).await?;
        summaries.push(summary);
        if let Some(cp) = checkpoint {
            cp.save(&summaries)?;
        }
        if let Some(cb) = &config.progress_callback {
            cb.on_section_complete(section.id, summaries.len(), doc.sections.len());
        }
    }

    if let Some(cb) = &config.progress_callback {
        cb.on_run_complete(summaries.len());
    }

    Ok(SummarySet {
        model: config.model.clone(),
        summaries,
    })
}

/// Sections of `doc` not yet covered by `done`, in page order.
pub fn pending_sections<'a>(doc: &'a SectionSet, done: &[SectionSummary]) -> Vec<&'a Section> {
    doc.sections
        .iter()
        .filter(|s| !done.iter().any(|d| d.section_id == s.id))
        .collect()
}

// ── Checkpoint ───────────────────────────────────────────────────────────

/// Resume file for an interrupted summarisation run
/// (`outputs/summary_intermediate.json` by default).
#[derive(Debug, Clone)]
pub struct Checkpoint {
    path: PathBuf,
}

impl Checkpoint {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load previously completed summaries. A missing or torn checkpoint
    /// yields an empty list — the run simply starts from the beginning.
    pub fn load(&self) -> Vec<SectionSummary> {
        match store::read_json::<Vec<SectionSummary>>(&self.path, "") {
            Ok(list) => list,
            Err(ActlintError::MissingInput { .. }) => Vec::new(),
            Err(e) => {
                warn!("Ignoring unreadable checkpoint {}: {}", self.path.display(), e);
                Vec::new()
            }
        }
    }

    /// Persist the partial result list (atomic write).
    pub fn save(&self, summaries: &[SectionSummary]) -> Result<(), ActlintError> {
        store::write_json(&self.path, &summaries)
    }

    /// Remove the checkpoint after the final output is safely on disk.
    /// Best-effort: a leftover file only costs a redundant load next run.
    pub fn clear(&self) {
        if self.path.exists() {
            if let Err(e) = std::fs::remove_file(&self.path) {
                warn!("Could not remove checkpoint {}: {}", self.path.display(), e);
            }
        }
    }
}
