//! Stage 1: PDF text extraction and section segmentation.
//!
//! ## Data Flow
//!
//! ```text
//! path ──▶ input ──▶ pdf-extract ──▶ segment
//! (validate)  (%PDF magic)  (per-page text)  (heading heuristics)
//! ```
//!
//! 1. [`input`] — validate the path and the `%PDF` magic bytes so the PDF
//!    library gets a real PDF rather than crashing on arbitrary bytes
//! 2. `pdf-extract` — per-page plain text; page boundaries are kept so each
//!    section records which pages it came from
//! 3. [`segment`] — split the page stream at heading-like lines into
//!    [`Section`]s with normalised body text
//!
//! Everything here is deterministic: the same PDF always produces the same
//! `SectionSet`, byte-for-byte once serialised.

pub mod input;
pub mod segment;

use crate::error::ActlintError;
use crate::model::SectionSet;
use std::path::Path;
use tracing::{debug, info};

/// Extract and segment a legal PDF into heading-delimited sections.
///
/// # Errors
/// Fatal on a missing/unreadable file, a non-PDF file, a parser failure, or
/// a document with no extractable text (scanned/image-only PDFs). There is
/// no retry: the caller either fixes the input or gives up.
pub fn extract_sections(path: impl AsRef<Path>) -> Result<SectionSet, ActlintError> {
    let path = input::validate_pdf(path.as_ref())?;
    info!("Extracting text from {}", path.display());

    let pages = pdf_extract::extract_text_by_pages(&path).map_err(|e| {
        ActlintError::ExtractionFailed {
            path: path.clone(),
            detail: e.to_string(),
        }
    })?;
    debug!("Extracted {} pages", pages.len());

    if pages.iter().all(|p| p.trim().is_empty()) {
        return Err(ActlintError::NoText { path });
    }

    let sections = segment::segment_pages(&pages);
    info!("Segmented into {} sections", sections.len());

    Ok(SectionSet {
        source: path.display().to_string(),
        sections,
    })
}
