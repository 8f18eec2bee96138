//! Error types for the actlint library.
//!
//! Every failure in the pipeline is fatal: a stage either produces its output
//! file completely or exits non-zero with a message. There is no partial-result
//! recovery (the summarizer's resume checkpoint is a convenience for the *next*
//! invocation, not an error-handling path), so a single enum covers the whole
//! taxonomy.
//!
//! Messages carry an actionable hint on a second line where one exists —
//! callers print `{error}` and the user knows what to do next.

use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the actlint library.
#[derive(Debug, Error)]
pub enum ActlintError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// Input file was not found at the given path.
    #[error("PDF file not found: '{path}'\nCheck the path exists and is readable.")]
    FileNotFound { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    /// The file exists and was read, but is not a PDF.
    #[error("File is not a valid PDF: '{path}'\nFirst bytes: {magic:?}")]
    NotAPdf { path: PathBuf, magic: [u8; 4] },

    // ── Extraction errors ─────────────────────────────────────────────────
    /// The PDF library failed to parse the document.
    #[error("Failed to extract text from '{path}': {detail}\nThe file may be corrupt or encrypted.")]
    ExtractionFailed { path: PathBuf, detail: String },

    /// The document parsed but contained no extractable text.
    #[error("No extractable text in '{path}'\nScanned/image-only PDFs are not supported.")]
    NoText { path: PathBuf },

    // ── Stage-handoff errors ──────────────────────────────────────────────
    /// An upstream stage's output file is missing.
    #[error("Missing input file: '{path}'\n{hint}")]
    MissingInput { path: PathBuf, hint: String },

    /// A stage output file exists but cannot be parsed.
    #[error("Malformed JSON in '{path}': {detail}\nDelete the file and re-run the stage that produces it.")]
    MalformedJson { path: PathBuf, detail: String },

    // ── LLM API errors ────────────────────────────────────────────────────
    /// The API key environment variable is not set.
    #[error("{var} is not set in the environment.\nExport your API key: export {var}=sk-...")]
    MissingApiKey { var: String },

    /// The API rejected the credentials (401/403) — retrying cannot help.
    #[error("Authentication failed against the completion API: {detail}\nCheck the OPENAI_API_KEY value.")]
    AuthFailed { detail: String },

    /// The API returned a non-success status after all retries.
    #[error("Completion API error (HTTP {status}) after {attempts} attempts: {detail}")]
    ApiFailed {
        status: u16,
        attempts: u32,
        detail: String,
    },

    /// The HTTP call itself failed (connect error, timeout) after all retries.
    #[error("Completion API unreachable after {attempts} attempts: {detail}\nCheck your network connection.")]
    ApiUnreachable { attempts: u32, detail: String },

    /// The API answered 200 but with no usable choice.
    #[error("Completion API returned an empty response for section {section_id}")]
    EmptyCompletion { section_id: u32 },

    // ── I/O errors ────────────────────────────────────────────────────────
    /// Could not create or write an output file.
    #[error("Failed to write output file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_input_carries_hint() {
        let e = ActlintError::MissingInput {
            path: "outputs/extracted_sections.json".into(),
            hint: "Run `actlint-extract` first.".into(),
        };
        let msg = e.to_string();
        assert!(msg.contains("extracted_sections.json"), "got: {msg}");
        assert!(msg.contains("actlint-extract"), "got: {msg}");
    }

    #[test]
    fn missing_api_key_names_variable() {
        let e = ActlintError::MissingApiKey {
            var: "OPENAI_API_KEY".into(),
        };
        assert!(e.to_string().contains("export OPENAI_API_KEY=sk-..."));
    }

    #[test]
    fn api_failed_display() {
        let e = ActlintError::ApiFailed {
            status: 429,
            attempts: 4,
            detail: "rate limit".into(),
        };
        let msg = e.to_string();
        assert!(msg.contains("429"));
        assert!(msg.contains("4 attempts"));
    }

    #[test]
    fn not_a_pdf_shows_magic() {
        let e = ActlintError::NotAPdf {
            path: "data/act.pdf".into(),
            magic: *b"PK\x03\x04",
        };
        assert!(e.to_string().contains("not a valid PDF"));
    }
}
