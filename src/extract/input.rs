//! Input validation: make sure a path really points at a readable PDF.
//!
//! The PDF library's failure mode on arbitrary bytes is an opaque parse
//! error (or worse), so we check existence, read permission, and the `%PDF`
//! magic bytes up front and turn each problem into a specific, actionable
//! [`ActlintError`].

use crate::error::ActlintError;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Validate that `path` exists, is readable, and starts with `%PDF`.
///
/// Returns the owned path on success so callers can thread it into errors
/// without re-borrowing.
pub fn validate_pdf(path: &Path) -> Result<PathBuf, ActlintError> {
    let path = path.to_path_buf();

    if !path.exists() {
        return Err(ActlintError::FileNotFound { path });
    }

    match std::fs::File::open(&path) {
        Ok(mut f) => {
            let mut magic = [0u8; 4];
            match f.read_exact(&mut magic) {
                Ok(()) if &magic != b"%PDF" => {
                    return Err(ActlintError::NotAPdf { path, magic });
                }
                Ok(()) => {}
                // Shorter than 4 bytes cannot be a PDF either.
                Err(_) => {
                    return Err(ActlintError::NotAPdf {
                        path,
                        magic: [0u8; 4],
                    });
                }
            }
        }
        Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
            return Err(ActlintError::PermissionDenied { path });
        }
        Err(_) => {
            return Err(ActlintError::FileNotFound { path });
        }
    }

    debug!("Validated PDF input: {}", path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_is_not_found() {
        let err = validate_pdf(Path::new("/nonexistent/act.pdf")).unwrap_err();
        assert!(matches!(err, ActlintError::FileNotFound { .. }));
    }

    #[test]
    fn wrong_magic_is_not_a_pdf() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("act.pdf");
        std::fs::write(&path, b"PK\x03\x04zipzipzip").unwrap();

        let err = validate_pdf(&path).unwrap_err();
        match err {
            ActlintError::NotAPdf { magic, .. } => assert_eq!(&magic, b"PK\x03\x04"),
            other => panic!("expected NotAPdf, got {other:?}"),
        }
    }

    #[test]
    fn truncated_file_is_not_a_pdf() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tiny.pdf");
        std::fs::write(&path, b"%P").unwrap();

        let err = validate_pdf(&path).unwrap_err();
        assert!(matches!(err, ActlintError::NotAPdf { .. }));
    }

    #[test]
    fn pdf_magic_passes() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("ok.pdf");
        std::fs::write(&path, b"%PDF-1.7\n...").unwrap();

        let validated = validate_pdf(&path).unwrap();
        assert_eq!(validated, path);
    }
}
