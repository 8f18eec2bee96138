//! JSON persistence between pipeline stages.
//!
//! The filesystem is the only handoff between the three binaries, so the
//! invariants live here: reads distinguish "the upstream stage never ran"
//! from "the file is torn", and writes are atomic (temp file + rename) so a
//! crash mid-write never leaves a half-serialised file for the next stage to
//! trip over.

use crate::error::ActlintError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;
use tracing::debug;

/// Read and deserialise a stage input file.
///
/// `hint` is printed below the error when the file is missing — name the
/// binary the user has to run first.
pub fn read_json<T: DeserializeOwned>(path: &Path, hint: &str) -> Result<T, ActlintError> {
    if !path.exists() {
        return Err(ActlintError::MissingInput {
            path: path.to_path_buf(),
            hint: hint.to_string(),
        });
    }

    let raw = std::fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::PermissionDenied {
            ActlintError::PermissionDenied {
                path: path.to_path_buf(),
            }
        } else {
            ActlintError::Internal(format!("read {}: {}", path.display(), e))
        }
    })?;

    serde_json::from_str(&raw).map_err(|e| ActlintError::MalformedJson {
        path: path.to_path_buf(),
        detail: e.to_string(),
    })
}

/// Serialise `value` as pretty JSON and write it atomically.
///
/// Writes to `<path>.tmp` in the same directory, then renames over the
/// target. Parent directories are created as needed.
pub fn write_json<T: Serialize>(path: impl AsRef<Path>, value: &T) -> Result<(), ActlintError> {
    let path = path.as_ref();
    let io_err = |source| ActlintError::OutputWriteFailed {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
    }

    let json = serde_json::to_string_pretty(value)
        .map_err(|e| ActlintError::Internal(format!("serialise {}: {}", path.display(), e)))?;

    // Rename is atomic only within a filesystem, hence a sibling temp file
    // rather than tempfile's default directory.
    let tmp_path = path.with_extension("json.tmp");
    std::fs::write(&tmp_path, json.as_bytes()).map_err(io_err)?;
    std::fs::rename(&tmp_path, path).map_err(io_err)?;

    debug!("Wrote {}", path.display());
    Ok(())
}
