//! Persisting the enriched book list as JSON.
//!
//! The file holds one object:
//!
//! ```json
//! {
//!     "want_to_read": [
//!         { "title": "...", "isbn_10": "...", "isbn_13": "..." }
//!     ]
//! }
//! ```
//!
//! Best-effort runs add a `failed` array naming the titles that could not be
//! looked up.

use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::enrichment::{EnrichmentReport, IdentifierRecord, LookupFailure};

/// Serialized shape of the output file
#[derive(Debug, Serialize)]
pub struct BookList<'a> {
    pub want_to_read: &'a [IdentifierRecord],
    #[serde(skip_serializing_if = "no_failures")]
    pub failed: &'a [LookupFailure],
}

impl<'a> From<&'a EnrichmentReport> for BookList<'a> {
    fn from(report: &'a EnrichmentReport) -> Self {
        Self {
            want_to_read: &report.records,
            failed: &report.failures,
        }
    }
}

fn no_failures(failed: &&[LookupFailure]) -> bool {
    failed.is_empty()
}

/// Render a report as four-space indented JSON
pub fn to_json(report: &EnrichmentReport) -> Result<Vec<u8>, OutputError> {
    let mut buf = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    BookList::from(report)
        .serialize(&mut serializer)
        .map_err(OutputError::Serialize)?;
    Ok(buf)
}

/// Reject output paths that can never be written
pub fn validate_path(path: &Path) -> Result<(), OutputError> {
    if path.as_os_str().is_empty() {
        return Err(OutputError::EmptyPath);
    }
    if path.is_dir() {
        return Err(OutputError::IsDirectory(path.to_path_buf()));
    }
    // A bare file name has an empty parent, meaning the working directory
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if !parent.is_dir() {
            return Err(OutputError::MissingParent(parent.to_path_buf()));
        }
    }
    Ok(())
}

/// Write a report to `path`
///
/// Writes to a temp file next to the target, then renames, so a failed write
/// never leaves a truncated list behind.
pub fn write(path: &Path, report: &EnrichmentReport) -> Result<(), OutputError> {
    validate_path(path)?;
    let contents = to_json(report)?;

    let temp_path = path.with_extension("json.tmp");
    std::fs::write(&temp_path, &contents).map_err(|e| OutputError::Write(temp_path.clone(), e))?;
    replace(&temp_path, path)?;

    tracing::info!("Wrote {} records to {:?}", report.records.len(), path);
    Ok(())
}

/// Move the temp file over the target, removing it if the move fails
fn replace(temp_path: &Path, path: &Path) -> Result<(), OutputError> {
    std::fs::rename(temp_path, path).map_err(|e| {
        if let Err(cleanup) = std::fs::remove_file(temp_path) {
            tracing::warn!("Failed to remove {:?}: {}", temp_path, cleanup);
        }
        OutputError::Rename(temp_path.to_path_buf(), path.to_path_buf(), e)
    })
}

/// Output errors
#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    #[error("Output path must not be empty")]
    EmptyPath,

    #[error("Output path {0} is a directory")]
    IsDirectory(PathBuf),

    #[error("Output directory {0} does not exist")]
    MissingParent(PathBuf),

    #[error("Failed to serialize book list: {0}")]
    Serialize(serde_json::Error),

    #[error("Failed to write {0}: {1}")]
    Write(PathBuf, std::io::Error),

    #[error("Failed to rename temp file {0} to {1}: {2}")]
    Rename(PathBuf, PathBuf, std::io::Error),
}
