//! Async filesystem probes used during resolution.
//!
//! A missing path is an answer, not an error: probes report [`EntryKind::Missing`]
//! for "not found" and "not a directory" and propagate everything else.

use std::io::ErrorKind;
use std::path::Path;

use crate::error::{AnalyzerError, AnalyzerResult};

/// What a path denotes on disk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Dir,
    Missing,
}

/// Stat `path`, following symlinks (linked installs resolve to their target).
pub async fn probe_kind(path: &Path) -> AnalyzerResult<EntryKind> {
    match tokio::fs::metadata(path).await {
        Ok(meta) if meta.is_dir() => Ok(EntryKind::Dir),
        Ok(_) => Ok(EntryKind::File),
        Err(e) if matches!(e.kind(), ErrorKind::NotFound | ErrorKind::NotADirectory) => {
            Ok(EntryKind::Missing)
        }
        Err(e) => Err(AnalyzerError::filesystem(path, e)),
    }
}

pub async fn is_file(path: &Path) -> AnalyzerResult<bool> {
    Ok(probe_kind(path).await? == EntryKind::File)
}

pub async fn is_dir(path: &Path) -> AnalyzerResult<bool> {
    Ok(probe_kind(path).await? == EntryKind::Dir)
}

/// Read a UTF-8 file, returning `None` when it does not exist.
pub async fn read_optional(path: &Path) -> AnalyzerResult<Option<String>> {
    match tokio::fs::read_to_string(path).await {
        Ok(content) => Ok(Some(content)),
        Err(e) if matches!(e.kind(), ErrorKind::NotFound | ErrorKind::NotADirectory) => Ok(None),
        Err(e) => Err(AnalyzerError::filesystem(path, e)),
    }
}
