//! Error types for package analysis.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failures surfaced by [`crate::analyzer::PackageAnalyzer`].
#[derive(Error, Debug)]
pub enum AnalyzerError {
    /// No manifest could be located for a dependency during full analysis
    #[error("Unable to find package metadata ({manifest}) of {name}")]
    MissingManifest { name: String, manifest: String },

    /// The manifest resolved, but its entry file is absent on disk
    #[error("The \"{name}\" package references a main file that does not exist: {}", path.display())]
    MissingEntryFile { name: String, path: PathBuf },

    /// The manifest exists but is not valid JSON
    #[error("Invalid package metadata in {}: {source}", path.display())]
    InvalidManifest {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The dependency name cannot be used to build a lookup path
    #[error("Invalid package name '{name}': {reason}")]
    InvalidPackageName { name: String, reason: String },

    /// Underlying read/stat failure
    #[error("Filesystem error at {}: {source}", path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl AnalyzerError {
    pub(crate) fn filesystem(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Filesystem {
            path: path.into(),
            source,
        }
    }
}

/// Result type for analyzer operations
pub type AnalyzerResult<T> = Result<T, AnalyzerError>;
