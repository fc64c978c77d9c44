//! Package manifest probing and entry-file resolution.

use serde_json::Value;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::config::AnalyzerSettings;
use crate::error::{AnalyzerError, AnalyzerResult};
use crate::fs;
use crate::paths::{normalize_module_path, normalize_path, relative_slash, strip_module_extension};

/// A parsed manifest and where it was read from
#[derive(Debug, Clone)]
pub struct Manifest {
    pub path: PathBuf,
    pub metadata: Value,
}

impl Manifest {
    /// Read `<dir>/<manifest_file>` if it exists.
    ///
    /// # Returns
    /// * `Ok(Some(Manifest))` - manifest found and parsed
    /// * `Ok(None)` - no manifest in `dir`
    /// * `Err(_)` - the manifest could not be read or is not valid JSON
    pub async fn probe(dir: &Path, settings: &AnalyzerSettings) -> AnalyzerResult<Option<Self>> {
        let path = dir.join(&settings.manifest_file);
        let Some(content) = fs::read_optional(&path).await? else {
            return Ok(None);
        };

        let metadata = serde_json::from_str(&content).map_err(|source| {
            AnalyzerError::InvalidManifest {
                path: path.clone(),
                source,
            }
        })?;
        debug!(manifest = %path.display(), "read package metadata");

        Ok(Some(Self { path, metadata }))
    }

    /// The package directory this manifest describes
    pub fn dir(&self) -> &Path {
        self.path.parent().unwrap_or(&self.path)
    }

    /// The entry module as declared: the first of `fields` holding a
    /// non-empty string. Object-form `browser` maps are skipped.
    pub fn declared_entry<'a>(&'a self, fields: &[String]) -> Option<&'a str> {
        fields
            .iter()
            .filter_map(|field| self.metadata.get(field).and_then(Value::as_str))
            .find(|value| !value.trim().is_empty())
    }
}

/// An entry file located on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedEntry {
    /// Absolute path of the file
    pub file: PathBuf,
    /// Module path relative to the package directory, extension stripped
    pub module: String,
}

/// Where an entry declared as `declared` is expected to live
pub fn expected_entry_path(package_dir: &Path, declared: &str) -> PathBuf {
    normalize_path(&package_dir.join(normalize_module_path(declared)))
}

/// Resolve a declared entry against a package directory the way Node's
/// loader would: the exact file, then with each module extension appended,
/// then as a directory holding the conventional entry.
pub async fn resolve_entry(
    package_dir: &Path,
    declared: &str,
    settings: &AnalyzerSettings,
) -> AnalyzerResult<Option<ResolvedEntry>> {
    let base = expected_entry_path(package_dir, declared);

    for candidate in entry_candidates(&base, settings) {
        if fs::is_file(&candidate).await? {
            let module = strip_module_extension(
                &relative_slash(package_dir, &candidate),
                &settings.module_extensions,
            );
            debug!(entry = %candidate.display(), %module, "resolved entry file");
            return Ok(Some(ResolvedEntry {
                file: candidate,
                module,
            }));
        }
    }

    Ok(None)
}

fn entry_candidates(base: &Path, settings: &AnalyzerSettings) -> Vec<PathBuf> {
    let mut candidates = vec![base.to_path_buf()];
    candidates.extend(
        settings
            .module_extensions
            .iter()
            .map(|ext| with_appended_extension(base, ext)),
    );

    let index = base.join(&settings.default_entry);
    candidates.push(index);
    let index_stem = base.join(settings.default_entry_module());
    candidates.extend(
        settings
            .module_extensions
            .iter()
            .map(|ext| with_appended_extension(&index_stem, ext)),
    );

    candidates.dedup();
    candidates
}

/// `foo/bar` + `js` -> `foo/bar.js`, keeping any existing dots in the name
pub fn with_appended_extension(path: &Path, ext: &str) -> PathBuf {
    let mut raw: OsString = path.as_os_str().to_owned();
    raw.push(".");
    raw.push(ext);
    PathBuf::from(raw)
}
