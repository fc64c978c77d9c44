//! Package analysis: turning a dependency name or a partial loader config into
//! a complete [`PackageDescription`].
//!
//! The analyzer holds only the project root and its settings. Every call reads
//! the filesystem afresh, so concurrent calls are independent.

mod reconcile;


use futures::future::join_all;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::config::AnalyzerSettings;
use crate::error::{AnalyzerError, AnalyzerResult};
use crate::fs;
use crate::manifest::{expected_entry_path, resolve_entry, Manifest};
use crate::models::{LoaderConfig, PackageDescription, PackageSource};
use crate::paths::{from_slash, normalize_path, relative_slash};
use crate::validation::validate_package_name;

/// Resolves loader descriptors for the dependencies of one project
#[derive(Debug, Clone)]
pub struct PackageAnalyzer {
    root: PathBuf,
    settings: AnalyzerSettings,
}

impl PackageAnalyzer {
    /// Create an analyzer for `project_root` with default settings.
    ///
    /// Relative roots are resolved against the current directory.
    pub fn new<P: AsRef<Path>>(project_root: P) -> AnalyzerResult<Self> {
        Self::with_settings(project_root, AnalyzerSettings::default())
    }

    /// Create an analyzer whose settings override the `node_modules`,
    /// `package.json` and `index.js` conventions.
    pub fn with_settings<P: AsRef<Path>>(
        project_root: P,
        settings: AnalyzerSettings,
    ) -> AnalyzerResult<Self> {
        let project_root = project_root.as_ref();
        let absolute = std::path::absolute(project_root)
            .map_err(|e| AnalyzerError::filesystem(project_root, e))?;

        Ok(Self {
            root: normalize_path(&absolute),
            settings,
        })
    }

    /// Absolute, normalized project root
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Conventions used for every lookup
    pub fn settings(&self) -> &AnalyzerSettings {
        &self.settings
    }

    /// Describe an installed dependency from its manifest.
    ///
    /// # Errors
    /// * `MissingManifest` - no managed directory holds the package, or the
    ///   package has no manifest
    /// * `MissingEntryFile` - the declared entry does not exist on disk
    pub async fn analyze(&self, package_name: &str) -> AnalyzerResult<PackageDescription> {
        validate_package_name(package_name)?;

        let missing_manifest = || AnalyzerError::MissingManifest {
            name: package_name.to_string(),
            manifest: self.settings.manifest_file.clone(),
        };

        let package_dir = self
            .locate_installed(package_name)
            .await?
            .ok_or_else(missing_manifest)?;
        let manifest = Manifest::probe(&package_dir, &self.settings)
            .await?
            .ok_or_else(missing_manifest)?;

        let declared = manifest
            .declared_entry(&self.settings.entry_fields)
            .unwrap_or(self.settings.default_entry.as_str());
        let entry = resolve_entry(&package_dir, declared, &self.settings)
            .await?
            .ok_or_else(|| AnalyzerError::MissingEntryFile {
                name: package_name.to_string(),
                path: expected_entry_path(&package_dir, declared),
            })?;

        let loader_config = LoaderConfig::named(package_name)
            .with_path(self.relative(&package_dir))
            .with_main(entry.module);
        debug!(package = package_name, ?loader_config, "analyzed package");

        Ok(PackageDescription::new(
            PackageSource::Npm,
            loader_config,
            manifest.metadata,
        ))
    }

    /// Run [`analyze`](Self::analyze) for every name concurrently on the
    /// calling task. Results come back in input order; one failure does not
    /// affect the others.
    pub async fn analyze_all<S: AsRef<str>>(
        &self,
        package_names: &[S],
    ) -> Vec<AnalyzerResult<PackageDescription>> {
        join_all(
            package_names
                .iter()
                .map(|name| self.analyze(name.as_ref())),
        )
        .await
    }

    /// Reconcile a partial loader config (as found in a generated or
    /// hand-edited configuration file) with what is on disk.
    ///
    /// The returned config always carries `name`, `path` and `main`;
    /// `packageRoot` is set exactly when the source is custom.
    pub async fn reverse_engineer(
        &self,
        loader_config: &LoaderConfig,
    ) -> AnalyzerResult<PackageDescription> {
        reconcile::reverse_engineer(self, loader_config).await
    }

    /// Find `<managed-dir>/<name>` in the project root or the nearest ancestor
    /// that has one.
    pub async fn locate_installed(&self, package_name: &str) -> AnalyzerResult<Option<PathBuf>> {
        for dir in self.root.ancestors() {
            let candidate = dir.join(&self.settings.managed_dir).join(package_name);
            if fs::is_dir(&candidate).await? {
                debug!(package = package_name, dir = %candidate.display(), "located installed package");
                return Ok(Some(candidate));
            }
        }
        Ok(None)
    }

    /// Absolute location of a root-relative descriptor path
    fn resolve(&self, relative: &str) -> PathBuf {
        normalize_path(&self.root.join(from_slash(relative)))
    }

    /// Descriptor form of an absolute path
    fn relative(&self, absolute: &Path) -> String {
        relative_slash(&self.root, absolute)
    }
}
