//! Reverse engineering: reconcile a partial loader config with the disk.
//!
//! The candidate location is probed for a manifest, walking upward within a
//! floor. The outcome is one of three tagged resolutions, each with its own
//! branch below.

use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use super::PackageAnalyzer;
use crate::error::AnalyzerResult;
use crate::fs::{self, EntryKind};
use crate::manifest::{resolve_entry, with_appended_extension, Manifest};
use crate::models::{LoaderConfig, PackageDescription, PackageSource};
use crate::paths::{
    has_segment, managed_package_dir, normalize_module_path,
    strip_module_extension, to_slash,
};
use crate::validation::validate_package_name;

/// How a loader config was tied back to the filesystem
#[derive(Debug)]
enum Resolution {
    /// Manifest found at the candidate location itself
    ViaManifest(Manifest),
    /// Manifest found above the candidate; `consumed` is the part of the
    /// candidate below the manifest's directory
    ViaWalk { manifest: Manifest, consumed: String },
    /// No manifest within the walk floor
    Manifestless,
}

/// Upper bound of the manifest walk
#[derive(Debug)]
enum Floor {
    /// Never above this directory
    Within(PathBuf),
    /// Never at or above the project root
    BelowProject,
}

/// The location a loader config points at
struct Candidate<'a> {
    input: &'a LoaderConfig,
    /// Absolute location to inspect
    target: PathBuf,
    /// Root-relative descriptor form of `target`
    path: String,
    /// Absolute form of a supplied `packageRoot`
    package_root: Option<PathBuf>,
    /// Root-relative descriptor form of `package_root`
    package_root_path: Option<String>,
}

pub(super) async fn reverse_engineer(
    analyzer: &PackageAnalyzer,
    input: &LoaderConfig,
) -> AnalyzerResult<PackageDescription> {
    let candidate = analyzer.candidate(input).await?;

    match analyzer.walk_for_manifest(&candidate).await? {
        Resolution::ViaManifest(manifest) => {
            debug!(package = %input.name, "manifest at candidate location");
            analyzer.from_manifest(&candidate, manifest, None).await
        }
        Resolution::ViaWalk { manifest, consumed } => {
            debug!(package = %input.name, %consumed, "manifest found above candidate location");
            analyzer
                .from_manifest(&candidate, manifest, Some(consumed))
                .await
        }
        Resolution::Manifestless => {
            debug!(package = %input.name, "no manifest, inspecting path on disk");
            analyzer.manifestless(&candidate).await
        }
    }
}

impl PackageAnalyzer {
    async fn candidate<'a>(&self, input: &'a LoaderConfig) -> AnalyzerResult<Candidate<'a>> {
        let package_root = input.package_root.as_deref().map(|root| self.resolve(root));
        let package_root_path = package_root.as_deref().map(|root| self.relative(root));

        if let Some(path) = &input.path {
            let target = self.resolve(path);
            return Ok(Candidate {
                input,
                path: self.relative(&target),
                target,
                package_root,
                package_root_path,
            });
        }

        validate_package_name(&input.name)?;
        let target = match self.locate_installed(&input.name).await? {
            Some(dir) => dir,
            None => self
                .root
                .join(&self.settings.managed_dir)
                .join(&input.name),
        };

        Ok(Candidate {
            input,
            path: self.relative(&target),
            target,
            package_root,
            package_root_path,
        })
    }

    fn walk_floor(&self, candidate: &Candidate<'_>) -> Floor {
        if let Some(package_root) = &candidate.package_root {
            return Floor::Within(package_root.clone());
        }
        // A managed segment at or above the project root belongs to the
        // project's own install location, not to the dependency.
        match managed_package_dir(&candidate.target, &self.settings.managed_dir) {
            Some(package_dir) if !self.root.starts_with(&package_dir) => {
                Floor::Within(package_dir)
            }
            _ => Floor::BelowProject,
        }
    }

    /// Directories to probe, nearest first. The target itself is always
    /// probed, except when a supplied package root does not contain it; the
    /// package root alone is probed then.
    fn walk_dirs(&self, target: &Path, floor: &Floor) -> Vec<PathBuf> {
        match floor {
            Floor::Within(floor) if !target.starts_with(floor) => vec![floor.clone()],
            Floor::Within(floor) => target
                .ancestors()
                .take_while(|dir| dir.starts_with(floor))
                .map(Path::to_path_buf)
                .collect(),
            Floor::BelowProject => target
                .ancestors()
                .enumerate()
                .take_while(|(depth, dir)| *depth == 0 || !self.root.starts_with(dir))
                .map(|(_, dir)| dir.to_path_buf())
                .collect(),
        }
    }

    async fn walk_for_manifest(&self, candidate: &Candidate<'_>) -> AnalyzerResult<Resolution> {
        let floor = self.walk_floor(candidate);

        for dir in self.walk_dirs(&candidate.target, &floor) {
            let Some(manifest) = Manifest::probe(&dir, &self.settings).await? else {
                continue;
            };

            let consumed = match candidate.target.strip_prefix(&dir) {
                Ok(rest) if !rest.as_os_str().is_empty() => to_slash(rest),
                _ => return Ok(Resolution::ViaManifest(manifest)),
            };
            return Ok(Resolution::ViaWalk { manifest, consumed });
        }

        Ok(Resolution::Manifestless)
    }

    async fn from_manifest(
        &self,
        candidate: &Candidate<'_>,
        manifest: Manifest,
        consumed: Option<String>,
    ) -> AnalyzerResult<PackageDescription> {
        let input = candidate.input;
        let root_path = self.relative(manifest.dir());
        let source = self.classify(input, &root_path);

        let (path, main) = match (&input.main, consumed) {
            (Some(main), _) => (candidate.path.clone(), self.module_name(main)),
            (None, Some(consumed)) => (root_path.clone(), self.module_name(&consumed)),
            (None, None) => (root_path.clone(), self.manifest_main(input, &manifest).await?),
        };

        let loader_config = LoaderConfig {
            name: input.name.clone(),
            path: Some(path),
            main: Some(main),
            package_root: self.package_root_for(candidate, source, root_path),
        };

        Ok(PackageDescription::new(
            source,
            loader_config,
            manifest.metadata,
        ))
    }

    async fn manifestless(&self, candidate: &Candidate<'_>) -> AnalyzerResult<PackageDescription> {
        let input = candidate.input;
        let supplied_main = input.main.as_deref().map(|main| self.module_name(main));
        let kind = fs::probe_kind(&candidate.target).await?;

        let below_package_root = candidate.package_root.as_ref().and_then(|root| {
            candidate
                .target
                .strip_prefix(root)
                .ok()
                .filter(|rest| !rest.as_os_str().is_empty())
                .map(to_slash)
        });

        let (path, main) = match (kind, below_package_root) {
            (EntryKind::Dir, _) => {
                let main = match supplied_main {
                    Some(main) => Some(main),
                    None => self.conventional_entry_in(&candidate.target).await?,
                };
                (candidate.path.clone(), main)
            }
            (_, Some(rest)) => (
                candidate.package_root_path.clone().unwrap_or_default(),
                Some(supplied_main.unwrap_or_else(|| self.module_name(&rest))),
            ),
            (kind, None) => match self.module_file(&candidate.target, kind).await? {
                Some(file) => self.split_file(&file),
                None => (candidate.path.clone(), supplied_main),
            },
        };

        let main = main.unwrap_or_else(|| {
            warn!(
                package = %input.name,
                path = %path,
                "package has no manifest and no entry file, falling back to {}",
                self.settings.default_entry
            );
            self.settings.default_entry_module()
        });

        let source = self.classify(input, &path);
        let loader_config = LoaderConfig {
            name: input.name.clone(),
            package_root: self.package_root_for(candidate, source, path.clone()),
            path: Some(path),
            main: Some(main),
        };

        Ok(PackageDescription::new(
            source,
            loader_config,
            PackageDescription::empty_metadata(),
        ))
    }

    /// Entry declared by the manifest; falls back to the declared module path
    /// when it does not resolve to a file.
    async fn manifest_main(&self, input: &LoaderConfig, manifest: &Manifest) -> AnalyzerResult<String> {
        let declared = manifest
            .declared_entry(&self.settings.entry_fields)
            .unwrap_or(self.settings.default_entry.as_str());

        match resolve_entry(manifest.dir(), declared, &self.settings).await? {
            Some(entry) => Ok(entry.module),
            None => {
                warn!(
                    package = %input.name,
                    entry = declared,
                    "package has no valid main file, keeping the declared entry"
                );
                Ok(self.module_name(declared))
            }
        }
    }

    /// `index` when the conventional entry exists in `dir`
    async fn conventional_entry_in(&self, dir: &Path) -> AnalyzerResult<Option<String>> {
        if fs::is_file(&dir.join(&self.settings.default_entry)).await? {
            Ok(Some(self.settings.default_entry_module()))
        } else {
            Ok(None)
        }
    }

    /// The file `target` denotes, as written or with a module extension
    async fn module_file(&self, target: &Path, kind: EntryKind) -> AnalyzerResult<Option<PathBuf>> {
        if kind == EntryKind::File {
            return Ok(Some(target.to_path_buf()));
        }
        for ext in &self.settings.module_extensions {
            let file = with_appended_extension(target, ext);
            if fs::is_file(&file).await? {
                return Ok(Some(file));
            }
        }
        Ok(None)
    }

    /// `{path: parent, main: basename}` for a single-file package
    fn split_file(&self, file: &Path) -> (String, Option<String>) {
        let parent = file.parent().unwrap_or(self.root.as_path());
        let basename = file
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        (self.relative(parent), Some(self.module_name(&basename)))
    }

    fn module_name(&self, module: &str) -> String {
        strip_module_extension(&normalize_module_path(module), &self.settings.module_extensions)
    }

    fn classify(&self, input: &LoaderConfig, resolved_path: &str) -> PackageSource {
        if input.package_root.is_none() && has_segment(resolved_path, &self.settings.managed_dir) {
            PackageSource::Npm
        } else {
            PackageSource::Custom
        }
    }

    fn package_root_for(
        &self,
        candidate: &Candidate<'_>,
        source: PackageSource,
        resolved_path: String,
    ) -> Option<String> {
        match source {
            PackageSource::Npm => None,
            PackageSource::Custom => Some(
                candidate
                    .package_root_path
                    .clone()
                    .unwrap_or(resolved_path),
            ),
        }
    }
}
