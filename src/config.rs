//! Analyzer settings, optionally loaded from `pkgmap.toml` at the project root.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Name of the optional settings file at the project root
pub const CONFIG_FILE: &str = "pkgmap.toml";

/// Top-level contents of `pkgmap.toml`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Log filter used when RUST_LOG is not set (e.g. "debug", "pkgmap=trace")
    pub log_filter: Option<String>,
    pub analyzer: AnalyzerSettings,
}

/// Filesystem conventions the analyzer resolves against
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerSettings {
    /// Directory holding installed third-party packages
    pub managed_dir: String,
    /// Manifest file name inside a package directory
    pub manifest_file: String,
    /// Entry file assumed when the manifest declares none
    pub default_entry: String,
    /// Manifest fields consulted for the entry file, in priority order
    pub entry_fields: Vec<String>,
    /// Extensions stripped from module paths and probed when resolving entries
    pub module_extensions: Vec<String>,
}

impl Default for AnalyzerSettings {
    fn default() -> Self {
        Self {
            managed_dir: "node_modules".to_string(),
            manifest_file: "package.json".to_string(),
            default_entry: "index.js".to_string(),
            entry_fields: vec!["browser".to_string(), "main".to_string()],
            module_extensions: vec![
                "js".to_string(),
                "cjs".to_string(),
                "mjs".to_string(),
                "json".to_string(),
            ],
        }
    }
}

impl AnalyzerSettings {
    /// Module name of the conventional entry (`index.js` -> `index`)
    pub fn default_entry_module(&self) -> String {
        crate::paths::strip_module_extension(&self.default_entry, &self.module_extensions)
    }
}

impl Settings {
    /// Load settings from `<project_root>/pkgmap.toml`.
    ///
    /// # Returns
    /// * `Ok(Settings)` - parsed settings, or defaults when the file is absent
    /// * `Err(_)` - the file exists but could not be read or parsed
    pub fn load(project_root: &Path) -> Result<Self> {
        let config_path = project_root.join(CONFIG_FILE);
        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;
        let settings: Settings =
            toml::from_str(&content).with_context(|| format!("Failed to parse {CONFIG_FILE}"))?;

        Ok(settings)
    }
}
