//! Shared helpers for command implementations.

use anyhow::{Context, Result};
use colored::Colorize;
use serde::Serialize;
use std::path::PathBuf;

use crate::analyzer::PackageAnalyzer;
use crate::config::Settings;
use crate::models::{PackageDescription, PackageSource};

/// Project root plus the settings loaded from it
#[derive(Debug, Clone)]
pub struct Workspace {
    pub root: PathBuf,
    pub settings: Settings,
}

impl Workspace {
    /// Load settings for `root`, defaulting to the current directory.
    pub fn load(root: Option<PathBuf>) -> Result<Self> {
        let root = match root {
            Some(root) => root,
            None => std::env::current_dir().context("Failed to get current directory")?,
        };
        if !root.is_dir() {
            anyhow::bail!("Project root {} is not a directory", root.display());
        }

        let settings = Settings::load(&root)?;
        Ok(Self { root, settings })
    }

    pub fn analyzer(&self) -> Result<PackageAnalyzer> {
        PackageAnalyzer::with_settings(&self.root, self.settings.analyzer.clone())
            .with_context(|| format!("Failed to open project root {}", self.root.display()))
    }
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{rendered}");
    Ok(())
}

/// Human-readable rendering of one description
pub fn print_description(description: &PackageDescription) {
    let config = &description.loader_config;
    let source = match description.source {
        PackageSource::Npm => description.source.to_string().green(),
        PackageSource::Custom => description.source.to_string().yellow(),
    };

    println!("{} {} ({})", "✓".green().bold(), config.name.bold(), source);
    println!("  path: {}", config.path.as_deref().unwrap_or("-"));
    println!("  main: {}", config.main.as_deref().unwrap_or("-"));
    if let Some(package_root) = &config.package_root {
        println!("  packageRoot: {package_root}");
    }
    if let Some(declared) = description.declared_name() {
        if declared != config.name {
            println!("  {} manifest declares name '{}'", "note:".dimmed(), declared);
        }
    }
}
