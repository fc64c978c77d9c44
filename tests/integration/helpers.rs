//! Shared test helpers: temporary project trees

use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

use pkgmap::PackageAnalyzer;

/// A temporary tree whose project root is `<temp>/src`
pub struct ProjectTree {
    temp: TempDir,
}

impl ProjectTree {
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        fs::create_dir_all(temp.path().join("src")).expect("Failed to create project root");
        Self { temp }
    }

    /// Write a file relative to the tree (not the project root)
    pub fn file(&self, rel: &str, content: &str) -> &Self {
        let path = self.temp.path().join(rel);
        fs::create_dir_all(path.parent().unwrap()).expect("Failed to create parent directory");
        fs::write(&path, content).expect("Failed to write file");
        self
    }

    /// Install a package under `node_modules` with the given manifest and files
    pub fn install(&self, name: &str, manifest: &str, files: &[&str]) -> &Self {
        let dir = format!("node_modules/{name}");
        self.file(&format!("{dir}/package.json"), manifest);
        for file in files {
            self.file(&format!("{dir}/{file}"), "module.exports = {};");
        }
        self
    }

    /// Absolute location of a tree-relative path, as a descriptor string
    pub fn absolute(&self, rel: &str) -> String {
        self.temp.path().join(rel).to_string_lossy().into_owned()
    }

    pub fn project_root(&self) -> PathBuf {
        self.temp.path().join("src")
    }

    pub fn analyzer(&self) -> PackageAnalyzer {
        PackageAnalyzer::new(self.project_root()).expect("Failed to create analyzer")
    }
}
