use serde::{Deserialize, Serialize};

/// The `{name, path, main}` record a module loader consumes to locate a
/// dependency.
///
/// All paths are relative to the project root and use forward slashes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoaderConfig {
    /// Module name the loader registers the dependency under
    pub name: String,
    /// Package root directory, or the entry file's location when there is no manifest
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Entry module relative to `path`, without extension
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main: Option<String>,
    /// Marks the dependency as custom, even under a managed directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package_root: Option<String>,
}

impl LoaderConfig {
    /// Create a config carrying only the dependency name
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_main(mut self, main: impl Into<String>) -> Self {
        self.main = Some(main.into());
        self
    }

    pub fn with_package_root(mut self, package_root: impl Into<String>) -> Self {
        self.package_root = Some(package_root.into());
        self
    }
}
