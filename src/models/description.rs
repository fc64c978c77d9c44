use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use super::LoaderConfig;

/// Where a dependency comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageSource {
    /// Installed by the package manager under the managed directory
    Npm,
    /// Placed elsewhere in the project tree, or pinned via `packageRoot`
    Custom,
}

impl fmt::Display for PackageSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PackageSource::Npm => write!(f, "npm"),
            PackageSource::Custom => write!(f, "custom"),
        }
    }
}

/// Loader configuration combined with the package's manifest contents
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageDescription {
    pub source: PackageSource,
    pub loader_config: LoaderConfig,
    /// Parsed manifest, or an empty object when the package has none
    pub metadata: Value,
}

impl PackageDescription {
    pub fn new(source: PackageSource, loader_config: LoaderConfig, metadata: Value) -> Self {
        Self {
            source,
            loader_config,
            metadata,
        }
    }

    /// Metadata placeholder for manifest-less packages
    pub fn empty_metadata() -> Value {
        Value::Object(Map::new())
    }

    /// The `name` declared by the manifest, if any
    pub fn declared_name(&self) -> Option<&str> {
        self.metadata.get("name").and_then(Value::as_str)
    }
}
