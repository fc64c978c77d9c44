pub mod analyzer;
pub mod commands;
pub mod config;
pub mod error;
pub mod fs;
pub mod logging;
pub mod manifest;
pub mod models;
pub mod paths;
pub mod validation;

pub use analyzer::PackageAnalyzer;
pub use error::{AnalyzerError, AnalyzerResult};
pub use models::{LoaderConfig, PackageDescription, PackageSource};
