pub mod description;
pub mod loader_config;

pub use description::{PackageDescription, PackageSource};
pub use loader_config::LoaderConfig;
