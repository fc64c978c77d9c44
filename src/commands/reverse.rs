//! Reverse command - reconcile an existing loader config with the disk.

use anyhow::Result;

use super::common::{print_description, print_json, Workspace};
use crate::models::LoaderConfig;

/// Loader config fields as given on the command line
#[derive(Debug, Clone, Default)]
pub struct ReverseArgs {
    pub name: String,
    pub path: Option<String>,
    pub main: Option<String>,
    pub package_root: Option<String>,
}

impl From<ReverseArgs> for LoaderConfig {
    fn from(args: ReverseArgs) -> Self {
        LoaderConfig {
            name: args.name,
            path: args.path,
            main: args.main,
            package_root: args.package_root,
        }
    }
}

/// Execute the reverse command
pub async fn execute(workspace: &Workspace, args: ReverseArgs, json: bool) -> Result<()> {
    let analyzer = workspace.analyzer()?;
    let loader_config = LoaderConfig::from(args);
    let description = analyzer.reverse_engineer(&loader_config).await?;

    if json {
        print_json(&description)
    } else {
        print_description(&description);
        Ok(())
    }
}
