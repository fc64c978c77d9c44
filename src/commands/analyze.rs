//! Analyze command - describe an installed dependency from its manifest.

use anyhow::Result;

use super::common::{print_description, print_json, Workspace};

/// Execute the analyze command
pub async fn execute(workspace: &Workspace, package_name: String, json: bool) -> Result<()> {
    let analyzer = workspace.analyzer()?;
    let description = analyzer.analyze(&package_name).await?;

    if json {
        print_json(&description)
    } else {
        print_description(&description);
        Ok(())
    }
}
