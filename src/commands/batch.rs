//! Batch command - analyze several dependencies concurrently.

use anyhow::{bail, Result};
use colored::Colorize;
use serde_json::{json, Value};

use super::common::{print_description, print_json, Workspace};

/// Execute the batch command.
///
/// Every package is reported; the command fails afterwards if any of them
/// could not be analyzed.
pub async fn execute(workspace: &Workspace, package_names: Vec<String>, json: bool) -> Result<()> {
    let analyzer = workspace.analyzer()?;
    let results = analyzer.analyze_all(package_names.as_slice()).await;

    let mut failures = 0;
    let mut rendered: Vec<Value> = Vec::with_capacity(results.len());

    for (name, result) in package_names.iter().zip(&results) {
        match result {
            Ok(description) => {
                if json {
                    rendered.push(serde_json::to_value(description)?);
                } else {
                    print_description(description);
                }
            }
            Err(e) => {
                failures += 1;
                if json {
                    rendered.push(json!({ "name": name, "error": e.to_string() }));
                } else {
                    eprintln!("{} {}: {}", "✗".red().bold(), name.bold(), e);
                }
            }
        }
    }

    if json {
        print_json(&rendered)?;
    }

    if failures > 0 {
        bail!("{failures} of {} packages could not be analyzed", package_names.len());
    }

    Ok(())
}
