//! End-to-end tests of the `pkgmap` binary

use serde_json::Value;
use std::process::{Command, Output};

use super::helpers::ProjectTree;

fn pkgmap(tree: &ProjectTree, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_pkgmap"))
        .arg("--root")
        .arg(tree.project_root())
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to run pkgmap")
}

#[test]
fn test_analyze_json_output() {
    let tree = ProjectTree::new();
    tree.install(
        "my-package",
        r#"{"name": "my-package", "main": "dist/index.js"}"#,
        &["dist/index.js"],
    );

    let output = pkgmap(&tree, &["--json", "analyze", "my-package"]);
    assert!(output.status.success());

    let description: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(description["source"], "npm");
    assert_eq!(description["loaderConfig"]["path"], "../node_modules/my-package");
    assert_eq!(description["loaderConfig"]["main"], "dist/index");
    assert_eq!(description["metadata"]["name"], "my-package");
}

#[test]
fn test_analyze_missing_manifest_fails_with_message() {
    let tree = ProjectTree::new();
    tree.file("node_modules/my-package/index.js", "");

    let output = pkgmap(&tree, &["analyze", "my-package"]);
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Unable to find package metadata (package.json) of my-package"));
}

#[test]
fn test_reverse_json_output() {
    let tree = ProjectTree::new();
    tree.file("some-folder/my-package/foo/bar.js", "");

    let output = pkgmap(
        &tree,
        &[
            "reverse",
            "--json",
            "--name",
            "my-package",
            "--path",
            "../some-folder/my-package/foo/bar",
        ],
    );
    assert!(output.status.success());

    let description: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(description["source"], "custom");
    assert_eq!(
        description["loaderConfig"],
        serde_json::json!({
            "name": "my-package",
            "path": "../some-folder/my-package/foo",
            "main": "bar",
            "packageRoot": "../some-folder/my-package/foo"
        })
    );
}

#[test]
fn test_batch_reports_every_package() {
    let tree = ProjectTree::new();
    tree.install("present", "{}", &["index.js"]);

    let output = pkgmap(&tree, &["batch", "--json", "present", "absent"]);
    assert!(!output.status.success());

    let results: Value = serde_json::from_slice(&output.stdout).unwrap();
    let results = results.as_array().unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0]["loaderConfig"]["main"], "index");
    assert_eq!(results[1]["name"], "absent");
    assert!(results[1]["error"]
        .as_str()
        .unwrap()
        .contains("Unable to find package metadata"));
}

#[test]
fn test_invalid_package_name_rejected_by_parser() {
    let tree = ProjectTree::new();
    let output = pkgmap(&tree, &["analyze", "../escape"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Invalid package name"));
}
