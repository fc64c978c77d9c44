//! Behavioral properties of analysis and reverse engineering

use pkgmap::{LoaderConfig, PackageSource};
use std::path::Path;

use super::helpers::ProjectTree;

#[tokio::test]
async fn test_analyze_strips_extension_of_deep_main() {
    let tree = ProjectTree::new();
    for (name, main) in [
        ("shallow", "main.js"),
        ("two-deep", "dist/main.js"),
        ("four-deep", "dist/commonjs/es2015/main.js"),
    ] {
        tree.install(name, &format!(r#"{{"main": "{main}"}}"#), &[main]);
    }

    let analyzer = tree.analyzer();
    for (name, expected) in [
        ("shallow", "main"),
        ("two-deep", "dist/main"),
        ("four-deep", "dist/commonjs/es2015/main"),
    ] {
        let description = analyzer.analyze(name).await.unwrap();
        assert_eq!(description.loader_config.main.as_deref(), Some(expected));
        assert_eq!(
            description.loader_config.path,
            Some(format!("../node_modules/{name}"))
        );
    }
}

#[tokio::test]
async fn test_reverse_engineer_is_idempotent() {
    let tree = ProjectTree::new();
    tree.install(
        "my-package2",
        r#"{"main": "dist/commonjs/index.js"}"#,
        &["dist/commonjs/index.js"],
    )
    .install("plain", "{}", &["index.js"])
    .file("some-folder/widget/package.json", r#"{"name": "widget"}"#)
    .file("some-folder/widget/index.js", "")
    .file("vendor/single/deep/er/file.js", "")
    .file("vendor/bare/index.js", "");

    let inputs = vec![
        LoaderConfig::named("my-package").with_path("../node_modules/my-package2"),
        LoaderConfig::named("plain"),
        LoaderConfig::named("widget").with_path("../some-folder/widget"),
        LoaderConfig::named("single").with_path("../vendor/single/deep/er/file"),
        LoaderConfig::named("bare")
            .with_path("../vendor/bare")
            .with_package_root("../vendor/bare"),
        LoaderConfig::named("plain")
            .with_path("../node_modules/plain/lib/helper")
            .with_main("helper.js"),
    ];

    let analyzer = tree.analyzer();
    for input in inputs {
        let first = analyzer.reverse_engineer(&input).await.unwrap();
        let second = analyzer
            .reverse_engineer(&first.loader_config)
            .await
            .unwrap();
        assert_eq!(first, second, "not idempotent for {input:?}");
    }
}

fn assert_descriptor_path(field: &str, value: Option<&str>, input: &LoaderConfig) {
    let Some(value) = value else {
        return;
    };
    assert!(
        !value.starts_with('/') && !value.starts_with("./") && !value.ends_with('/'),
        "{field} '{value}' is not a clean relative path for {input:?}"
    );
    assert!(!Path::new(value).is_absolute());
}

#[tokio::test]
async fn test_output_paths_are_root_relative_for_any_input_form() {
    let tree = ProjectTree::new();
    tree.install("my-package", r#"{"main": "dist/index.js"}"#, &["dist/index.js"])
        .file("vendor/lib/index.js", "")
        .file("vendor/single/entry.js", "");

    let inputs = vec![
        LoaderConfig::named("my-package")
            .with_path(tree.absolute("node_modules/my-package"))
            .with_main("index"),
        LoaderConfig::named("my-package").with_path(tree.absolute("node_modules/my-package")),
        LoaderConfig::named("my-package")
            .with_path("./../node_modules/my-package/")
            .with_main("dist/index.js"),
        LoaderConfig::named("lib")
            .with_path(tree.absolute("vendor/lib"))
            .with_main("index"),
        LoaderConfig::named("lib")
            .with_path("./../vendor/lib/")
            .with_package_root(tree.absolute("vendor/lib")),
        LoaderConfig::named("single").with_path(tree.absolute("vendor/single/entry")),
        LoaderConfig::named("missing").with_path(tree.absolute("vendor/missing")),
    ];

    let analyzer = tree.analyzer();
    for input in inputs {
        let description = analyzer.reverse_engineer(&input).await.unwrap();
        let config = &description.loader_config;
        assert_descriptor_path("path", config.path.as_deref(), &input);
        assert_descriptor_path("packageRoot", config.package_root.as_deref(), &input);
        assert!(config.path.as_deref().is_some_and(|path| path.starts_with("../")));
    }
}

#[tokio::test]
async fn test_reverse_engineer_concrete_scenario() {
    let tree = ProjectTree::new();
    tree.install(
        "my-package2",
        r#"{"main": "dist/commonjs/index.js"}"#,
        &["dist/commonjs/index.js"],
    );

    let input = LoaderConfig::named("my-package").with_path("../node_modules/my-package2");
    let description = tree.analyzer().reverse_engineer(&input).await.unwrap();

    assert_eq!(description.source, PackageSource::Npm);
    assert_eq!(
        description.loader_config,
        LoaderConfig::named("my-package")
            .with_path("../node_modules/my-package2")
            .with_main("dist/commonjs/index")
    );
}

#[tokio::test]
async fn test_deep_file_without_manifest_is_split() {
    let tree = ProjectTree::new();
    tree.file("lib/a/b/c/d/entry.js", "");

    let input = LoaderConfig::named("entry").with_path("../lib/a/b/c/d/entry");
    let description = tree.analyzer().reverse_engineer(&input).await.unwrap();

    assert_eq!(description.source, PackageSource::Custom);
    assert_eq!(
        description.loader_config,
        LoaderConfig::named("entry")
            .with_path("../lib/a/b/c/d")
            .with_main("entry")
            .with_package_root("../lib/a/b/c/d")
    );
}

#[tokio::test]
async fn test_package_root_present_exactly_when_custom() {
    let tree = ProjectTree::new();
    tree.install("npm-pkg", "{}", &["index.js"])
        .file("some-folder/custom-pkg/index.js", "");

    let analyzer = tree.analyzer();
    let inputs = [
        LoaderConfig::named("npm-pkg"),
        LoaderConfig::named("npm-pkg")
            .with_path("../node_modules/npm-pkg")
            .with_package_root("../node_modules/npm-pkg"),
        LoaderConfig::named("custom-pkg").with_path("../some-folder/custom-pkg"),
    ];

    for input in inputs {
        let description = analyzer.reverse_engineer(&input).await.unwrap();
        let config = &description.loader_config;
        assert!(config.path.is_some() && config.main.is_some());
        assert_eq!(
            config.package_root.is_some(),
            description.source == PackageSource::Custom,
            "packageRoot mismatch for {input:?}"
        );
    }
}

#[tokio::test]
async fn test_concurrent_calls_are_independent() {
    let tree = ProjectTree::new();
    tree.install("alpha", r#"{"browser": "alpha.browser.js", "main": "alpha.js"}"#, &["alpha.browser.js", "alpha.js"])
        .install("beta", r#"{"main": "./lib"}"#, &["lib/index.js"]);

    let analyzer = tree.analyzer();
    let reverse_input = LoaderConfig::named("beta").with_path("../node_modules/beta");
    let (alpha, beta, reversed) = tokio::join!(
        analyzer.analyze("alpha"),
        analyzer.analyze("beta"),
        analyzer.reverse_engineer(&reverse_input),
    );

    assert_eq!(
        alpha.unwrap().loader_config.main.as_deref(),
        Some("alpha.browser")
    );
    assert_eq!(beta.unwrap().loader_config.main.as_deref(), Some("lib/index"));
    assert_eq!(
        reversed.unwrap().loader_config.main.as_deref(),
        Some("lib/index")
    );
}
