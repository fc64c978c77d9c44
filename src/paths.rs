//! Path normalization helpers.
//!
//! Loader descriptors carry forward-slash paths relative to the project root,
//! while the filesystem side works with absolute `PathBuf`s. Everything here is
//! lexical: nothing touches the disk.

use std::path::{Component, Path, PathBuf};

/// Build a path from a descriptor string, accepting either separator.
pub fn from_slash(s: &str) -> PathBuf {
    PathBuf::from(s.replace('\\', "/"))
}

/// Render a path with forward slashes. An empty path renders as `.`.
pub fn to_slash(path: &Path) -> String {
    let rendered = path.to_string_lossy().replace('\\', "/");
    if rendered.is_empty() {
        ".".to_string()
    } else {
        rendered
    }
}

/// Resolve `.` and `..` components without consulting the filesystem.
///
/// Leading `..` components of a relative path are kept; `..` directly under a
/// root is dropped.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => out.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            Component::Normal(segment) => out.push(segment),
        }
    }
    out
}

/// Lexically clean a relative descriptor path (`./a/../b/` becomes `b`).
pub fn clean_relative(s: &str) -> String {
    to_slash(&normalize_path(&from_slash(s)))
}

/// Compute the path of `to` relative to the directory `from`.
///
/// Both inputs are expected to be absolute and normalized.
pub fn relative_path(from: &Path, to: &Path) -> PathBuf {
    let from: Vec<Component<'_>> = from.components().collect();
    let to: Vec<Component<'_>> = to.components().collect();
    let common = from
        .iter()
        .zip(&to)
        .take_while(|(a, b)| a == b)
        .count();

    let mut rel = PathBuf::new();
    for _ in common..from.len() {
        rel.push("..");
    }
    for component in &to[common..] {
        rel.push(component.as_os_str());
    }
    rel
}

/// [`relative_path`] rendered in descriptor form.
pub fn relative_slash(from: &Path, to: &Path) -> String {
    to_slash(&relative_path(from, to))
}

/// Normalize a manifest-style module path: forward slashes, no leading `./`,
/// no trailing slash.
pub fn normalize_module_path(module: &str) -> String {
    let cleaned = clean_relative(module.trim());
    cleaned.trim_end_matches('/').to_string()
}

/// Strip the direct extension of a module path when it is a known module
/// extension. `index.min.js` becomes `index.min`, and `index.min` is left
/// untouched unless `min` itself is listed.
pub fn strip_module_extension(module: &str, extensions: &[String]) -> String {
    let base_start = module.rfind('/').map_or(0, |i| i + 1);
    let basename = &module[base_start..];
    match basename.rfind('.') {
        Some(dot) if dot > 0 => {
            let ext = &basename[dot + 1..];
            if extensions.iter().any(|known| known.eq_ignore_ascii_case(ext)) {
                module[..base_start + dot].to_string()
            } else {
                module.to_string()
            }
        }
        _ => module.to_string(),
    }
}

/// Check whether a slash-form path has `segment` as one of its components.
pub fn has_segment(path: &str, segment: &str) -> bool {
    path.split('/').any(|part| part == segment)
}

/// Locate the package directory implied by a managed-directory path.
///
/// For `.../node_modules/foo/dist/x` this is `.../node_modules/foo`; scoped
/// packages (`node_modules/@scope/foo`) keep both segments. The innermost
/// managed segment wins for nested installs. Returns `None` when the path has
/// no managed segment or ends before the package name.
pub fn managed_package_dir(path: &Path, managed_dir: &str) -> Option<PathBuf> {
    let components: Vec<Component<'_>> = path.components().collect();
    let managed_idx = components
        .iter()
        .rposition(|c| matches!(c, Component::Normal(s) if *s == managed_dir))?;

    let name = components.get(managed_idx + 1)?;
    let mut end = managed_idx + 1;
    if let Component::Normal(first) = name {
        if first.to_string_lossy().starts_with('@') {
            components.get(managed_idx + 2)?;
            end += 1;
        }
    }

    Some(components[..=end].iter().collect())
}
