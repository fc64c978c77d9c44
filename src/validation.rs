//! Dependency name validation.
//!
//! Names are joined onto managed-directory paths, so anything that could
//! escape that directory is rejected before the filesystem is touched.

use crate::error::{AnalyzerError, AnalyzerResult};

/// Maximum length of a package name accepted by the npm registry.
pub const MAX_NAME_LENGTH: usize = 214;

/// Validates that a dependency name is safe to use as a lookup path.
///
/// A name is valid if:
/// - It is not empty and at most MAX_NAME_LENGTH characters
/// - It is a single segment, or `@scope/name`
/// - No segment is `.` or `..`
/// - It contains no whitespace, backslashes or control characters
///
/// # Examples
///
/// ```
/// use pkgmap::validation::validate_package_name;
///
/// assert!(validate_package_name("aurelia-fetch-client").is_ok());
/// assert!(validate_package_name("@scope/pkg").is_ok());
/// assert!(validate_package_name("").is_err());
/// assert!(validate_package_name("../etc").is_err());
/// ```
pub fn validate_package_name(name: &str) -> AnalyzerResult<()> {
    let invalid = |reason: &str| AnalyzerError::InvalidPackageName {
        name: name.to_string(),
        reason: reason.to_string(),
    };

    if name.is_empty() {
        return Err(invalid("name cannot be empty"));
    }

    if name.len() > MAX_NAME_LENGTH {
        return Err(invalid(&format!(
            "name too long: {} characters (max {MAX_NAME_LENGTH})",
            name.len()
        )));
    }

    if name
        .chars()
        .any(|c| c.is_whitespace() || c.is_control() || c == '\\')
    {
        return Err(invalid(
            "name contains whitespace, control characters or backslashes",
        ));
    }

    let segments: Vec<&str> = name.split('/').collect();
    match segments.as_slice() {
        [single] => check_segment(single).map_err(invalid)?,
        [scope, pkg] if scope.starts_with('@') => {
            if scope.len() == 1 {
                return Err(invalid("scope cannot be empty"));
            }
            check_segment(pkg).map_err(invalid)?;
        }
        _ => return Err(invalid("only '@scope/name' may contain a slash")),
    }

    Ok(())
}

fn check_segment(segment: &str) -> Result<(), &'static str> {
    match segment {
        "" => Err("name has an empty segment"),
        "." | ".." => Err("name cannot be a relative path segment"),
        _ => Ok(()),
    }
}

/// Clap value parser for validating package name arguments.
pub fn clap_package_name_validator(s: &str) -> Result<String, String> {
    validate_package_name(s).map_err(|e| e.to_string())?;
    Ok(s.to_string())
}
