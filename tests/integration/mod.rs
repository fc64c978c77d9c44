//! Integration tests for pkgmap
//!
//! These tests drive the public analyzer API and the `pkgmap` binary against
//! project trees built in temporary directories.

pub mod cli;
pub mod helpers;
pub mod properties;
