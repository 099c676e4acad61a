//! actiongen - CI workflow generator for Swift packages
//!
//! This crate provides the library behind the `actiongen` command: reading
//! package metadata, resolving build settings, selecting the job matrix and
//! rendering a GitHub Actions workflow plus README status badges.

pub mod core;
pub mod document;
pub mod ops;
pub mod resolver;
pub mod sources;
pub mod util;
pub mod workflow;

/// Test utilities and mocks for actiongen unit tests.
///
/// This module is only available when compiling with `--cfg test` or
/// running tests. It provides mock manifest and git readers plus
/// `dump-package` fixtures.
#[cfg(test)]
pub mod test_support;

pub use core::{Catalog, Matrix, Repo, Settings};
pub use resolver::Resolver;
pub use workflow::Workflow;
