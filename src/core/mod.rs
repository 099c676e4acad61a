//! Core data structures for actiongen.
//!
//! - Static catalogs of platforms, compilers and configurations
//! - Per-package override settings
//! - The resolved build specification
//! - The selection policy that turns a resolved package into a job matrix

pub mod catalog;
pub mod repo;
pub mod selection;
pub mod settings;

pub use catalog::{Catalog, Compiler, CompilerId, Configuration, Platform, PlatformId};
pub use repo::{Defaults, Repo, TestMode};
pub use selection::Matrix;
pub use settings::{Settings, SettingsError, SETTINGS_FILE};
