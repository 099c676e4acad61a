//! High-level operations.
//!
//! This module contains the implementation of actiongen commands.

pub mod check_config;
pub mod generate;
pub mod init_config;
pub mod resolve;
pub mod show;

pub use check_config::{check_config, ConfigStatus};
pub use generate::{generate, generate_resolved, GenerateOptions, GenerateResult};
pub use init_config::{init_config, InitConfigOptions};
pub use resolve::{resolve_package, Resolved, ResolveOptions};
pub use show::{format_resolved, show};
