//! Command implementations

pub mod check_config;
pub mod completions;
pub mod generate;
pub mod init_config;
pub mod show;
