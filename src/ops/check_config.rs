//! Implementation of `actiongen check-config`.

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::core::settings::settings_path;
use crate::core::Settings;
use crate::util::diagnostic::SettingsSyntaxError;
use crate::util::fs::read_to_string;

/// Outcome of checking an override file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigStatus {
    /// No override file; generation uses detected values and defaults
    Missing(PathBuf),

    /// The file parsed cleanly
    Valid(PathBuf),
}

/// Strictly parse the override file of the package at `root`.
///
/// A malformed file is an error carrying a [`SettingsSyntaxError`], which
/// points at the offending line and column.
pub fn check_config(root: &Path) -> Result<ConfigStatus> {
    let path = settings_path(root);
    if !path.exists() {
        return Ok(ConfigStatus::Missing(path));
    }

    let contents = read_to_string(&path)?;
    if let Err(e) = serde_json::from_str::<Settings>(&contents) {
        return Err(SettingsSyntaxError::new(&path, contents, &e).into());
    }

    tracing::debug!("{} is valid", path.display());
    Ok(ConfigStatus::Valid(path))
}
