//! Per-package override settings.
//!
//! Users can pin any part of the generated pipeline by placing a
//! `.actiongen.json` file in the package root. Every field is optional; an
//! absent field (or an empty set) means "use the detected or default value".

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use crate::core::catalog::{CompilerId, Configuration, PlatformId};
use crate::util::diagnostic::suggestions;

/// File name of the override settings, relative to the package root.
pub const SETTINGS_FILE: &str = ".actiongen.json";

/// Path of the override settings file for a package.
pub fn settings_path(root: &Path) -> PathBuf {
    root.join(SETTINGS_FILE)
}

/// Check that a workflow name can be used as a file name in `.github/workflows`.
pub fn check_workflow_name(name: &str) -> Result<(), String> {
    if name.trim().is_empty() || name.starts_with('.') || name.contains(['/', '\\']) {
        return Err(format!(
            "invalid workflow name `{}`: expected a plain file name without path separators or a leading dot",
            name
        ));
    }
    Ok(())
}

pub(crate) fn deserialize_workflow_name<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let name = Option::<String>::deserialize(deserializer)?;
    if let Some(name) = &name {
        check_workflow_name(name).map_err(serde::de::Error::custom)?;
    }
    Ok(name)
}

/// Error reading an override settings file.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file `{}`", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse settings file `{}`", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl SettingsError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, SettingsError::Read { source, .. } if source.kind() == std::io::ErrorKind::NotFound)
    }
}

/// A partial override record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Settings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,

    /// Workflow display name, also the stem of the workflow file.
    #[serde(
        default,
        deserialize_with = "deserialize_workflow_name",
        skip_serializing_if = "Option::is_none"
    )]
    pub workflow: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub platforms: Option<BTreeSet<PlatformId>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub compilers: Option<BTreeSet<CompilerId>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub configurations: Option<BTreeSet<Configuration>>,

    /// `true` always runs tests, `false` only builds, absent detects test targets.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub test: Option<bool>,

    /// Only schedule the oldest and newest selected compilers.
    #[serde(rename = "firstlast", skip_serializing_if = "Option::is_none")]
    pub first_last: Option<bool>,

    #[serde(
        rename = "postSlackNotification",
        skip_serializing_if = "Option::is_none"
    )]
    pub notify: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub upload_logs: Option<bool>,

    /// Maintain the badge header in `README.md`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header: Option<bool>,
}

impl Settings {
    /// Load settings from a file.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let contents = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_str(&contents).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load settings, treating an absent or malformed file as "no override".
    ///
    /// A file that exists but cannot be parsed is logged, since it usually
    /// means a typo the user will want to know about.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(settings) => {
                tracing::debug!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) if e.is_not_found() => {
                tracing::debug!("No settings file at {}", path.display());
                Self::default()
            }
            Err(e) => {
                tracing::warn!(
                    "Ignoring settings: {:#}. {}",
                    anyhow::Error::new(e),
                    suggestions::CHECK_SETTINGS
                );
                Self::default()
            }
        }
    }

    /// Pretty JSON with sorted keys.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        let sorted: BTreeMap<String, serde_json::Value> =
            serde_json::from_value(serde_json::to_value(self)?)?;
        let mut json = serde_json::to_string_pretty(&sorted)?;
        json.push('\n');
        Ok(json)
    }

    /// Explicitly selected platforms; an empty set counts as unspecified.
    pub fn platforms(&self) -> Option<&BTreeSet<PlatformId>> {
        self.platforms.as_ref().filter(|s| !s.is_empty())
    }

    pub fn compilers(&self) -> Option<&BTreeSet<CompilerId>> {
        self.compilers.as_ref().filter(|s| !s.is_empty())
    }

    pub fn configurations(&self) -> Option<&BTreeSet<Configuration>> {
        self.configurations.as_ref().filter(|s| !s.is_empty())
    }
}
