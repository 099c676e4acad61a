//! Global configuration file support.
//!
//! User-wide defaults live in `config.toml` in the platform config directory
//! (for example `~/.config/actiongen/config.toml` on Linux). A different file
//! can be named with `--config` or `ACTIONGEN_CONFIG`.
//!
//! ```toml
//! [defaults]
//! owner = "elegantchaos"
//! workflow = "Tests"
//! test = "auto"
//! first-last = true
//! configurations = ["debug", "release"]
//!
//! [compilers]
//! earliest = "swift58"
//! latest = "swift61"
//! ```

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::catalog::{Catalog, CatalogError, CompilerId, Configuration};
use crate::core::settings::deserialize_workflow_name;
use crate::core::{Defaults, TestMode};

/// Environment variable naming an alternative config file.
pub const CONFIG_ENV: &str = "ACTIONGEN_CONFIG";

/// actiongen configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Defaults for anything a package doesn't decide
    pub defaults: DefaultsConfig,

    /// Compiler catalog markers
    pub compilers: CompilersConfig,
}

/// Overrides for the built-in [`Defaults`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct DefaultsConfig {
    /// Owner used when the checkout has no git remote
    pub owner: Option<String>,
    #[serde(default, deserialize_with = "deserialize_workflow_name")]
    pub workflow: Option<String>,
    pub test: Option<TestMode>,
    pub first_last: Option<bool>,
    pub notify: Option<bool>,
    pub upload_logs: Option<bool>,
    pub header: Option<bool>,
    pub configurations: Option<BTreeSet<Configuration>>,
}

/// Where the compiler selection thresholds sit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CompilersConfig {
    /// Oldest release that still gets a job
    pub earliest: Option<CompilerId>,

    /// Release `swiftLatest` stands for
    pub latest: Option<CompilerId>,
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Load configuration with fallback to defaults if file doesn't exist.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {:#}", path.display(), e);
                Self::default()
            })
        } else {
            tracing::debug!("No config file at {}", path.display());
            Self::default()
        }
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: Config) {
        let defaults = other.defaults;
        if defaults.owner.is_some() {
            self.defaults.owner = defaults.owner;
        }
        if defaults.workflow.is_some() {
            self.defaults.workflow = defaults.workflow;
        }
        if defaults.test.is_some() {
            self.defaults.test = defaults.test;
        }
        if defaults.first_last.is_some() {
            self.defaults.first_last = defaults.first_last;
        }
        if defaults.notify.is_some() {
            self.defaults.notify = defaults.notify;
        }
        if defaults.upload_logs.is_some() {
            self.defaults.upload_logs = defaults.upload_logs;
        }
        if defaults.header.is_some() {
            self.defaults.header = defaults.header;
        }
        if defaults.configurations.is_some() {
            self.defaults.configurations = defaults.configurations;
        }

        if other.compilers.earliest.is_some() {
            self.compilers.earliest = other.compilers.earliest;
        }
        if other.compilers.latest.is_some() {
            self.compilers.latest = other.compilers.latest;
        }
    }

    /// The built-in defaults with this config applied.
    pub fn to_defaults(&self) -> Defaults {
        let builtin = Defaults::default();
        let d = &self.defaults;
        Defaults {
            owner: d.owner.clone().or(builtin.owner),
            workflow: d.workflow.clone().unwrap_or(builtin.workflow),
            test: d.test.unwrap_or(builtin.test),
            first_last: d.first_last.unwrap_or(builtin.first_last),
            notify: d.notify.unwrap_or(builtin.notify),
            upload_logs: d.upload_logs.unwrap_or(builtin.upload_logs),
            header: d.header.unwrap_or(builtin.header),
            configurations: d
                .configurations
                .clone()
                .filter(|c| !c.is_empty())
                .unwrap_or(builtin.configurations),
        }
    }

    /// The standard catalog with this config's compiler markers.
    pub fn catalog(&self) -> Result<Catalog, CatalogError> {
        Catalog::standard().with_markers(self.compilers.earliest, self.compilers.latest)
    }
}

/// Get the default global config path.
pub fn global_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "actiongen").map(|dirs| dirs.config_dir().join("config.toml"))
}

/// Load configuration from `explicit`, or the global location when `None`.
pub fn load_config(explicit: Option<&Path>) -> Config {
    let mut config = Config::default();

    let path = explicit.map(Path::to_path_buf).or_else(global_config_path);
    if let Some(path) = path {
        if explicit.is_some() && !path.exists() {
            tracing::warn!("Config file {} does not exist", path.display());
        }
        config.merge(Config::load_or_default(&path));
    }

    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.to_defaults(), Defaults::default());
        assert_eq!(config.catalog().unwrap().latest(), Catalog::standard().latest());
    }

    #[test]
    fn test_config_load() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.toml");

        std::fs::write(
            &config_path,
            r#"
[defaults]
owner = "elegantchaos"
test = "build"
first-last = false
upload-logs = false
configurations = ["debug", "release"]

[compilers]
earliest = "swift58"
"#,
        )
        .unwrap();

        let config = Config::load(&config_path).unwrap();
        let defaults = config.to_defaults();
        assert_eq!(defaults.owner.as_deref(), Some("elegantchaos"));
        assert_eq!(defaults.workflow, "Tests");
        assert_eq!(defaults.test, TestMode::Build);
        assert!(!defaults.first_last);
        assert!(!defaults.upload_logs);
        assert_eq!(defaults.configurations.len(), 2);

        let catalog = config.catalog().unwrap();
        assert_eq!(catalog.earliest(), CompilerId::Swift58);
        assert_eq!(catalog.latest(), CompilerId::Swift61);
    }

    #[test]
    fn test_config_rejects_unknown_keys() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.toml");
        std::fs::write(&config_path, "[defaults]\nfirstlast = true\n").unwrap();

        assert!(Config::load(&config_path).is_err());
        assert_eq!(Config::load_or_default(&config_path), Config::default());
    }

    #[test]
    fn test_config_rejects_workflow_paths() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.toml");
        std::fs::write(&config_path, "[defaults]\nworkflow = \"../../ci\"\n").unwrap();

        let err = Config::load(&config_path).unwrap_err();
        assert!(format!("{:#}", err).contains("invalid workflow name"));
        assert_eq!(Config::load_or_default(&config_path).to_defaults().workflow, "Tests");
    }

    #[test]
    fn test_config_merge() {
        let mut base = Config::default();
        base.defaults.workflow = Some("CI".to_string());
        base.defaults.notify = Some(true);

        let mut override_cfg = Config::default();
        override_cfg.defaults.workflow = Some("Tests".to_string());
        override_cfg.compilers.latest = Some(CompilerId::Swift60);

        base.merge(override_cfg);

        assert_eq!(base.defaults.workflow.as_deref(), Some("Tests"));
        assert_eq!(base.defaults.notify, Some(true)); // Not overridden
        assert_eq!(base.compilers.latest, Some(CompilerId::Swift60));
    }

    #[test]
    fn test_invalid_markers_are_reported() {
        let mut config = Config::default();
        config.compilers.earliest = Some(CompilerId::SwiftNightly);
        assert!(matches!(
            config.catalog(),
            Err(CatalogError::NotARelease(CompilerId::SwiftNightly))
        ));
    }

    #[test]
    fn test_load_config_explicit_path() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("custom.toml");
        std::fs::write(&config_path, "[defaults]\nworkflow = \"Build\"\n").unwrap();

        let config = load_config(Some(&config_path));
        assert_eq!(config.defaults.workflow.as_deref(), Some("Build"));

        let missing = load_config(Some(&tmp.path().join("missing.toml")));
        assert_eq!(missing, Config::default());
    }
}
