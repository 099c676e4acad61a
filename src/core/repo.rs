//! The resolved build specification.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::catalog::{CompilerId, Configuration, PlatformId};
use crate::core::settings::Settings;

/// Whether jobs run tests or only build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestMode {
    /// Test when the manifest declares test targets.
    #[default]
    Auto,
    Build,
    Test,
}

impl TestMode {
    /// The mode an override's `test` flag selects.
    pub fn from_flag(flag: Option<bool>) -> Self {
        match flag {
            None => TestMode::Auto,
            Some(true) => TestMode::Test,
            Some(false) => TestMode::Build,
        }
    }

    pub fn as_flag(&self) -> Option<bool> {
        match self {
            TestMode::Auto => None,
            TestMode::Build => Some(false),
            TestMode::Test => Some(true),
        }
    }

    /// Expand `Auto` against the manifest's test targets.
    pub fn resolve(self, has_test_targets: bool) -> Self {
        match self {
            TestMode::Auto if has_test_targets => TestMode::Test,
            TestMode::Auto => TestMode::Build,
            other => other,
        }
    }
}

impl fmt::Display for TestMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TestMode::Auto => write!(f, "auto"),
            TestMode::Build => write!(f, "build"),
            TestMode::Test => write!(f, "test"),
        }
    }
}

impl FromStr for TestMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(TestMode::Auto),
            "build" => Ok(TestMode::Build),
            "test" => Ok(TestMode::Test),
            _ => Err(format!(
                "unknown test mode `{}`, expected one of: auto, build, test",
                s
            )),
        }
    }
}

/// Values used for anything neither the override file nor the package
/// metadata decides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Defaults {
    /// Owner used when git metadata has none.
    pub owner: Option<String>,
    pub workflow: String,
    pub test: TestMode,
    pub first_last: bool,
    pub notify: bool,
    pub upload_logs: bool,
    pub header: bool,
    pub configurations: BTreeSet<Configuration>,
}

impl Default for Defaults {
    fn default() -> Self {
        Defaults {
            owner: None,
            workflow: "Tests".to_string(),
            test: TestMode::Auto,
            first_last: true,
            notify: false,
            upload_logs: true,
            header: true,
            configurations: BTreeSet::from([Configuration::Release]),
        }
    }
}

/// A fully resolved build specification.
///
/// Built once by the resolver and read-only afterwards. The test mode is
/// never `Auto` here. The compiler set may still name `swiftLatest`; the
/// selection policy maps it onto the catalog's latest release.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repo {
    /// Repository name, used in badge URLs.
    pub name: String,
    pub owner: String,

    /// Name of the Swift package, used to find Xcode schemes.
    pub package: String,

    pub workflow: String,
    pub platforms: BTreeSet<PlatformId>,
    pub compilers: BTreeSet<CompilerId>,
    pub configurations: BTreeSet<Configuration>,
    pub test: TestMode,
    pub first_last: bool,
    pub notify: bool,
    pub upload_logs: bool,
    pub header: bool,
}

impl Repo {
    pub fn runs_tests(&self) -> bool {
        self.test == TestMode::Test
    }

    /// File name of the generated workflow.
    pub fn workflow_file_name(&self) -> String {
        format!("{}.yml", self.workflow)
    }

    /// An override record stating every resolved field explicitly.
    pub fn to_settings(&self) -> Settings {
        Settings {
            name: Some(self.name.clone()),
            owner: Some(self.owner.clone()),
            workflow: Some(self.workflow.clone()),
            platforms: Some(self.platforms.clone()),
            compilers: Some(self.compilers.clone()),
            configurations: Some(self.configurations.clone()),
            test: self.test.as_flag(),
            first_last: Some(self.first_last),
            notify: Some(self.notify),
            upload_logs: Some(self.upload_logs),
            header: Some(self.header),
        }
    }
}

impl fmt::Display for Repo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn join<T: fmt::Display>(items: &BTreeSet<T>) -> String {
            items
                .iter()
                .map(|i| i.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        }

        writeln!(f, "name:           {}", self.name)?;
        writeln!(f, "owner:          {}", self.owner)?;
        writeln!(f, "package:        {}", self.package)?;
        writeln!(f, "workflow:       {}", self.workflow)?;
        writeln!(f, "platforms:      {}", join(&self.platforms))?;
        writeln!(f, "compilers:      {}", join(&self.compilers))?;
        writeln!(f, "configurations: {}", join(&self.configurations))?;
        writeln!(f, "test:           {}", self.test)?;
        writeln!(f, "first/last:     {}", self.first_last)?;
        writeln!(f, "notify:         {}", self.notify)?;
        writeln!(f, "upload logs:    {}", self.upload_logs)?;
        write!(f, "header:         {}", self.header)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_from_flag() {
        assert_eq!(TestMode::from_flag(None), TestMode::Auto);
        assert_eq!(TestMode::from_flag(Some(true)), TestMode::Test);
        assert_eq!(TestMode::from_flag(Some(false)), TestMode::Build);
    }

    #[test]
    fn test_mode_resolve() {
        assert_eq!(TestMode::Auto.resolve(true), TestMode::Test);
        assert_eq!(TestMode::Auto.resolve(false), TestMode::Build);
        assert_eq!(TestMode::Build.resolve(true), TestMode::Build);
        assert_eq!(TestMode::Test.resolve(false), TestMode::Test);
    }

    #[test]
    fn test_mode_parse() {
        assert_eq!("TEST".parse::<TestMode>().unwrap(), TestMode::Test);
        assert!("sometimes".parse::<TestMode>().is_err());
    }

    #[test]
    fn test_defaults() {
        let defaults = Defaults::default();
        assert_eq!(defaults.workflow, "Tests");
        assert!(defaults.first_last);
        assert!(!defaults.notify);
        assert!(defaults.upload_logs);
        assert_eq!(
            defaults.configurations,
            BTreeSet::from([Configuration::Release])
        );
    }

    #[test]
    fn test_to_settings_is_explicit() {
        let repo = Repo {
            name: "Example".to_string(),
            owner: "someone".to_string(),
            package: "Example".to_string(),
            workflow: "Tests".to_string(),
            platforms: BTreeSet::from([PlatformId::MacOS]),
            compilers: BTreeSet::from([CompilerId::Swift510, CompilerId::SwiftLatest]),
            configurations: BTreeSet::from([Configuration::Release]),
            test: TestMode::Test,
            first_last: true,
            notify: false,
            upload_logs: true,
            header: true,
        };

        let settings = repo.to_settings();
        assert_eq!(settings.test, Some(true));
        assert_eq!(settings.notify, Some(false));
        assert_eq!(settings.compilers.as_ref().map(|c| c.len()), Some(2));
        assert_eq!(repo.workflow_file_name(), "Tests.yml");
    }
}
