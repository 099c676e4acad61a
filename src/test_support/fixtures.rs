//! Test fixtures for common test scenarios.
//!
//! [`PackageFixture`] builds the JSON `swift package dump-package` prints,
//! trimmed to the fields actiongen reads plus a few it must ignore.

use std::path::{Path, PathBuf};

use serde_json::{json, Value};

use crate::sources::PackageInfo;

/// Fixture for a Swift package manifest dump.
#[derive(Debug, Clone)]
pub struct PackageFixture {
    /// Package name.
    pub name: String,
    /// `toolsVersion._version`.
    pub tools_version: String,
    /// Declared platforms (name, minimum version).
    pub platforms: Vec<(String, String)>,
    /// Targets (name, type).
    pub targets: Vec<(String, String)>,
}

impl PackageFixture {
    /// Create a package with no platforms and no targets.
    pub fn new(name: impl Into<String>) -> Self {
        PackageFixture {
            name: name.into(),
            tools_version: "5.9.0".to_string(),
            platforms: Vec::new(),
            targets: Vec::new(),
        }
    }

    /// A library with a test target, the shape `swift package init` creates.
    pub fn library(name: impl Into<String>) -> Self {
        let name = name.into();
        let tests = format!("{}Tests", name);
        PackageFixture::new(name.clone())
            .target(name, "regular")
            .target(tests, "test")
    }

    pub fn tools_version(mut self, version: impl Into<String>) -> Self {
        self.tools_version = version.into();
        self
    }

    pub fn platform(mut self, name: impl Into<String>, version: impl Into<String>) -> Self {
        self.platforms.push((name.into(), version.into()));
        self
    }

    pub fn target(mut self, name: impl Into<String>, kind: impl Into<String>) -> Self {
        self.targets.push((name.into(), kind.into()));
        self
    }

    /// The dump as a JSON value.
    pub fn to_value(&self) -> Value {
        let platforms: Vec<Value> = self
            .platforms
            .iter()
            .map(|(name, version)| {
                json!({ "platformName": name, "version": version, "options": [] })
            })
            .collect();

        let targets: Vec<Value> = self
            .targets
            .iter()
            .map(|(name, kind)| {
                json!({
                    "name": name,
                    "type": kind,
                    "dependencies": [],
                    "exclude": [],
                    "resources": [],
                    "settings": [],
                })
            })
            .collect();

        json!({
            "name": self.name,
            "manifestDisplayName": self.name,
            "toolsVersion": { "_version": self.tools_version },
            "platforms": platforms,
            "products": [],
            "dependencies": [],
            "targets": targets,
            "cLanguageStandard": null,
            "cxxLanguageStandard": null,
            "swiftLanguageVersions": null,
        })
    }

    /// The dump as pretty-printed JSON text.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(&self.to_value()).unwrap_or_default()
    }

    /// The dump decoded the way the manifest reader decodes it.
    pub fn info(&self) -> PackageInfo {
        PackageInfo::parse(&self.to_json()).expect("fixture produces a valid dump")
    }

    /// Write the dump as `package.json` under `dir`, returning its path.
    pub fn write_to(&self, dir: &Path) -> std::io::Result<PathBuf> {
        std::fs::create_dir_all(dir)?;
        let path = dir.join("package.json");
        std::fs::write(&path, self.to_json())?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_library_fixture() {
        let info = PackageFixture::library("Example").info();
        assert_eq!(info.targets.len(), 2);
        assert!(info.has_test_targets());
        assert_eq!(info.tools_version(), "5.9.0");
    }

    #[test]
    fn test_write_to() {
        let tmp = TempDir::new().unwrap();
        let path = PackageFixture::new("Written")
            .platform("macos", "13.0")
            .write_to(tmp.path())
            .unwrap();

        let info = PackageInfo::parse(&std::fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(info.name, "Written");
        assert_eq!(info.platform_names().collect::<Vec<_>>(), vec!["macos"]);
    }
}
