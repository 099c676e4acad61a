//! Swift package manifest source.
//!
//! The manifest is read as the JSON printed by `swift package dump-package`.
//! Only the handful of fields the resolver needs are decoded; everything else
//! in the dump is ignored.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tempfile::TempDir;
use thiserror::Error;

use crate::sources::ManifestReader;
use crate::util::diagnostic::{suggestions, Diagnostic};
use crate::util::process::{find_swift, ProcessBuilder};

/// Error reading the package manifest.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("could not find a `swift` executable")]
    ToolNotFound,

    #[error("failed to run `{command}`: {message}")]
    Launch { command: String, message: String },

    #[error("`{command}` exited with status {}", display_status(.status))]
    Failed {
        command: String,
        status: Option<i32>,
        stderr: String,
    },

    #[error("package manifest is not valid `dump-package` output")]
    Malformed(#[source] serde_json::Error),

    #[error("failed to read manifest dump `{}`", .path.display())]
    ReadDump {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn display_status(status: &Option<i32>) -> String {
    match status {
        Some(code) => code.to_string(),
        None => "unknown".to_string(),
    }
}

impl ManifestError {
    /// Convert to a diagnostic with the tool's own output and suggested fixes.
    pub fn to_diagnostic(&self) -> Diagnostic {
        let diag = Diagnostic::error(self.to_string());

        match self {
            ManifestError::ToolNotFound => diag
                .with_suggestion(suggestions::INSTALL_SWIFT)
                .with_suggestion(suggestions::USE_DUMPED_MANIFEST),
            ManifestError::Launch { .. } => diag.with_suggestion(suggestions::INSTALL_SWIFT),
            ManifestError::Failed { stderr, .. } => stderr
                .lines()
                .map(str::trim_end)
                .filter(|line| !line.is_empty())
                .fold(diag, |diag, line| diag.with_context(line))
                .with_suggestion(suggestions::CHECK_PACKAGE_PATH)
                .with_suggestion(suggestions::USE_ISOLATED),
            ManifestError::Malformed(e) => diag
                .with_context(e.to_string())
                .with_suggestion(suggestions::USE_DUMPED_MANIFEST),
            ManifestError::ReadDump { path, source } => diag
                .with_context(source.to_string())
                .with_location(path),
        }
    }
}

/// The parts of a package manifest the resolver uses.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageInfo {
    pub name: String,
    pub tools_version: ToolsVersion,
    #[serde(default)]
    pub platforms: Vec<PlatformInfo>,
    #[serde(default)]
    pub targets: Vec<TargetInfo>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ToolsVersion {
    #[serde(rename = "_version")]
    pub version: String,
}

/// A minimum deployment target declared by the manifest.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformInfo {
    pub platform_name: String,
    #[serde(default)]
    pub version: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TargetInfo {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl PackageInfo {
    /// Parse `dump-package` JSON.
    pub fn parse(json: &str) -> Result<Self, ManifestError> {
        serde_json::from_str(json).map_err(ManifestError::Malformed)
    }

    pub fn tools_version(&self) -> &str {
        &self.tools_version.version
    }

    pub fn platform_names(&self) -> impl Iterator<Item = &str> {
        self.platforms.iter().map(|p| p.platform_name.as_str())
    }

    pub fn has_test_targets(&self) -> bool {
        self.targets.iter().any(|t| t.kind == "test")
    }
}

/// Reads the manifest by running `swift package dump-package`.
#[derive(Debug, Clone)]
pub struct SwiftPackageReader {
    swift: PathBuf,
    isolated: bool,
}

impl SwiftPackageReader {
    pub fn new(swift: impl Into<PathBuf>) -> Self {
        SwiftPackageReader {
            swift: swift.into(),
            isolated: false,
        }
    }

    /// Use the swift executable found on this machine.
    pub fn locate() -> Result<Self, ManifestError> {
        find_swift()
            .map(SwiftPackageReader::new)
            .ok_or(ManifestError::ToolNotFound)
    }

    /// Use a throwaway scratch directory.
    ///
    /// Needed when invoked from inside another SwiftPM build, which holds a
    /// lock on the package's default `.build` directory.
    pub fn isolated(mut self, isolated: bool) -> Self {
        self.isolated = isolated;
        self
    }
}

impl ManifestReader for SwiftPackageReader {
    fn read_manifest(&self, root: &Path) -> Result<PackageInfo, ManifestError> {
        let scratch = if self.isolated {
            Some(TempDir::new().map_err(|e| ManifestError::Launch {
                command: "swift package dump-package".to_string(),
                message: format!("failed to create scratch directory: {}", e),
            })?)
        } else {
            None
        };

        let mut cmd = ProcessBuilder::new(&self.swift).arg("package").cwd(root);
        if let Some(ref scratch) = scratch {
            cmd = cmd.args([OsStr::new("--scratch-path"), scratch.path().as_os_str()]);
        }
        let cmd = cmd.arg("dump-package");

        let output = cmd.exec().map_err(|e| ManifestError::Launch {
            command: cmd.display_command(),
            message: format!("{:#}", e),
        })?;

        if !output.status.success() {
            return Err(ManifestError::Failed {
                command: cmd.display_command(),
                status: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        let info = PackageInfo::parse(&String::from_utf8_lossy(&output.stdout))?;
        tracing::debug!(
            "Read manifest for `{}` (tools version {})",
            info.name,
            info.tools_version()
        );
        Ok(info)
    }
}

/// Reads a manifest previously dumped to a file.
#[derive(Debug, Clone)]
pub struct DumpFileReader {
    path: PathBuf,
}

impl DumpFileReader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DumpFileReader { path: path.into() }
    }
}

impl ManifestReader for DumpFileReader {
    fn read_manifest(&self, _root: &Path) -> Result<PackageInfo, ManifestError> {
        let json = std::fs::read_to_string(&self.path).map_err(|source| ManifestError::ReadDump {
            path: self.path.clone(),
            source,
        })?;
        PackageInfo::parse(&json)
    }
}
