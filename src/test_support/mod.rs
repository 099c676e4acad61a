//! Test utilities and mocks for actiongen unit tests.
//!
//! The resolver talks to the outside world through the [`ManifestReader`]
//! and [`RemoteReader`] traits. The mocks here stand in for SwiftPM and git
//! so resolution and generation can be tested without either installed.
//!
//! # Example
//!
//! ```rust,ignore
//! use actiongen::test_support::{MockManifestReader, MockRemoteReader, PackageFixture};
//!
//! #[test]
//! fn test_example() {
//!     let manifest = MockManifestReader::new(PackageFixture::new("Example").info());
//!     let remote = MockRemoteReader::new("https://github.com/someone/Example.git");
//!
//!     // Hand the mocks to a Resolver...
//! }
//! ```

pub mod fixtures;

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::core::{CompilerId, Configuration, PlatformId, Repo, TestMode};
use crate::sources::{
    ManifestError, ManifestReader, PackageInfo, RemoteError, RemoteInfo, RemoteReader,
};

// Re-export fixtures for convenience
pub use fixtures::*;

/// Mock manifest reader returning a canned package or failure.
#[derive(Debug, Default)]
pub struct MockManifestReader {
    package: Option<PackageInfo>,
    stderr: String,
    calls: RefCell<Vec<PathBuf>>,
}

impl MockManifestReader {
    /// A reader that always returns this package.
    pub fn new(package: PackageInfo) -> Self {
        MockManifestReader {
            package: Some(package),
            ..Default::default()
        }
    }

    /// A reader that fails as if `swift package` exited non-zero.
    pub fn failing(stderr: impl Into<String>) -> Self {
        MockManifestReader {
            package: None,
            stderr: stderr.into(),
            calls: RefCell::new(Vec::new()),
        }
    }

    /// Package roots the reader was asked about.
    pub fn calls(&self) -> Vec<PathBuf> {
        self.calls.borrow().clone()
    }
}

impl ManifestReader for MockManifestReader {
    fn read_manifest(&self, root: &Path) -> Result<PackageInfo, ManifestError> {
        self.calls.borrow_mut().push(root.to_path_buf());
        match &self.package {
            Some(package) => Ok(package.clone()),
            None => Err(ManifestError::Failed {
                command: "swift package dump-package".to_string(),
                status: Some(1),
                stderr: self.stderr.clone(),
            }),
        }
    }
}

/// Mock git metadata reader.
#[derive(Debug, Clone, Default)]
pub struct MockRemoteReader {
    url: Option<String>,
}

impl MockRemoteReader {
    /// A checkout whose remote has this URL.
    pub fn new(url: impl Into<String>) -> Self {
        MockRemoteReader {
            url: Some(url.into()),
        }
    }

    /// A checkout with no usable remote.
    pub fn none() -> Self {
        MockRemoteReader { url: None }
    }
}

impl RemoteReader for MockRemoteReader {
    fn read_remote(&self, _root: &Path) -> Result<RemoteInfo, RemoteError> {
        match &self.url {
            Some(url) => RemoteInfo::parse(url),
            None => Err(RemoteError::NoRemote),
        }
    }
}

/// A resolved build specification for generator tests.
pub fn sample_repo(
    platforms: &[PlatformId],
    compilers: &[CompilerId],
    test: TestMode,
) -> Repo {
    Repo {
        name: "Example".to_string(),
        owner: "someone".to_string(),
        package: "Example".to_string(),
        workflow: "Tests".to_string(),
        platforms: platforms.iter().copied().collect(),
        compilers: compilers.iter().copied().collect(),
        configurations: BTreeSet::from([Configuration::Release]),
        test,
        first_last: true,
        notify: false,
        upload_logs: true,
        header: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_manifest_reader_records_calls() {
        let reader = MockManifestReader::new(PackageFixture::new("Example").info());
        let info = reader.read_manifest(Path::new("/work/Example")).unwrap();
        assert_eq!(info.name, "Example");
        assert_eq!(reader.calls(), vec![PathBuf::from("/work/Example")]);
    }

    #[test]
    fn test_mock_manifest_reader_failure() {
        let reader = MockManifestReader::failing("boom");
        let err = reader.read_manifest(Path::new(".")).unwrap_err();
        assert!(matches!(err, ManifestError::Failed { ref stderr, .. } if stderr == "boom"));
    }

    #[test]
    fn test_mock_remote_reader() {
        let info = MockRemoteReader::new("https://github.com/a/B.git")
            .read_remote(Path::new("."))
            .unwrap();
        assert_eq!((info.owner.as_str(), info.name.as_str()), ("a", "B"));

        assert!(MockRemoteReader::none()
            .read_remote(Path::new("."))
            .is_err());
    }
}
