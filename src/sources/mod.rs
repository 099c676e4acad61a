//! Package metadata sources.
//!
//! Sources are the boundary between the resolver and the outside world: the
//! package manifest (read through SwiftPM or from a pre-dumped file) and the
//! git remote of the checkout.

use std::path::Path;

pub mod git;
pub mod package;

pub use git::{GitRemoteReader, RemoteError, RemoteInfo};
pub use package::{DumpFileReader, ManifestError, PackageInfo, SwiftPackageReader};

/// Reads the package manifest for a package root.
pub trait ManifestReader {
    fn read_manifest(&self, root: &Path) -> Result<PackageInfo, ManifestError>;
}

/// Reads repository metadata for a package root.
pub trait RemoteReader {
    fn read_remote(&self, root: &Path) -> Result<RemoteInfo, RemoteError>;
}
