//! Settings resolution.
//!
//! Merges the per-package override file, the package manifest and git
//! metadata into one [`Repo`]. Each field takes the first of: explicit
//! override, value derived from metadata, configured default.
//!
//! The manifest is the one mandatory input. Git metadata and the override
//! file are best-effort: when they are missing the resolver quietly falls
//! back to directory names and defaults.

pub mod derive;
pub mod version;

use std::path::Path;

use thiserror::Error;

use crate::core::settings::settings_path;
use crate::core::{Catalog, Defaults, Repo, Settings, TestMode};
use crate::sources::{ManifestError, ManifestReader, PackageInfo, RemoteInfo, RemoteReader};
use crate::util::fs::{file_name_str, normalize_path};

pub use derive::{derive_compilers, derive_platforms};
pub use version::{parse_version_lenient, tools_version_pair};

/// Owner used when nothing else names one.
pub const UNKNOWN_OWNER: &str = "unknown";

/// Error resolving a package.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("failed to read the package manifest")]
    Manifest(#[from] ManifestError),
}

impl ResolveError {
    pub fn manifest_error(&self) -> &ManifestError {
        match self {
            ResolveError::Manifest(e) => e,
        }
    }
}

/// Resolves a package root into a [`Repo`].
pub struct Resolver<'a> {
    catalog: &'a Catalog,
    defaults: &'a Defaults,
    manifest: &'a dyn ManifestReader,
    remote: &'a dyn RemoteReader,
}

impl<'a> Resolver<'a> {
    pub fn new(
        catalog: &'a Catalog,
        defaults: &'a Defaults,
        manifest: &'a dyn ManifestReader,
        remote: &'a dyn RemoteReader,
    ) -> Self {
        Resolver {
            catalog,
            defaults,
            manifest,
            remote,
        }
    }

    /// Resolve using the override file in the package root, if any.
    pub fn resolve(&self, root: &Path) -> Result<Repo, ResolveError> {
        let settings = Settings::load_or_default(&settings_path(root));
        self.resolve_with(root, &settings)
    }

    /// Resolve against an already-loaded override record.
    pub fn resolve_with(&self, root: &Path, settings: &Settings) -> Result<Repo, ResolveError> {
        let root = normalize_path(root);

        let remote = match self.remote.read_remote(&root) {
            Ok(remote) => Some(remote),
            Err(e) => {
                tracing::debug!("No git metadata: {}", e);
                None
            }
        };

        let package = self.manifest.read_manifest(&root)?;

        let repo = Repo {
            name: self.resolve_name(&root, settings, remote.as_ref(), &package),
            owner: self.resolve_owner(&root, settings, remote.as_ref()),
            package: package.name.clone(),
            workflow: settings
                .workflow
                .clone()
                .unwrap_or_else(|| self.defaults.workflow.clone()),
            platforms: match settings.platforms() {
                Some(platforms) => platforms.clone(),
                None => derive_platforms(self.catalog, package.platform_names()),
            },
            compilers: match settings.compilers() {
                Some(compilers) => compilers.clone(),
                None => derive_compilers(self.catalog, package.tools_version()),
            },
            configurations: settings
                .configurations()
                .cloned()
                .unwrap_or_else(|| self.defaults.configurations.clone()),
            test: settings
                .test
                .map_or(self.defaults.test, |flag| TestMode::from_flag(Some(flag)))
                .resolve(package.has_test_targets()),
            first_last: settings.first_last.unwrap_or(self.defaults.first_last),
            notify: settings.notify.unwrap_or(self.defaults.notify),
            upload_logs: settings.upload_logs.unwrap_or(self.defaults.upload_logs),
            header: settings.header.unwrap_or(self.defaults.header),
        };

        tracing::debug!("Resolved {}/{}", repo.owner, repo.name);
        Ok(repo)
    }

    fn resolve_name(
        &self,
        root: &Path,
        settings: &Settings,
        remote: Option<&RemoteInfo>,
        package: &PackageInfo,
    ) -> String {
        settings
            .name
            .clone()
            .or_else(|| remote.map(|r| r.name.clone()))
            .or_else(|| file_name_str(root))
            .unwrap_or_else(|| package.name.clone())
    }

    fn resolve_owner(
        &self,
        root: &Path,
        settings: &Settings,
        remote: Option<&RemoteInfo>,
    ) -> String {
        settings
            .owner
            .clone()
            .or_else(|| remote.map(|r| r.owner.clone()))
            .or_else(|| self.defaults.owner.clone())
            .or_else(|| root.parent().and_then(file_name_str))
            .unwrap_or_else(|| UNKNOWN_OWNER.to_string())
    }
}
