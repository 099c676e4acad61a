//! Package resolution shared by every command.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use crate::core::{Catalog, Matrix, Repo};
use crate::resolver::Resolver;
use crate::sources::{DumpFileReader, GitRemoteReader, ManifestReader, SwiftPackageReader};
use crate::util::config::load_config;

/// Options for resolving a package.
#[derive(Debug, Clone, Default)]
pub struct ResolveOptions {
    /// Read this `dump-package` JSON instead of running Swift
    pub manifest: Option<PathBuf>,

    /// Run Swift with a throwaway scratch directory
    pub isolated: bool,

    /// Global config file to use instead of the default location
    pub config: Option<PathBuf>,
}

/// A resolved package together with the catalog it was resolved against.
#[derive(Debug, Clone)]
pub struct Resolved {
    pub catalog: Catalog,
    pub repo: Repo,
}

impl Resolved {
    pub fn matrix(&self) -> Matrix<'_> {
        Matrix::select(&self.catalog, &self.repo)
    }
}

/// Resolve the package at `root`.
pub fn resolve_package(root: &Path, opts: &ResolveOptions) -> Result<Resolved> {
    if !root.is_dir() {
        bail!("package directory `{}` does not exist", root.display());
    }

    let config = load_config(opts.config.as_deref());
    let catalog = config
        .catalog()
        .context("invalid compiler markers in configuration")?;
    let defaults = config.to_defaults();

    let manifest: Box<dyn ManifestReader> = match &opts.manifest {
        Some(path) => Box::new(DumpFileReader::new(path)),
        None => Box::new(SwiftPackageReader::locate()?.isolated(opts.isolated)),
    };
    let remote = GitRemoteReader;

    let repo = Resolver::new(&catalog, &defaults, &*manifest, &remote)
        .resolve(root)
        .with_context(|| format!("failed to resolve package at `{}`", root.display()))?;

    Ok(Resolved { catalog, repo })
}
