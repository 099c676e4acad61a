//! Implementation of `actiongen init-config`.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use crate::core::settings::settings_path;
use crate::ops::resolve::{resolve_package, ResolveOptions};
use crate::util::fs::write_atomic;

/// Options for writing an override file.
#[derive(Debug, Clone, Default)]
pub struct InitConfigOptions {
    pub resolve: ResolveOptions,

    /// Replace an existing override file
    pub force: bool,
}

/// Write the resolved settings of the package at `root` as its override file.
///
/// Every field is written explicitly, so the file doubles as documentation of
/// what generation would currently do.
pub fn init_config(root: &Path, opts: &InitConfigOptions) -> Result<PathBuf> {
    let path = settings_path(root);
    if path.exists() && !opts.force {
        bail!(
            "`{}` already exists\n\
             \n\
             Use `--force` to overwrite it.",
            path.display()
        );
    }

    let resolved = resolve_package(root, &opts.resolve)?;
    let json = resolved
        .repo
        .to_settings()
        .to_json_pretty()
        .context("failed to serialize settings")?;

    write_atomic(&path, &json)?;
    tracing::info!("Wrote {}", path.display());
    Ok(path)
}
