//! `actiongen init-config` command

use std::path::PathBuf;

use anyhow::Result;

use crate::cli::InitConfigArgs;
use actiongen::ops::{init_config, InitConfigOptions};

pub fn execute(args: InitConfigArgs, config: Option<PathBuf>) -> Result<()> {
    let opts = InitConfigOptions {
        resolve: args.package.resolve_options(config),
        force: args.force,
    };

    let path = init_config(&args.package.path, &opts)?;
    eprintln!("     Created {}", path.display());

    Ok(())
}
