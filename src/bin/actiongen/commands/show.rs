//! `actiongen show` command

use std::path::PathBuf;

use anyhow::Result;

use crate::cli::ShowArgs;
use actiongen::ops::show;

pub fn execute(args: ShowArgs, config: Option<PathBuf>) -> Result<()> {
    let opts = args.package.resolve_options(config);
    print!("{}", show(&args.package.path, &opts)?);
    Ok(())
}
