//! `actiongen check-config` command

use anyhow::Result;

use crate::cli::CheckConfigArgs;
use actiongen::ops::{check_config, ConfigStatus};

pub fn execute(args: CheckConfigArgs) -> Result<()> {
    match check_config(&args.path)? {
        ConfigStatus::Missing(path) => {
            eprintln!("No settings file at {}; defaults apply", path.display());
        }
        ConfigStatus::Valid(path) => {
            eprintln!("          Ok {}", path.display());
        }
    }

    Ok(())
}
