//! `actiongen generate` command

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::cli::GenerateArgs;
use actiongen::ops::{generate, GenerateOptions};

pub fn execute(args: GenerateArgs, config: Option<PathBuf>) -> Result<()> {
    let opts = GenerateOptions {
        resolve: args.package.resolve_options(config),
        stdout: args.stdout,
        no_header: args.no_header,
    };

    let result = generate(&args.package.path, &opts)?;

    if opts.stdout {
        std::io::stdout()
            .write_all(result.document.as_bytes())
            .context("failed to write to stdout")?;
        return Ok(());
    }

    if let Some(path) = &result.workflow_path {
        eprintln!(
            "   Generated {} ({} jobs)",
            path.display(),
            result.job_count
        );
    }
    if let Some(path) = &result.readme_path {
        eprintln!("     Updated {}", path.display());
    }

    Ok(())
}
