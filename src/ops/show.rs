//! Implementation of `actiongen show`.

use std::fmt::Write;
use std::path::Path;

use anyhow::Result;

use crate::ops::resolve::{resolve_package, ResolveOptions, Resolved};
use crate::workflow::{job_id, job_name};

/// Resolve the package at `root` and describe what would be generated.
pub fn show(root: &Path, opts: &ResolveOptions) -> Result<String> {
    let resolved = resolve_package(root, opts)?;
    Ok(format_resolved(&resolved))
}

/// The resolved settings followed by the jobs it schedules.
pub fn format_resolved(resolved: &Resolved) -> String {
    let matrix = resolved.matrix();
    let mut output = String::new();

    writeln!(output, "{}", resolved.repo).ok();
    writeln!(output).ok();
    writeln!(output, "jobs ({}):", matrix.job_count()).ok();
    for (platform, compiler) in matrix.jobs() {
        writeln!(
            output,
            "  {:<24} {}",
            job_id(platform, compiler),
            job_name(platform, compiler)
        )
        .ok();
    }

    output
}
