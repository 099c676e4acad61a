//! Implementation of `actiongen generate`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::core::{Catalog, Matrix, Repo};
use crate::document::{render, render_header, replace_header, Generator};
use crate::ops::resolve::{resolve_package, ResolveOptions, Resolved};
use crate::util::fs::{read_to_string, write_atomic};
use crate::workflow::generate_matrix;

/// Directory, relative to the package root, holding workflow files.
pub const WORKFLOWS_DIR: &str = ".github/workflows";

pub const README_FILE: &str = "README.md";

/// Options for generating a workflow.
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    pub resolve: ResolveOptions,

    /// Return the document instead of writing it
    pub stdout: bool,

    /// Leave README.md alone even when the header is enabled
    pub no_header: bool,
}

/// What a generate run produced.
#[derive(Debug, Clone)]
pub struct GenerateResult {
    /// The rendered workflow document
    pub document: String,

    /// Where the document was written, unless writing to stdout
    pub workflow_path: Option<PathBuf>,

    /// README that had its header replaced, if any
    pub readme_path: Option<PathBuf>,

    pub job_count: usize,
}

/// Path of the workflow file for a package.
pub fn workflow_path(root: &Path, repo: &Repo) -> PathBuf {
    root.join(WORKFLOWS_DIR).join(repo.workflow_file_name())
}

/// Resolve the package at `root` and generate its workflow.
pub fn generate(root: &Path, opts: &GenerateOptions) -> Result<GenerateResult> {
    let resolved = resolve_package(root, &opts.resolve)?;
    generate_resolved(root, &resolved, opts)
}

/// Generate the workflow for an already-resolved package.
pub fn generate_resolved(
    root: &Path,
    resolved: &Resolved,
    opts: &GenerateOptions,
) -> Result<GenerateResult> {
    let catalog = &resolved.catalog;
    let repo = &resolved.repo;
    let matrix = resolved.matrix();

    let workflow = generate_matrix(catalog, repo, &matrix).context("failed to generate workflow")?;
    let document = render(&workflow, &Generator::current()).context("failed to render workflow")?;

    let mut result = GenerateResult {
        document,
        workflow_path: None,
        readme_path: None,
        job_count: workflow.jobs.len(),
    };

    if opts.stdout {
        return Ok(result);
    }

    let path = workflow_path(root, repo);
    write_atomic(&path, &result.document)?;
    tracing::info!("Wrote {} ({} jobs)", path.display(), result.job_count);
    result.workflow_path = Some(path);

    if repo.header && !opts.no_header {
        result.readme_path = update_readme(root, catalog, repo, &matrix)?;
    }

    Ok(result)
}

/// Replace the badge header in the package README.
///
/// Returns the README path when it was rewritten.
fn update_readme(
    root: &Path,
    catalog: &Catalog,
    repo: &Repo,
    matrix: &Matrix<'_>,
) -> Result<Option<PathBuf>> {
    let path = root.join(README_FILE);
    if !path.is_file() {
        tracing::info!("No {} in {}, skipping header", README_FILE, root.display());
        return Ok(None);
    }

    let block = render_header(catalog, repo, matrix).context("failed to build badge URLs")?;
    let existing = read_to_string(&path)?;
    let updated = replace_header(&existing, &block);

    if updated == existing {
        tracing::debug!("Header in {} is up to date", path.display());
        return Ok(None);
    }

    write_atomic(&path, &updated)?;
    tracing::info!("Updated header in {}", path.display());
    Ok(Some(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{HEADER_BEGIN, HEADER_END};
    use crate::test_support::PackageFixture;
    use tempfile::TempDir;

    fn setup(tmp: &TempDir) -> (PathBuf, GenerateOptions) {
        let root = tmp.path().join("Example");
        std::fs::create_dir(&root).unwrap();

        let dump = PackageFixture::library("Example")
            .tools_version("5.10.0")
            .platform("macos", "13.0")
            .write_to(tmp.path())
            .unwrap();
        let config = tmp.path().join("config.toml");
        std::fs::write(&config, "").unwrap();

        let opts = GenerateOptions {
            resolve: ResolveOptions {
                manifest: Some(dump),
                isolated: false,
                config: Some(config),
            },
            ..Default::default()
        };
        (root, opts)
    }

    #[test]
    fn test_writes_workflow_file() {
        let tmp = TempDir::new().unwrap();
        let (root, opts) = setup(&tmp);

        let result = generate(&root, &opts).unwrap();
        let path = root.join(".github/workflows/Tests.yml");

        assert_eq!(result.workflow_path.as_deref(), Some(path.as_path()));
        assert_eq!(result.job_count, 2);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), result.document);
        assert!(result.readme_path.is_none());
    }

    #[test]
    fn test_stdout_writes_nothing() {
        let tmp = TempDir::new().unwrap();
        let (root, mut opts) = setup(&tmp);
        opts.stdout = true;
        std::fs::write(root.join(README_FILE), "# Example\n").unwrap();

        let result = generate(&root, &opts).unwrap();

        assert!(result.workflow_path.is_none());
        assert!(!root.join(WORKFLOWS_DIR).exists());
        assert_eq!(
            std::fs::read_to_string(root.join(README_FILE)).unwrap(),
            "# Example\n"
        );
        assert!(result.document.contains("macOS-swift510:"));
    }

    #[test]
    fn test_updates_readme_header() {
        let tmp = TempDir::new().unwrap();
        let (root, opts) = setup(&tmp);
        std::fs::write(root.join(README_FILE), "# Example\n\nSome text.\n").unwrap();

        let result = generate(&root, &opts).unwrap();
        assert_eq!(result.readme_path, Some(root.join(README_FILE)));

        let readme = std::fs::read_to_string(root.join(README_FILE)).unwrap();
        assert!(readme.starts_with(HEADER_BEGIN));
        assert!(readme.contains(HEADER_END));
        assert!(readme.ends_with("# Example\n\nSome text.\n"));

        // Second run leaves the file alone.
        let again = generate(&root, &opts).unwrap();
        assert!(again.readme_path.is_none());
        assert_eq!(std::fs::read_to_string(root.join(README_FILE)).unwrap(), readme);
    }

    #[test]
    fn test_no_header_flag() {
        let tmp = TempDir::new().unwrap();
        let (root, mut opts) = setup(&tmp);
        opts.no_header = true;
        std::fs::write(root.join(README_FILE), "# Example\n").unwrap();

        let result = generate(&root, &opts).unwrap();
        assert!(result.readme_path.is_none());
        assert_eq!(
            std::fs::read_to_string(root.join(README_FILE)).unwrap(),
            "# Example\n"
        );
    }

    #[test]
    fn test_header_disabled_in_settings() {
        let tmp = TempDir::new().unwrap();
        let (root, opts) = setup(&tmp);
        std::fs::write(root.join(README_FILE), "# Example\n").unwrap();
        std::fs::write(
            root.join(".actiongen.json"),
            r#"{ "header": false, "workflow": "CI" }"#,
        )
        .unwrap();

        let result = generate(&root, &opts).unwrap();
        assert_eq!(
            result.workflow_path,
            Some(root.join(".github/workflows/CI.yml"))
        );
        assert!(result.readme_path.is_none());
    }
}
