//! Job-matrix generation.
//!
//! Expands a resolved [`Repo`] into a typed GitHub Actions [`Workflow`]: one
//! job per selected platform and scheduled compiler, platforms outermost.
//! Generation is pure; rendering to text lives in [`crate::document`].

pub mod job;
pub mod schema;
pub mod steps;

use indexmap::IndexMap;
use thiserror::Error;

use crate::core::{Catalog, Matrix, Repo};

pub use job::{build_job, job_id, job_name};
pub use schema::{Job, Step, Workflow};
pub use steps::JobContext;

/// Events the generated workflow runs on.
pub const TRIGGERS: &[&str] = &["push", "pull_request", "workflow_dispatch"];

/// Error generating a workflow.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("failed to serialize workflow")]
    Serialize(#[from] serde_yaml::Error),

    /// The selection produced nothing to run. The resolver always selects at
    /// least one platform and compiler, so this is a bug rather than bad input.
    #[error("internal error: {0}")]
    Inconsistent(String),
}

/// Generate the workflow for a resolved package.
pub fn generate(catalog: &Catalog, repo: &Repo) -> Result<Workflow, GenerateError> {
    let matrix = Matrix::select(catalog, repo);
    generate_matrix(catalog, repo, &matrix)
}

/// Generate the workflow for an already-selected matrix.
pub fn generate_matrix(
    catalog: &Catalog,
    repo: &Repo,
    matrix: &Matrix<'_>,
) -> Result<Workflow, GenerateError> {
    if matrix.platforms.is_empty() {
        return Err(GenerateError::Inconsistent(
            "no platforms selected".to_string(),
        ));
    }
    if matrix.scheduled.is_empty() {
        return Err(GenerateError::Inconsistent(format!(
            "no compilers scheduled from {:?}",
            repo.compilers
        )));
    }
    if matrix.configurations.is_empty() {
        return Err(GenerateError::Inconsistent(
            "no configurations selected".to_string(),
        ));
    }

    let mut jobs = IndexMap::with_capacity(matrix.job_count());
    for (platform, compiler) in matrix.jobs() {
        let ctx = JobContext {
            catalog,
            repo,
            platform,
            compiler,
            configurations: &matrix.configurations,
        };
        jobs.insert(job_id(platform, compiler), build_job(&ctx));
    }

    tracing::debug!("Generated {} job(s)", jobs.len());

    Ok(Workflow {
        name: repo.workflow.clone(),
        on: TRIGGERS.iter().map(|t| t.to_string()).collect(),
        jobs,
    })
}
