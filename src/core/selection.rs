//! Selection policy: which platforms, compilers and configurations get jobs.

use std::collections::BTreeSet;

use crate::core::catalog::{Catalog, Compiler, CompilerId, Configuration, Platform, PlatformId};
use crate::core::repo::Repo;

/// The effective job matrix for a resolved package.
#[derive(Debug, Clone)]
pub struct Matrix<'a> {
    /// Selected platforms, sorted by display name.
    pub platforms: Vec<&'a Platform>,

    /// Selected compilers, oldest first.
    pub compilers: Vec<&'a Compiler>,

    /// The compilers that actually get a job on each platform.
    pub scheduled: Vec<&'a Compiler>,

    pub configurations: Vec<Configuration>,
}

impl<'a> Matrix<'a> {
    pub fn select(catalog: &'a Catalog, repo: &Repo) -> Self {
        let platforms = effective_platforms(catalog, &repo.platforms);
        let compilers = effective_compilers(catalog, &repo.compilers);
        let scheduled = schedule(&compilers, repo.first_last);
        let configurations = effective_configurations(&repo.configurations);

        tracing::debug!(
            "Selected {} platform(s), {} compiler(s), {} scheduled",
            platforms.len(),
            compilers.len(),
            scheduled.len()
        );

        Matrix {
            platforms,
            compilers,
            scheduled,
            configurations,
        }
    }

    pub fn job_count(&self) -> usize {
        self.platforms.len() * self.scheduled.len()
    }

    /// Every (platform, compiler) pair, platform-major.
    pub fn jobs(&self) -> impl Iterator<Item = (&'a Platform, &'a Compiler)> + '_ {
        self.platforms
            .iter()
            .flat_map(move |p| self.scheduled.iter().map(move |c| (*p, *c)))
    }
}

/// Catalog platforms named in `selected`, sorted by display name.
pub fn effective_platforms<'a>(
    catalog: &'a Catalog,
    selected: &BTreeSet<PlatformId>,
) -> Vec<&'a Platform> {
    let mut platforms: Vec<_> = catalog
        .platforms()
        .iter()
        .filter(|p| selected.contains(&p.id))
        .collect();
    platforms.sort_by_key(|p| p.name.to_lowercase());
    platforms
}

/// Catalog compilers named in `selected`, oldest first.
///
/// Legacy identifiers collapse into the earliest supported release and
/// `swiftLatest` becomes the catalog's latest release.
pub fn effective_compilers<'a>(
    catalog: &'a Catalog,
    selected: &BTreeSet<CompilerId>,
) -> Vec<&'a Compiler> {
    let mut ids = selected.clone();

    if ids.iter().any(|id| catalog.is_legacy(*id)) {
        ids.retain(|id| !catalog.is_legacy(*id));
        ids.insert(catalog.earliest());
    }

    if ids.remove(&CompilerId::SwiftLatest) {
        ids.insert(catalog.latest());
    }

    catalog
        .compilers()
        .iter()
        .filter(|c| ids.contains(&c.id))
        .collect()
}

/// Configurations in identifier order.
pub fn effective_configurations(selected: &BTreeSet<Configuration>) -> Vec<Configuration> {
    let mut configurations: Vec<_> = selected.iter().copied().collect();
    configurations.sort_by_key(|c| c.as_str());
    configurations
}

/// Reduce to the oldest and newest compiler when `first_last` is set.
pub fn schedule<'a>(compilers: &[&'a Compiler], first_last: bool) -> Vec<&'a Compiler> {
    if !first_last {
        return compilers.to_vec();
    }

    match (compilers.first(), compilers.last()) {
        (Some(first), Some(last)) if first.id == last.id => vec![*first],
        (Some(first), Some(last)) => vec![*first, *last],
        _ => Vec::new(),
    }
}
