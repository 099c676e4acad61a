//! Selections derived from the package manifest when no override names them.

use std::collections::BTreeSet;

use crate::core::catalog::{is_linux_like, Catalog, CompilerId, PlatformId};
use crate::resolver::version::tools_version_pair;

/// Map manifest platform names onto catalog platforms.
///
/// Unknown names are skipped, except Linux distributions which become
/// `linux`. Falls back to the primary platform when nothing matches.
pub fn derive_platforms<'a>(
    catalog: &Catalog,
    names: impl IntoIterator<Item = &'a str>,
) -> BTreeSet<PlatformId> {
    let mut platforms = BTreeSet::new();

    for name in names {
        let id = PlatformId::lookup(name)
            .filter(|id| catalog.platform(*id).is_some())
            .or_else(|| is_linux_like(name).then_some(PlatformId::Linux));

        match id {
            Some(id) => {
                platforms.insert(id);
            }
            None => tracing::debug!("Skipping unsupported manifest platform `{}`", name),
        }
    }

    if platforms.is_empty() {
        platforms.insert(catalog.primary_platform());
    }

    platforms
}

/// Pick compilers from the manifest's minimum tools version.
///
/// - below the earliest release: the earliest release and `swiftLatest`
/// - a cataloged release between the markers: that release and `swiftLatest`
/// - anything else: `swiftLatest` alone
pub fn derive_compilers(catalog: &Catalog, tools_version: &str) -> BTreeSet<CompilerId> {
    let mut compilers = BTreeSet::from([CompilerId::SwiftLatest]);

    let Some(version) = tools_version_pair(tools_version) else {
        tracing::debug!(
            "Tools version `{}` is not a usable version, assuming latest",
            tools_version
        );
        return compilers;
    };

    if version < catalog.earliest_version() {
        compilers.insert(catalog.earliest());
    } else if version < catalog.latest_version() {
        match catalog.release_for_version(version) {
            Some(release) => {
                compilers.insert(release);
            }
            None => tracing::debug!(
                "No cataloged release for tools version {}.{}",
                version.0,
                version.1
            ),
        }
    }

    compilers
}
