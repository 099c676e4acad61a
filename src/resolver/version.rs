//! Swift tools-version parsing.
//!
//! Manifests declare `// swift-tools-version:5.9` and `dump-package` reports it
//! as `"5.9.0"`, but hand-written dumps and older toolchains also produce
//! `"5.9"` or `"5"`. Only the (major, minor) pair matters for compiler
//! selection.

use semver::Version;

use crate::core::catalog::VersionPair;

/// Parse a version string leniently, allowing missing minor/patch parts.
pub fn parse_version_lenient(s: &str) -> Option<Version> {
    let s = s.trim().trim_start_matches(['v', 'V']);

    // Try exact parse first
    if let Ok(v) = s.parse() {
        return Some(v);
    }

    // Try adding missing components
    let parts: Vec<&str> = s.split('.').collect();
    match parts.len() {
        1 => {
            let major: u64 = parts[0].parse().ok()?;
            Some(Version::new(major, 0, 0))
        }
        2 => {
            let major: u64 = parts[0].parse().ok()?;
            let minor: u64 = parts[1].parse().ok()?;
            Some(Version::new(major, minor, 0))
        }
        _ => None,
    }
}

/// The (major, minor) pair of a manifest tools version.
///
/// Returns `None` when the string is unparseable or a `0.0` placeholder.
pub fn tools_version_pair(raw: &str) -> Option<VersionPair> {
    let version = parse_version_lenient(raw)?;
    if version.major == 0 && version.minor == 0 {
        return None;
    }
    Some((version.major, version.minor))
}
