//! README status-badge header.
//!
//! The header is a block of badges between two HTML comments. Regenerating
//! replaces only that block, so hand-written text around it survives.

use std::collections::BTreeSet;
use std::fmt;

use url::Url;

use crate::core::{Catalog, Matrix, Repo};

pub const HEADER_BEGIN: &str = "<!-- actiongen header begin -->";
pub const HEADER_END: &str = "<!-- actiongen header end -->";

const SWIFT_COLOR: &str = "F05138";

/// A linked badge image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Badge {
    pub alt: String,
    pub image: Url,
    pub link: Url,
}

impl fmt::Display for Badge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[![{}]({})]({})", self.alt, self.image, self.link)
    }
}

/// Escape text for a shields.io static badge path.
pub fn shields_escape(text: &str) -> String {
    text.replace('-', "--").replace('_', "__").replace(' ', "_")
}

/// `base` with `segments` appended, each percent-encoded.
fn url_with_path(base: &str, segments: &[&str]) -> Result<Url, url::ParseError> {
    let mut url = Url::parse(base)?;
    url.path_segments_mut()
        .map_err(|_| url::ParseError::RelativeUrlWithCannotBeABaseBase)?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

fn github_url(repo: &Repo, rest: &[&str]) -> Result<Url, url::ParseError> {
    let mut segments = vec![repo.owner.as_str(), repo.name.as_str()];
    segments.extend_from_slice(rest);
    url_with_path("https://github.com", &segments)
}

/// Display names of the platforms jobs build, umbrellas expanded.
pub fn badge_platforms(catalog: &Catalog, matrix: &Matrix<'_>) -> Vec<&'static str> {
    let names: BTreeSet<(String, &'static str)> = matrix
        .platforms
        .iter()
        .flat_map(|p| p.device_targets(catalog))
        .map(|p| (p.name.to_lowercase(), p.name))
        .collect();
    names.into_iter().map(|(_, name)| name).collect()
}

/// The badges for a package, in display order.
pub fn badges(
    catalog: &Catalog,
    repo: &Repo,
    matrix: &Matrix<'_>,
) -> Result<Vec<Badge>, url::ParseError> {
    let workflow_file = repo.workflow_file_name();
    let mut badges = vec![
        Badge {
            alt: repo.workflow.clone(),
            image: github_url(repo, &["actions", "workflows", &workflow_file, "badge.svg"])?,
            link: github_url(repo, &["actions", "workflows", &workflow_file])?,
        },
        Badge {
            alt: "Release".to_string(),
            image: url_with_path(
                "https://img.shields.io",
                &["github", "v", "release", &repo.owner, &repo.name],
            )?,
            link: github_url(repo, &["releases"])?,
        },
    ];

    let earliest = matrix
        .scheduled
        .iter()
        .find(|c| !c.id.is_symbolic());
    if let Some(compiler) = earliest {
        let label = format!("swift-{}-{}.svg", shields_escape(compiler.short), SWIFT_COLOR);
        badges.push(Badge {
            alt: format!("Swift {}", compiler.short),
            image: url_with_path("https://img.shields.io", &["badge", &label])?,
            link: Url::parse("https://swift.org")?,
        });
    }

    let platforms = badge_platforms(catalog, matrix);
    if !platforms.is_empty() {
        let label = format!(
            "platforms-{}-lightgrey.svg",
            shields_escape(&platforms.join(" "))
        );
        let mut image = url_with_path("https://img.shields.io", &["badge", &label])?;
        image.set_query(Some("style=flat"));
        badges.push(Badge {
            alt: format!("Platforms: {}", platforms.join(", ")),
            image,
            link: github_url(repo, &[])?,
        });
    }

    Ok(badges)
}

/// The complete header block, markers included, ending with a newline.
pub fn render_header(
    catalog: &Catalog,
    repo: &Repo,
    matrix: &Matrix<'_>,
) -> Result<String, url::ParseError> {
    let badges = badges(catalog, repo, matrix)?
        .iter()
        .map(Badge::to_string)
        .collect::<Vec<_>>()
        .join(" ");

    Ok(format!("{}\n{}\n{}\n", HEADER_BEGIN, badges, HEADER_END))
}

/// Put `block` into `existing` in place of any previous header.
///
/// - both markers: the marked span is replaced
/// - only the end marker: everything up to it is replaced
/// - neither: the block is prepended, followed by a blank line
pub fn replace_header(existing: &str, block: &str) -> String {
    let block = block.trim_end_matches('\n');

    let Some(end) = existing.find(HEADER_END) else {
        return format!("{}\n\n{}", block, existing);
    };
    let after = &existing[end + HEADER_END.len()..];

    let before = match existing[..end].find(HEADER_BEGIN) {
        Some(begin) => &existing[..begin],
        None => "",
    };

    format!("{}{}{}", before, block, after)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CompilerId, PlatformId, TestMode};
    use crate::test_support::sample_repo;

    fn header_for(platforms: &[PlatformId], compilers: &[CompilerId]) -> String {
        let catalog = Catalog::standard();
        let repo = sample_repo(platforms, compilers, TestMode::Test);
        let matrix = Matrix::select(&catalog, &repo);
        render_header(&catalog, &repo, &matrix).unwrap()
    }

    #[test]
    fn test_shields_escape() {
        assert_eq!(shields_escape("5.10"), "5.10");
        assert_eq!(shields_escape("macOS iOS"), "macOS_iOS");
        assert_eq!(shields_escape("a-b_c"), "a--b__c");
    }

    #[test]
    fn test_header_badges() {
        let header = header_for(
            &[PlatformId::MacOS, PlatformId::Linux],
            &[CompilerId::Swift59, CompilerId::SwiftLatest],
        );

        assert!(header.starts_with(HEADER_BEGIN));
        assert!(header.ends_with(&format!("{}\n", HEADER_END)));
        assert!(header.contains(
            "(https://github.com/someone/Example/actions/workflows/Tests.yml/badge.svg)"
        ));
        assert!(header.contains("(https://img.shields.io/github/v/release/someone/Example)"));
        assert!(header.contains("(https://img.shields.io/badge/swift-5.9-F05138.svg)"));
        assert!(header.contains(
            "(https://img.shields.io/badge/platforms-Linux_macOS-lightgrey.svg?style=flat)"
        ));
    }

    #[test]
    fn test_platform_badge_expands_umbrella() {
        let catalog = Catalog::standard();
        let repo = sample_repo(
            &[PlatformId::Xcode, PlatformId::IOS],
            &[CompilerId::Swift61],
            TestMode::Test,
        );
        let matrix = Matrix::select(&catalog, &repo);
        assert_eq!(
            badge_platforms(&catalog, &matrix),
            vec!["iOS", "macOS", "tvOS", "watchOS"]
        );
    }

    #[test]
    fn test_nightly_only_has_no_swift_badge() {
        let header = header_for(&[PlatformId::Linux], &[CompilerId::SwiftNightly]);
        assert!(!header.contains("badge/swift-"));
    }

    #[test]
    fn test_workflow_names_are_encoded() {
        let catalog = Catalog::standard();
        let mut repo = sample_repo(&[PlatformId::MacOS], &[CompilerId::Swift61], TestMode::Test);
        repo.workflow = "Unit Tests".to_string();
        let matrix = Matrix::select(&catalog, &repo);

        let header = render_header(&catalog, &repo, &matrix).unwrap();
        assert!(header.contains("/actions/workflows/Unit%20Tests.yml/badge.svg"));
    }

    #[test]
    fn test_replace_prepends_when_no_markers() {
        let block = format!("{}\nbadges\n{}\n", HEADER_BEGIN, HEADER_END);
        let updated = replace_header("# Example\n\nText.\n", &block);
        assert_eq!(
            updated,
            format!("{}\nbadges\n{}\n\n# Example\n\nText.\n", HEADER_BEGIN, HEADER_END)
        );
    }

    #[test]
    fn test_replace_marked_span_only() {
        let existing = format!(
            "Intro above.\n{}\nold badges\n{}\n\n# Example\n",
            HEADER_BEGIN, HEADER_END
        );
        let block = format!("{}\nnew badges\n{}\n", HEADER_BEGIN, HEADER_END);

        let updated = replace_header(&existing, &block);
        assert_eq!(
            updated,
            format!(
                "Intro above.\n{}\nnew badges\n{}\n\n# Example\n",
                HEADER_BEGIN, HEADER_END
            )
        );
    }

    #[test]
    fn test_replace_from_top_with_end_marker_only() {
        let existing = format!("old generated stuff\n{}\n\n# Example\n", HEADER_END);
        let block = format!("{}\nnew\n{}\n", HEADER_BEGIN, HEADER_END);

        let updated = replace_header(&existing, &block);
        assert_eq!(
            updated,
            format!("{}\nnew\n{}\n\n# Example\n", HEADER_BEGIN, HEADER_END)
        );
    }

    #[test]
    fn test_replace_is_idempotent() {
        let block = header_for(&[PlatformId::MacOS], &[CompilerId::Swift61]);
        let once = replace_header("# Example\n", &block);
        let twice = replace_header(&once, &block);
        assert_eq!(once, twice);
    }
}
