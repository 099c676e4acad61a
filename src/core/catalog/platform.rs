//! Supported execution platforms.

use super::Catalog;

catalog_id! {
    /// Identifier of a platform jobs can be generated for.
    pub enum PlatformId: "platform" {
        MacOS => "macOS",
        IOS => "iOS",
        TvOS => "tvOS",
        WatchOS => "watchOS",
        Linux => "linux",
        /// Umbrella platform fanning out into one `xcodebuild` pass per device family.
        Xcode => "xcode",
    }
}

/// Manifest platform names that are not catalog identifiers but mean Linux.
const LINUX_LIKE: &[&str] = &["ubuntu", "debian", "fedora", "centos", "rhel", "amazonlinux"];

/// Whether a manifest platform name denotes a Linux distribution.
pub fn is_linux_like(name: &str) -> bool {
    let name = name.trim();
    LINUX_LIKE.iter().any(|l| l.eq_ignore_ascii_case(name))
}

/// An immutable platform record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Platform {
    pub id: PlatformId,

    /// Display name used in job and step titles.
    pub name: &'static str,

    /// `xcodebuild -destination` specifier, if the platform has one.
    pub destination: Option<&'static str>,

    /// Builds for this platform must target an explicit device or simulator.
    pub needs_destination: bool,

    /// Device families built in turn by one job for this platform.
    pub sub_platforms: &'static [PlatformId],
}

impl Platform {
    pub const fn new(id: PlatformId, name: &'static str) -> Self {
        Platform {
            id,
            name,
            destination: None,
            needs_destination: false,
            sub_platforms: &[],
        }
    }

    /// Give the platform a destination specifier.
    pub const fn with_destination(mut self, destination: &'static str, required: bool) -> Self {
        self.destination = Some(destination);
        self.needs_destination = required;
        self
    }

    /// Make this an umbrella over other platforms.
    pub const fn with_sub_platforms(mut self, sub_platforms: &'static [PlatformId]) -> Self {
        self.sub_platforms = sub_platforms;
        self.needs_destination = true;
        self
    }

    pub fn is_linux(&self) -> bool {
        self.id == PlatformId::Linux
    }

    /// Runs on an Apple runner, where `xcbeautify` filters build output.
    pub fn is_apple(&self) -> bool {
        !self.is_linux()
    }

    /// The device targets a job for this platform builds: its sub-platforms,
    /// or the platform itself when it has none.
    pub fn device_targets<'a>(&'a self, catalog: &'a Catalog) -> Vec<&'a Platform> {
        if self.sub_platforms.is_empty() {
            vec![self]
        } else {
            self.sub_platforms
                .iter()
                .filter_map(|id| catalog.platform(*id))
                .collect()
        }
    }
}

pub(super) const STANDARD_PLATFORMS: &[Platform] = &[
    Platform::new(PlatformId::MacOS, "macOS").with_destination("platform=macOS", false),
    Platform::new(PlatformId::IOS, "iOS")
        .with_destination("platform=iOS Simulator,name=iPhone 15", true),
    Platform::new(PlatformId::TvOS, "tvOS")
        .with_destination("platform=tvOS Simulator,name=Apple TV", true),
    Platform::new(PlatformId::WatchOS, "watchOS").with_destination(
        "platform=watchOS Simulator,name=Apple Watch Series 9 (45mm)",
        true,
    ),
    Platform::new(PlatformId::Linux, "Linux"),
    Platform::new(PlatformId::Xcode, "Xcode").with_sub_platforms(&[
        PlatformId::MacOS,
        PlatformId::IOS,
        PlatformId::TvOS,
        PlatformId::WatchOS,
    ]),
];
