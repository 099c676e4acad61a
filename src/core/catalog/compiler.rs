//! Swift toolchain versions and how each one reaches a runner.

use super::{PlatformId, VersionPair};

catalog_id! {
    /// Identifier of a toolchain version.
    ///
    /// `SwiftLatest` and `SwiftNightly` are symbolic: the first stands for the
    /// catalog's latest release, the second for whatever development snapshot
    /// is current when the job runs. Neither has a numeric version.
    pub enum CompilerId: "compiler" {
        Swift50 => "swift50",
        Swift51 => "swift51",
        Swift52 => "swift52",
        Swift53 => "swift53",
        Swift54 => "swift54",
        Swift55 => "swift55",
        Swift56 => "swift56",
        Swift57 => "swift57",
        Swift58 => "swift58",
        Swift59 => "swift59",
        Swift510 => "swift510",
        Swift60 => "swift60",
        Swift61 => "swift61",
        SwiftLatest => "swiftLatest",
        SwiftNightly => "swiftNightly",
    }
}

impl CompilerId {
    /// The (major, minor) release number. `None` for symbolic identifiers.
    pub fn version(&self) -> Option<VersionPair> {
        let version = match self {
            CompilerId::Swift50 => (5, 0),
            CompilerId::Swift51 => (5, 1),
            CompilerId::Swift52 => (5, 2),
            CompilerId::Swift53 => (5, 3),
            CompilerId::Swift54 => (5, 4),
            CompilerId::Swift55 => (5, 5),
            CompilerId::Swift56 => (5, 6),
            CompilerId::Swift57 => (5, 7),
            CompilerId::Swift58 => (5, 8),
            CompilerId::Swift59 => (5, 9),
            CompilerId::Swift510 => (5, 10),
            CompilerId::Swift60 => (6, 0),
            CompilerId::Swift61 => (6, 1),
            CompilerId::SwiftLatest | CompilerId::SwiftNightly => return None,
        };
        Some(version)
    }

    pub fn is_symbolic(&self) -> bool {
        self.version().is_none()
    }
}

/// How a compiler is made available on an Apple runner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum XcodeMode {
    /// Select a pre-installed Xcode.
    Xcode {
        version: &'static str,
        image: &'static str,
    },
    /// Install a swift.org toolchain from `branch` on top of a base Xcode.
    Toolchain {
        version: &'static str,
        branch: &'static str,
        image: &'static str,
    },
}

impl XcodeMode {
    /// The Xcode version selected on the runner.
    pub fn xcode_version(&self) -> &'static str {
        match self {
            XcodeMode::Xcode { version, .. } | XcodeMode::Toolchain { version, .. } => version,
        }
    }

    /// The `runs-on` image label.
    pub fn image(&self) -> &'static str {
        match self {
            XcodeMode::Xcode { image, .. } | XcodeMode::Toolchain { image, .. } => image,
        }
    }

    /// The toolchain branch, when one is side-installed.
    pub fn toolchain_branch(&self) -> Option<&'static str> {
        match self {
            XcodeMode::Xcode { .. } => None,
            XcodeMode::Toolchain { branch, .. } => Some(branch),
        }
    }
}

/// How a compiler is made available on a Linux runner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinuxToolchain {
    /// Run the job inside this container image.
    Container(&'static str),
    /// Install this version with the setup-swift action.
    ///
    /// None of the standard releases need it. It is for catalogs built with
    /// [`Catalog::new`](super::Catalog::new) that carry a release without an
    /// official container image.
    Setup(&'static str),
}

/// An immutable compiler record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Compiler {
    pub id: CompilerId,
    pub name: &'static str,
    pub short: &'static str,
    pub linux: LinuxToolchain,
    pub mac: XcodeMode,

    /// `swift test` can run XCTest and Swift Testing as separate passes.
    pub separate_test_frameworks: bool,

    /// `swift build` accepts `--quiet`.
    pub quiet: bool,
}

impl Compiler {
    /// Whether tests can run against a device target with this compiler.
    pub fn supports_testing(&self, platform: PlatformId) -> bool {
        // no Xcode version can run watchOS tests
        if platform == PlatformId::WatchOS {
            return false;
        }

        // swift.org toolchains ship without simulators
        if matches!(self.mac, XcodeMode::Toolchain { .. })
            && platform != PlatformId::MacOS
            && platform != PlatformId::Linux
        {
            return false;
        }

        true
    }

    /// Whether this compiler is side-installed on Apple runners.
    pub fn uses_custom_toolchain(&self) -> bool {
        self.mac.toolchain_branch().is_some()
    }
}

const fn release(
    id: CompilerId,
    name: &'static str,
    short: &'static str,
    container: &'static str,
    xcode: &'static str,
    image: &'static str,
) -> Compiler {
    Compiler {
        id,
        name,
        short,
        linux: LinuxToolchain::Container(container),
        mac: XcodeMode::Xcode {
            version: xcode,
            image,
        },
        separate_test_frameworks: false,
        quiet: false,
    }
}

const fn quiet(mut compiler: Compiler) -> Compiler {
    compiler.quiet = true;
    compiler
}

const fn swift_testing(mut compiler: Compiler) -> Compiler {
    compiler.separate_test_frameworks = true;
    compiler
}

// Runner images and Xcode versions track https://github.com/actions/runner-images.
pub(super) const STANDARD_COMPILERS: &[Compiler] = &[
    release(CompilerId::Swift57, "Swift 5.7", "5.7", "swift:5.7-jammy", "14.2", "macos-13"),
    release(CompilerId::Swift58, "Swift 5.8", "5.8", "swift:5.8-jammy", "14.3.1", "macos-13"),
    quiet(release(CompilerId::Swift59, "Swift 5.9", "5.9", "swift:5.9-jammy", "15.2", "macos-14")),
    quiet(release(CompilerId::Swift510, "Swift 5.10", "5.10", "swift:5.10-jammy", "15.4", "macos-14")),
    swift_testing(quiet(release(CompilerId::Swift60, "Swift 6.0", "6.0", "swift:6.0-jammy", "16.2", "macos-15"))),
    swift_testing(quiet(release(CompilerId::Swift61, "Swift 6.1", "6.1", "swift:6.1-noble", "16.4", "macos-15"))),
    Compiler {
        id: CompilerId::SwiftNightly,
        name: "Swift Development Nightly",
        short: "dev",
        linux: LinuxToolchain::Container("swiftlang/swift:nightly-main-jammy"),
        mac: XcodeMode::Toolchain {
            version: "16.4",
            branch: "development",
            image: "macos-15",
        },
        separate_test_frameworks: true,
        quiet: true,
    },
];
