//! Static catalogs of supported platforms, compilers, and build configurations.
//!
//! Each category is a closed enumeration of identifiers plus an ordered list of
//! immutable records. Identifiers parse case-insensitively, so they can be
//! matched against the free-form names reported by `swift package dump-package`
//! and against hand-written override files.
//!
//! The [`Catalog`] bundles the records with the markers that drive compiler
//! selection: the earliest supported release and the latest known release.
//! Every release older than the earliest is legacy and coalesces into it. The
//! markers move with each compiler-ecosystem release, so they are data rather
//! than constants.

use std::collections::BTreeSet;
use std::fmt;

use thiserror::Error;

/// Declares a catalog identifier enum with a stable string form.
///
/// The generated type parses case-insensitively and (de)serializes as its
/// string form.
macro_rules! catalog_id {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident : $kind:literal {
            $( $(#[$vmeta:meta])* $variant:ident => $text:literal, )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        $vis enum $name {
            $( $(#[$vmeta])* $variant, )+
        }

        impl $name {
            /// Every identifier, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant,)+];

            /// The stable string form of this identifier.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $( $name::$variant => $text, )+
                }
            }

            /// Case-insensitive lookup, returning `None` for unrecognized names.
            pub fn lookup(raw: &str) -> Option<Self> {
                let raw = raw.trim();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|id| id.as_str().eq_ignore_ascii_case(raw))
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = $crate::core::catalog::UnknownIdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::lookup(s).ok_or_else(|| $crate::core::catalog::UnknownIdError {
                    kind: $kind,
                    value: s.to_string(),
                    expected: Self::ALL.iter().map(|id| id.as_str()).collect(),
                })
            }
        }

        impl ::serde::Serialize for $name {
            fn serialize<S: ::serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> ::serde::Deserialize<'de> for $name {
            fn deserialize<D: ::serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = <String as ::serde::Deserialize>::deserialize(deserializer)?;
                raw.parse().map_err(::serde::de::Error::custom)
            }
        }
    };
}

mod compiler;
mod configuration;
mod platform;

pub use compiler::{Compiler, CompilerId, LinuxToolchain, XcodeMode};
pub use configuration::Configuration;
pub use platform::{is_linux_like, Platform, PlatformId};

/// Error returned when a string names no known identifier.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} `{value}`, expected one of: {}", .expected.join(", "))]
pub struct UnknownIdError {
    pub kind: &'static str,
    pub value: String,
    pub expected: Vec<&'static str>,
}

/// Error building a catalog with inconsistent markers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("compiler marker `{0}` is not a cataloged release")]
    NotARelease(CompilerId),

    #[error("earliest compiler `{earliest}` is newer than latest compiler `{latest}`")]
    MarkersOutOfOrder {
        earliest: CompilerId,
        latest: CompilerId,
    },

    #[error("primary platform `{0}` is not in the catalog")]
    UnknownPrimaryPlatform(PlatformId),
}

/// A (major, minor) release number.
pub type VersionPair = (u64, u64);

/// The catalog of everything jobs can be generated for.
#[derive(Debug, Clone)]
pub struct Catalog {
    platforms: Vec<Platform>,
    compilers: Vec<Compiler>,
    earliest: CompilerId,
    earliest_version: VersionPair,
    latest: CompilerId,
    latest_version: VersionPair,
    legacy: BTreeSet<CompilerId>,
    primary_platform: PlatformId,
}

impl Catalog {
    /// Build a catalog, validating the compiler markers.
    pub fn new(
        platforms: Vec<Platform>,
        compilers: Vec<Compiler>,
        earliest: CompilerId,
        latest: CompilerId,
        primary_platform: PlatformId,
    ) -> Result<Self, CatalogError> {
        let version_of = |id: CompilerId| -> Result<VersionPair, CatalogError> {
            compilers
                .iter()
                .find(|c| c.id == id)
                .and_then(|c| c.id.version())
                .ok_or(CatalogError::NotARelease(id))
        };

        let earliest_version = version_of(earliest)?;
        let latest_version = version_of(latest)?;
        if earliest_version > latest_version {
            return Err(CatalogError::MarkersOutOfOrder { earliest, latest });
        }

        if !platforms.iter().any(|p| p.id == primary_platform) {
            return Err(CatalogError::UnknownPrimaryPlatform(primary_platform));
        }

        Ok(Catalog {
            platforms,
            compilers,
            earliest,
            earliest_version,
            latest,
            latest_version,
            legacy: releases_before(earliest_version),
            primary_platform,
        })
    }

    /// The built-in catalog.
    pub fn standard() -> Self {
        Catalog {
            platforms: platform::STANDARD_PLATFORMS.to_vec(),
            compilers: compiler::STANDARD_COMPILERS.to_vec(),
            earliest: CompilerId::Swift57,
            earliest_version: (5, 7),
            latest: CompilerId::Swift61,
            latest_version: (6, 1),
            legacy: releases_before((5, 7)),
            primary_platform: PlatformId::MacOS,
        }
    }

    /// Move the earliest/latest markers, keeping everything else.
    pub fn with_markers(
        self,
        earliest: Option<CompilerId>,
        latest: Option<CompilerId>,
    ) -> Result<Self, CatalogError> {
        if earliest.is_none() && latest.is_none() {
            return Ok(self);
        }

        let earliest = earliest.unwrap_or(self.earliest);
        let latest = latest.unwrap_or(self.latest);
        Catalog::new(
            self.platforms,
            self.compilers,
            earliest,
            latest,
            self.primary_platform,
        )
    }

    /// All platforms, in catalog order.
    pub fn platforms(&self) -> &[Platform] {
        &self.platforms
    }

    /// All compilers, oldest first.
    pub fn compilers(&self) -> &[Compiler] {
        &self.compilers
    }

    /// All configurations, in identifier order.
    pub fn configurations(&self) -> &'static [Configuration] {
        Configuration::ALL
    }

    pub fn platform(&self, id: PlatformId) -> Option<&Platform> {
        self.platforms.iter().find(|p| p.id == id)
    }

    pub fn compiler(&self, id: CompilerId) -> Option<&Compiler> {
        self.compilers.iter().find(|c| c.id == id)
    }

    /// The earliest supported release.
    pub fn earliest(&self) -> CompilerId {
        self.earliest
    }

    pub fn earliest_version(&self) -> VersionPair {
        self.earliest_version
    }

    /// The release `swiftLatest` currently stands for.
    pub fn latest(&self) -> CompilerId {
        self.latest
    }

    pub fn latest_version(&self) -> VersionPair {
        self.latest_version
    }

    /// Whether an identifier belongs to the legacy set.
    pub fn is_legacy(&self, id: CompilerId) -> bool {
        self.legacy.contains(&id)
    }

    /// Platform used when nothing else selects one.
    pub fn primary_platform(&self) -> PlatformId {
        self.primary_platform
    }

    /// The cataloged release with exactly this (major, minor) number.
    pub fn release_for_version(&self, version: VersionPair) -> Option<CompilerId> {
        self.compilers
            .iter()
            .map(|c| c.id)
            .find(|id| id.version() == Some(version))
    }
}

/// Every release identifier numbered below `version`.
fn releases_before(version: VersionPair) -> BTreeSet<CompilerId> {
    CompilerId::ALL
        .iter()
        .copied()
        .filter(|id| id.version().is_some_and(|v| v < version))
        .collect()
}

impl Default for Catalog {
    fn default() -> Self {
        Catalog::standard()
    }
}

impl fmt::Display for Catalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} platforms, {} compilers (earliest {}, latest {})",
            self.platforms.len(),
            self.compilers.len(),
            self.earliest,
            self.latest
        )
    }
}
