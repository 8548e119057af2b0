use crate::error::{ReleaseError, Result};
use semver::Version;
use std::fmt;
use std::str::FromStr;

/// Kind of release a query is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum ReleaseType {
    Major,
    Minor,
    Patch,
    #[value(alias = "prerelease")]
    Alpha,
}

impl ReleaseType {
    /// Whether `version` is a release of this kind
    ///
    /// - major: final `X.0.0` with `X != 0`
    /// - minor: final `X.Y.0` with `Y != 0`
    /// - patch: final `X.Y.Z` with `Z != 0`
    /// - alpha: any pre-release
    pub fn matches(&self, version: &Version) -> bool {
        let is_final = version.pre.is_empty();
        match self {
            ReleaseType::Major => {
                is_final && version.major != 0 && version.minor == 0 && version.patch == 0
            }
            ReleaseType::Minor => is_final && version.minor != 0 && version.patch == 0,
            ReleaseType::Patch => is_final && version.patch != 0,
            ReleaseType::Alpha => !is_final,
        }
    }

    /// Whether `version` belongs to the release cycle of `reference`
    pub fn in_cycle(&self, version: &Version, reference: &Version) -> bool {
        match self {
            ReleaseType::Major | ReleaseType::Minor => version.major == reference.major,
            ReleaseType::Patch => {
                version.major == reference.major && version.minor == reference.minor
            }
            ReleaseType::Alpha => {
                version.major == reference.major
                    && version.minor == reference.minor
                    && version.patch == reference.patch
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ReleaseType::Major => "major",
            ReleaseType::Minor => "minor",
            ReleaseType::Patch => "patch",
            ReleaseType::Alpha => "alpha",
        }
    }
}

impl FromStr for ReleaseType {
    type Err = ReleaseError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "major" => Ok(ReleaseType::Major),
            "minor" => Ok(ReleaseType::Minor),
            "patch" => Ok(ReleaseType::Patch),
            "alpha" | "prerelease" => Ok(ReleaseType::Alpha),
            other => Err(ReleaseError::usage(format!(
                "Invalid release type: '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for ReleaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
