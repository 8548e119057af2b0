//! Alpha pre-release handling
//!
//! Alpha releases are stored in semantic-version form as `<marker>.<count>`
//! (e.g. `a.3`) so that they order numerically, and rendered in the compact
//! packaging form `<marker><count>` (e.g. `a3`).

use crate::error::{ReleaseError, Result};
use semver::Prerelease;
use std::fmt;
use std::str::FromStr;

/// Marker used when none is configured
pub const DEFAULT_ALPHA_MARKER: &str = "a";

/// Token identifying an alpha segment in a compact version (`1.2.3a4`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlphaMarker(String);

impl AlphaMarker {
    /// Create a marker from a token
    ///
    /// The token must be a non-numeric semantic-version identifier, i.e.
    /// ASCII alphanumerics and hyphens with at least one non-digit.
    pub fn new(token: impl Into<String>) -> Result<Self> {
        let token = token.into();
        let valid_chars = token
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-');
        let has_non_digit = token.chars().any(|c| !c.is_ascii_digit());

        if token.is_empty() || !valid_chars || !has_non_digit {
            return Err(ReleaseError::config(format!(
                "Invalid alpha marker: '{}'",
                token
            )));
        }
        Ok(AlphaMarker(token))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Pre-release identifier for the given alpha count
    ///
    /// A count of zero means a final release and yields an empty pre-release.
    pub fn prerelease(&self, count: u64) -> Result<Prerelease> {
        if count == 0 {
            return Ok(Prerelease::EMPTY);
        }
        let text = format!("{}.{}", self.0, count);
        Prerelease::new(&text).map_err(|_| ReleaseError::invalid_version(text))
    }

    /// Alpha count carried by a pre-release identifier
    ///
    /// Returns `Some(0)` for a final release and `None` when the identifier
    /// does not reduce to a number once marker and separators are removed.
    pub fn count(&self, pre: &Prerelease) -> Option<u64> {
        if pre.is_empty() {
            return Some(0);
        }
        pre.as_str()
            .replace(self.as_str(), "")
            .replace('.', "")
            .parse()
            .ok()
    }

    /// Whether the pre-release is this marker with a zero count (`a.0`)
    pub fn is_zero_count(&self, pre: &Prerelease) -> bool {
        pre.as_str() == format!("{}.0", self.0)
    }

    /// Next alpha identifier after `pre`
    ///
    /// Starts a fresh `<marker>.1` on a final release, otherwise increments
    /// the trailing numeric identifier (appending `.1` if there is none).
    pub fn bump(&self, pre: &Prerelease) -> Result<Prerelease> {
        if pre.is_empty() {
            return self.prerelease(1);
        }

        let mut parts: Vec<String> = pre.as_str().split('.').map(str::to_string).collect();
        match parts.last().and_then(|last| last.parse::<u64>().ok()) {
            Some(n) => {
                let next = n
                    .checked_add(1)
                    .ok_or_else(|| ReleaseError::invalid_version(pre.as_str()))?;
                if let Some(last) = parts.last_mut() {
                    *last = next.to_string();
                }
            }
            None => parts.push("1".to_string()),
        }

        let text = parts.join(".");
        Prerelease::new(&text).map_err(|_| ReleaseError::invalid_version(text))
    }
}

impl Default for AlphaMarker {
    fn default() -> Self {
        AlphaMarker(DEFAULT_ALPHA_MARKER.to_string())
    }
}

impl FromStr for AlphaMarker {
    type Err = ReleaseError;

    fn from_str(s: &str) -> Result<Self> {
        AlphaMarker::new(s)
    }
}

impl fmt::Display for AlphaMarker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Compact packaging form of a pre-release (`a.3` -> `a3`)
pub fn compact(pre: &Prerelease) -> String {
    pre.as_str().replace('.', "")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pre(s: &str) -> Prerelease {
        Prerelease::new(s).unwrap()
    }

    #[test]
    fn test_marker_default() {
        assert_eq!(AlphaMarker::default().as_str(), "a");
    }

    #[test]
    fn test_marker_rejects_invalid_tokens() {
        assert!(AlphaMarker::new("").is_err());
        assert!(AlphaMarker::new("12").is_err());
        assert!(AlphaMarker::new("a.b").is_err());
        assert!(AlphaMarker::new("al pha").is_err());
        assert!(AlphaMarker::new("alpha").is_ok());
        assert!(AlphaMarker::new("dev-1").is_ok());
    }

    #[test]
    fn test_prerelease_from_count() {
        let marker = AlphaMarker::default();
        assert_eq!(marker.prerelease(3).unwrap(), pre("a.3"));
        assert!(marker.prerelease(0).unwrap().is_empty());
    }

    #[test]
    fn test_count() {
        let marker = AlphaMarker::default();
        assert_eq!(marker.count(&pre("a.7")), Some(7));
        assert_eq!(marker.count(&Prerelease::EMPTY), Some(0));
        assert_eq!(marker.count(&pre("rc.1")), None);
    }

    #[test]
    fn test_zero_count() {
        let marker = AlphaMarker::default();
        assert!(marker.is_zero_count(&pre("a.0")));
        assert!(!marker.is_zero_count(&pre("a.1")));
    }

    #[test]
    fn test_bump_from_final() {
        let marker = AlphaMarker::new("alpha").unwrap();
        assert_eq!(marker.bump(&Prerelease::EMPTY).unwrap(), pre("alpha.1"));
    }

    #[test]
    fn test_bump_increments_trailing_number() {
        let marker = AlphaMarker::default();
        assert_eq!(marker.bump(&pre("a.1")).unwrap(), pre("a.2"));
        assert_eq!(marker.bump(&pre("a.9")).unwrap(), pre("a.10"));
        assert_eq!(marker.bump(&pre("rc.4")).unwrap(), pre("rc.5"));
    }

    #[test]
    fn test_bump_without_number_appends() {
        let marker = AlphaMarker::default();
        assert_eq!(marker.bump(&pre("beta")).unwrap(), pre("beta.1"));
    }

    #[test]
    fn test_bump_overflow_is_an_error() {
        let marker = AlphaMarker::default();
        let top = pre(&format!("a.{}", u64::MAX));
        assert!(matches!(marker.bump(&top), Err(ReleaseError::InvalidVersion(_))));
    }

    #[test]
    fn test_compact() {
        assert_eq!(compact(&pre("a.3")), "a3");
        assert_eq!(compact(&Prerelease::EMPTY), "");
    }
}
