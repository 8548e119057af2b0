use crate::domain::prerelease::{compact, AlphaMarker};
use crate::domain::release_type::ReleaseType;
use crate::error::{ReleaseError, Result};
use semver::{Prerelease, Version};
use std::cmp::Ordering;
use std::fmt;

/// Data of the published release a version was read from
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReleaseOrigin {
    pub tag_name: String,
    pub url: String,
    pub tarball_url: Option<String>,
    pub title: Option<String>,
    pub body: Option<String>,
    /// Content hash reported by the tag source
    pub etag: Option<String>,
}

impl ReleaseOrigin {
    pub fn new(tag_name: impl Into<String>) -> Self {
        ReleaseOrigin {
            tag_name: tag_name.into(),
            ..Default::default()
        }
    }
}

/// Non-comparable data carried alongside a version
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReleaseMeta {
    /// Non-numeric tag prefix such as `v`
    pub prefix: String,
    /// Present only for versions read from a real release
    pub origin: Option<ReleaseOrigin>,
}

/// A semantic version plus its tag prefix and release origin
///
/// Ordering and equality follow semantic-version precedence. Build metadata
/// and the tag metadata never take part in comparisons.
#[derive(Debug, Clone)]
pub struct Release {
    version: Version,
    meta: ReleaseMeta,
}

impl Release {
    /// Create a final release `major.minor.patch` without metadata
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Release::from_version(Version::new(major, minor, patch))
    }

    pub fn from_version(version: Version) -> Self {
        Release {
            version,
            meta: ReleaseMeta::default(),
        }
    }

    /// The `0.0.0` value returned when a query matches nothing
    pub fn sentinel() -> Self {
        Release::new(0, 0, 0)
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.meta.prefix = prefix.into();
        self
    }

    pub fn with_origin(mut self, origin: ReleaseOrigin) -> Self {
        self.meta.origin = Some(origin);
        self
    }

    pub fn with_prerelease(mut self, pre: Prerelease) -> Self {
        self.version.pre = pre;
        self
    }

    pub fn version(&self) -> &Version {
        &self.version
    }

    pub fn meta(&self) -> &ReleaseMeta {
        &self.meta
    }

    pub fn major(&self) -> u64 {
        self.version.major
    }

    pub fn minor(&self) -> u64 {
        self.version.minor
    }

    pub fn patch(&self) -> u64 {
        self.version.patch
    }

    pub fn prerelease(&self) -> Option<&str> {
        non_empty(self.version.pre.as_str())
    }

    pub fn build(&self) -> Option<&str> {
        non_empty(self.version.build.as_str())
    }

    pub fn is_prerelease(&self) -> bool {
        !self.version.pre.is_empty()
    }

    pub fn prefix(&self) -> &str {
        &self.meta.prefix
    }

    pub fn origin(&self) -> Option<&ReleaseOrigin> {
        self.meta.origin.as_ref()
    }

    /// Whether this version was read from a published release
    pub fn released(&self) -> bool {
        self.meta.origin.is_some()
    }

    pub fn tag(&self) -> Option<&str> {
        self.origin().map(|o| o.tag_name.as_str())
    }

    pub fn release_url(&self) -> Option<&str> {
        self.origin().map(|o| o.url.as_str())
    }

    pub fn tarball_url(&self) -> Option<&str> {
        self.origin().and_then(|o| o.tarball_url.as_deref())
    }

    pub fn title(&self) -> Option<&str> {
        self.origin().and_then(|o| o.title.as_deref())
    }

    pub fn body(&self) -> Option<&str> {
        self.origin().and_then(|o| o.body.as_deref())
    }

    pub fn etag(&self) -> Option<&str> {
        self.origin().and_then(|o| o.etag.as_deref())
    }

    /// Next version for the given release type
    ///
    /// Without a type the alpha count is bumped. The result carries no
    /// prefix, origin or build metadata.
    pub fn next(&self, release_type: Option<ReleaseType>, marker: &AlphaMarker) -> Result<Release> {
        let Version {
            major,
            minor,
            patch,
            ..
        } = self.version;

        let overflow = || ReleaseError::invalid_version(self.version.to_string());
        let next = match release_type.unwrap_or(ReleaseType::Alpha) {
            ReleaseType::Major => Release::new(major.checked_add(1).ok_or_else(overflow)?, 0, 0),
            ReleaseType::Minor => Release::new(major, minor.checked_add(1).ok_or_else(overflow)?, 0),
            ReleaseType::Patch => Release::new(major, minor, patch.checked_add(1).ok_or_else(overflow)?),
            ReleaseType::Alpha => Release::new(major, minor, patch)
                .with_prerelease(marker.bump(&self.version.pre)?),
        };
        Ok(next)
    }

    /// Compact packaging form: `<prefix><major>.<minor>.<patch><alpha>`
    ///
    /// The pre-release loses its dot separators (`1.2.3-a.4` -> `1.2.3a4`).
    pub fn to_package_string(&self) -> String {
        format!(
            "{}{}.{}.{}{}",
            self.meta.prefix,
            self.version.major,
            self.version.minor,
            self.version.patch,
            compact(&self.version.pre)
        )
    }
}

fn non_empty(s: &str) -> Option<&str> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}

impl From<Version> for Release {
    fn from(version: Version) -> Self {
        Release::from_version(version)
    }
}

impl PartialEq for Release {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Release {}

impl PartialOrd for Release {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Release {
    /// Semantic-version precedence: build metadata is ignored
    fn cmp(&self, other: &Self) -> Ordering {
        let (a, b) = (&self.version, &other.version);
        (a.major, a.minor, a.patch)
            .cmp(&(b.major, b.minor, b.patch))
            .then_with(|| a.pre.cmp(&b.pre))
    }
}

impl fmt::Display for Release {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.meta.prefix, self.version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn release(s: &str) -> Release {
        Release::from_version(Version::parse(s).unwrap())
    }

    #[test]
    fn test_final_above_prerelease() {
        assert!(release("1.0.0") > release("1.0.0-alpha.1"));
        assert!(release("1.0.0-alpha.1") < release("1.0.0-alpha.2"));
        assert!(release("1.0.0-a.2") < release("1.0.0-a.10"));
    }

    #[test]
    fn test_prerelease_precedence() {
        assert!(release("1.0.0-alpha") < release("1.0.0-alpha.1"));
        assert!(release("1.0.0-1") < release("1.0.0-alpha"));
        assert!(release("1.0.0-alpha.beta") > release("1.0.0-alpha.1"));
    }

    #[test]
    fn test_ordering_ignores_prefix() {
        let a = release("1.2.3").with_prefix("v");
        let b = release("1.2.3");
        assert_eq!(a, b);
        assert_eq!(a.cmp(&b), Ordering::Equal);
    }

    #[test]
    fn test_exactly_one_of_final_or_prerelease() {
        for r in [release("1.2.3"), release("1.2.3-a.1")] {
            assert!(r.prerelease().is_none() != r.is_prerelease());
        }
    }

    #[test]
    fn test_next_patch_minor_major() {
        let marker = AlphaMarker::default();
        let base = release("1.2.3");
        assert_eq!(
            base.next(Some(ReleaseType::Patch), &marker).unwrap(),
            release("1.2.4")
        );
        assert_eq!(
            base.next(Some(ReleaseType::Minor), &marker).unwrap(),
            release("1.3.0")
        );
        assert_eq!(
            base.next(Some(ReleaseType::Major), &marker).unwrap(),
            release("2.0.0")
        );
    }

    #[test]
    fn test_next_alpha() {
        let marker = AlphaMarker::new("alpha").unwrap();
        let first = release("1.2.3").next(Some(ReleaseType::Alpha), &marker).unwrap();
        assert_eq!(first, release("1.2.3-alpha.1"));
        let second = first.next(Some(ReleaseType::Alpha), &marker).unwrap();
        assert_eq!(second, release("1.2.3-alpha.2"));
    }

    #[test]
    fn test_next_without_type_bumps_alpha() {
        let marker = AlphaMarker::default();
        let next = release("0.4.1-a.3").next(None, &marker).unwrap();
        assert_eq!(next, release("0.4.1-a.4"));
    }

    #[test]
    fn test_next_drops_prefix_and_origin() {
        let marker = AlphaMarker::default();
        let base = release("1.2.3")
            .with_prefix("v")
            .with_origin(ReleaseOrigin::new("v1.2.3"));
        let next = base.next(Some(ReleaseType::Patch), &marker).unwrap();
        assert_eq!(next.prefix(), "");
        assert!(!next.released());
    }

    #[test]
    fn test_package_string() {
        assert_eq!(release("1.2.3-a.4").to_package_string(), "1.2.3a4");
        assert_eq!(
            release("2.0.0").with_prefix("v").to_package_string(),
            "v2.0.0"
        );
    }

    #[test]
    fn test_display_uses_semver_form() {
        assert_eq!(
            release("1.2.3-a.4").with_prefix("v").to_string(),
            "v1.2.3-a.4"
        );
    }

    #[test]
    fn test_origin_accessors() {
        let origin = ReleaseOrigin {
            tag_name: "v1.0.0".to_string(),
            url: "https://api.github.com/repos/o/r/releases/1".to_string(),
            tarball_url: Some("https://api.github.com/repos/o/r/tarball/v1.0.0".to_string()),
            title: Some("First".to_string()),
            body: None,
            etag: Some("abc".to_string()),
        };
        let r = release("1.0.0").with_origin(origin);
        assert!(r.released());
        assert_eq!(r.tag(), Some("v1.0.0"));
        assert_eq!(r.title(), Some("First"));
        assert_eq!(r.body(), None);
        assert_eq!(r.etag(), Some("abc"));
        assert!(r.tarball_url().is_some());

        let synthesized = Release::sentinel();
        assert!(!synthesized.released());
        assert_eq!(synthesized.tag(), None);
        assert_eq!(synthesized.release_url(), None);
    }

    #[test]
    fn test_ordering_ignores_build() {
        let a = release("1.0.0+build.2");
        let b = release("1.0.0+build.1");
        assert_eq!(a.cmp(&b), Ordering::Equal);
        assert_eq!(a, b);
        assert_eq!(a.build(), Some("build.2"));
        assert!(release("1.0.1+build.1") > release("1.0.0+build.9"));
        assert!(release("1.0.0-a.1+build.9") < release("1.0.0"));
    }

    #[test]
    fn test_next_overflow_is_an_error() {
        let marker = AlphaMarker::default();
        let max = u64::MAX;
        for (base, release_type) in [
            (Release::new(max, 0, 0), ReleaseType::Major),
            (Release::new(1, max, 0), ReleaseType::Minor),
            (Release::new(1, 2, max), ReleaseType::Patch),
        ] {
            let err = base.next(Some(release_type), &marker).unwrap_err();
            assert!(matches!(err, ReleaseError::InvalidVersion(_)), "{}", err);
        }
    }
}
