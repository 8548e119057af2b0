use crate::domain::prerelease::AlphaMarker;
use crate::domain::version::Release;
use crate::error::{ReleaseError, Result};
use regex::Regex;
use semver::{Prerelease, Version};

/// Leading non-numeric tag prefix
const PREFIX_PATTERN: &str = r"^[a-zA-Z/\\-]+";

/// Parses release tags such as `v2.1.0`, `2.1.0a3` or `release-1.0.0`
///
/// A leading run of letters, `-`, `/` or `\` is split off as the prefix.
/// Compact alpha tags (`1.2.3a4`) are rewritten into semantic-version
/// pre-release form (`1.2.3-a.4`) before parsing.
#[derive(Debug, Clone)]
pub struct TagParser {
    marker: AlphaMarker,
    prefix: Regex,
    compact_alpha: Regex,
}

impl TagParser {
    pub fn new(marker: AlphaMarker) -> Result<Self> {
        let prefix = Regex::new(PREFIX_PATTERN)
            .map_err(|e| ReleaseError::config(format!("Invalid prefix pattern: {}", e)))?;
        let compact_alpha = Regex::new(&format!(
            r"^(\d+\.\d+\.\d+){}(\d+)",
            regex::escape(marker.as_str())
        ))
        .map_err(|e| ReleaseError::config(format!("Invalid alpha pattern: {}", e)))?;

        Ok(TagParser {
            marker,
            prefix,
            compact_alpha,
        })
    }

    pub fn marker(&self) -> &AlphaMarker {
        &self.marker
    }

    /// Split a tag into its non-numeric prefix and the remainder
    pub fn split_prefix<'a>(&self, tag: &'a str) -> (&'a str, &'a str) {
        match self.prefix.find(tag) {
            Some(m) => tag.split_at(m.end()),
            None => ("", tag),
        }
    }

    /// Rewrite a prefix-free compact alpha version into semantic-version form
    pub fn expand_alpha(&self, version: &str) -> String {
        let replacement = format!("${{1}}-{}.${{2}}", self.marker);
        self.compact_alpha
            .replace(version, replacement.as_str())
            .into_owned()
    }

    /// Parse a tag into a release carrying the tag's prefix
    ///
    /// An alpha count of zero (`1.2.3a0`) parses as the final release.
    pub fn parse(&self, tag: &str) -> Result<Release> {
        let (prefix, rest) = self.split_prefix(tag.trim());
        let expanded = self.expand_alpha(rest);

        let mut version =
            Version::parse(&expanded).map_err(|_| ReleaseError::invalid_version(tag))?;
        if self.marker.is_zero_count(&version.pre) {
            version.pre = Prerelease::EMPTY;
        }

        Ok(Release::from_version(version).with_prefix(prefix))
    }

    /// Like [`TagParser::parse`] but discards invalid tags
    pub fn try_parse(&self, tag: &str) -> Option<Release> {
        self.parse(tag).ok()
    }
}
