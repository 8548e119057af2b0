//! Tag source abstraction layer
//!
//! A tag source lists the published releases of a repository, newest first.
//! The release history is built from exactly one such listing per run.
//!
//! - [github::GitHubReleases]: the GitHub REST releases endpoint
//! - [mock::MockTagSource]: in-memory releases for tests
//!
//! ```rust
//! # use semver_release::source::{MockTagSource, TagSource};
//! let mut source = MockTagSource::new();
//! source.add_release("owner/repo", "v1.0.0");
//! assert_eq!(source.list_release_tags("owner/repo").unwrap(), vec!["v1.0.0"]);
//! ```

pub mod github;
pub mod mock;

pub use github::GitHubReleases;
pub use mock::MockTagSource;

use crate::domain::ReleaseOrigin;
use crate::error::Result;

/// Provider of release listings
pub trait TagSource {
    /// List the releases of `repo` (`owner/name`), newest first
    ///
    /// Failures are not retried; they end the run.
    fn list_releases(&self, repo: &str) -> Result<Vec<ReleaseOrigin>>;

    /// List only the tag names of `repo`, newest first
    fn list_release_tags(&self, repo: &str) -> Result<Vec<String>> {
        Ok(self
            .list_releases(repo)?
            .into_iter()
            .map(|release| release.tag_name)
            .collect())
    }
}
