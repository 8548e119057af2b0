use crate::domain::ReleaseOrigin;
use crate::error::{ReleaseError, Result};
use crate::source::TagSource;
use std::collections::HashMap;

/// Mock tag source for testing without network access
pub struct MockTagSource {
    releases: HashMap<String, Vec<ReleaseOrigin>>,
    failure: Option<String>,
}

impl MockTagSource {
    /// Create a new mock with no repositories
    pub fn new() -> Self {
        MockTagSource {
            releases: HashMap::new(),
            failure: None,
        }
    }

    /// Create a mock serving `tags` (newest first) for `repo`
    pub fn with_tags(repo: &str, tags: &[&str]) -> Self {
        let mut source = MockTagSource::new();
        for tag in tags {
            source.add_release(repo, tag);
        }
        source
    }

    /// Create a mock whose every listing fails with `message`
    pub fn failing(message: impl Into<String>) -> Self {
        MockTagSource {
            releases: HashMap::new(),
            failure: Some(message.into()),
        }
    }

    /// Append a release below the ones already added for `repo`
    pub fn add_release(&mut self, repo: impl Into<String>, tag: &str) {
        let url = format!("https://example.invalid/releases/{}", tag);
        self.add_origin(
            repo,
            ReleaseOrigin {
                url,
                ..ReleaseOrigin::new(tag)
            },
        );
    }

    /// Append a fully described release for `repo`
    pub fn add_origin(&mut self, repo: impl Into<String>, origin: ReleaseOrigin) {
        self.releases.entry(repo.into()).or_default().push(origin);
    }

    /// Register `repo` as existing but without releases
    pub fn add_empty_repo(&mut self, repo: impl Into<String>) {
        self.releases.entry(repo.into()).or_default();
    }
}

impl Default for MockTagSource {
    fn default() -> Self {
        Self::new()
    }
}

impl TagSource for MockTagSource {
    fn list_releases(&self, repo: &str) -> Result<Vec<ReleaseOrigin>> {
        if let Some(message) = &self.failure {
            return Err(ReleaseError::source(message.clone()));
        }
        self.releases
            .get(repo)
            .cloned()
            .ok_or_else(|| ReleaseError::source(format!("Repository not found: {}", repo)))
    }
}
