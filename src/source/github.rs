//! GitHub REST releases as a tag source.

use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, AUTHORIZATION, ETAG};
use serde::Deserialize;
use tracing::debug;

use crate::config::GitHubConfig;
use crate::domain::ReleaseOrigin;
use crate::error::{ReleaseError, Result};
use crate::source::TagSource;

/// Default GitHub API base URL.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Largest page size the releases endpoint accepts.
pub const MAX_PER_PAGE: u32 = 100;

const USER_AGENT: &str = concat!("semver-release/", env!("CARGO_PKG_VERSION"));

#[derive(Deserialize)]
struct GithubRelease {
    tag_name: String,
    url: String,
    tarball_url: Option<String>,
    name: Option<String>,
    body: Option<String>,
}

/// Lists releases through `GET /repos/{owner}/{repo}/releases`.
pub struct GitHubReleases {
    client: Client,
    api_url: String,
    token: Option<String>,
    per_page: u32,
}

impl GitHubReleases {
    /// Create a source for github.com, authenticated when `token` is set.
    pub fn new(token: Option<String>) -> Result<Self> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;

        Ok(Self {
            client,
            api_url: DEFAULT_API_URL.to_string(),
            token: token.filter(|t| !t.is_empty()),
            per_page: MAX_PER_PAGE,
        })
    }

    /// Create a source from the `[github]` configuration section.
    pub fn from_config(config: &GitHubConfig) -> Result<Self> {
        Ok(Self::new(config.token())?
            .with_api_url(&config.api_url)
            .with_per_page(config.per_page))
    }

    /// Point the source at a GitHub Enterprise (or test) API.
    pub fn with_api_url(mut self, api_url: &str) -> Self {
        self.api_url = api_url.trim_end_matches('/').to_string();
        self
    }

    /// Page size used while listing, clamped to `1..=100`.
    pub fn with_per_page(mut self, per_page: u32) -> Self {
        self.per_page = per_page.clamp(1, MAX_PER_PAGE);
        self
    }

    pub fn releases_url(&self, repo: &str, page: u32) -> String {
        format!(
            "{}/repos/{}/releases?per_page={}&page={}",
            self.api_url, repo, self.per_page, page
        )
    }

    fn fetch_page(&self, repo: &str, page: u32) -> Result<Vec<ReleaseOrigin>> {
        let url = self.releases_url(repo, page);
        debug!(%url, "fetching releases page");

        let mut request = self
            .client
            .get(&url)
            .header(ACCEPT, "application/vnd.github+json");
        if let Some(token) = &self.token {
            request = request.header(AUTHORIZATION, format!("Bearer {token}"));
        }

        let response = request.send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(ReleaseError::source(format!(
                "GET {} returned {}",
                url, status
            )));
        }

        let etag = response
            .headers()
            .get(ETAG)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let body = response.text()?;

        parse_releases_page(&body, etag.as_deref())
    }
}

impl TagSource for GitHubReleases {
    fn list_releases(&self, repo: &str) -> Result<Vec<ReleaseOrigin>> {
        validate_repo(repo)?;

        let mut releases = Vec::new();
        let mut page = 1;
        loop {
            let batch = self.fetch_page(repo, page)?;
            let short_page = batch.len() < self.per_page as usize;
            releases.extend(batch);
            if short_page {
                break;
            }
            page += 1;
        }

        debug!(repo, count = releases.len(), "listed releases");
        Ok(releases)
    }
}

/// Decode one page of the releases endpoint, keeping GitHub's order.
pub fn parse_releases_page(body: &str, etag: Option<&str>) -> Result<Vec<ReleaseOrigin>> {
    let releases: Vec<GithubRelease> = serde_json::from_str(body)
        .map_err(|e| ReleaseError::source(format!("Unexpected releases payload: {}", e)))?;

    Ok(releases
        .into_iter()
        .map(|release| ReleaseOrigin {
            tag_name: release.tag_name,
            url: release.url,
            tarball_url: release.tarball_url,
            title: release.name,
            body: release.body,
            etag: etag.map(str::to_string),
        })
        .collect())
}

/// Check that `repo` has the `owner/name` form.
pub fn validate_repo(repo: &str) -> Result<()> {
    match repo.split_once('/') {
        Some((owner, name)) if !owner.is_empty() && !name.is_empty() && !name.contains('/') => {
            Ok(())
        }
        _ => Err(ReleaseError::usage(format!(
            "Repository must look like 'owner/name', got '{}'",
            repo
        ))),
    }
}
