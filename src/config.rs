use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::Path;

use crate::domain::{AlphaMarker, DEFAULT_ALPHA_MARKER};
use crate::error::Result;
use crate::source::github::{DEFAULT_API_URL, MAX_PER_PAGE};

/// Represents the complete configuration for semver-release.
///
/// Contains the alpha marker, tag source settings, and the commit types used
/// when classifying conventional commits.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    #[serde(default = "default_alpha_marker")]
    pub alpha_marker: String,

    #[serde(default)]
    pub github: GitHubConfig,

    #[serde(default)]
    pub conventional: ConventionalConfig,

    #[serde(default)]
    pub labels: LabelConfig,
}

fn default_alpha_marker() -> String {
    DEFAULT_ALPHA_MARKER.to_string()
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

/// Returns the environment variables searched for an API token, in order.
fn default_token_env() -> Vec<String> {
    vec!["GH_PAT".to_string(), "GITHUB_TOKEN".to_string()]
}

fn default_per_page() -> u32 {
    MAX_PER_PAGE
}

/// Returns the commit types that produce a patch release.
fn default_patch_types() -> Vec<String> {
    vec!["fix".to_string(), "refactor".to_string()]
}

/// Returns the commit types that never produce a release.
fn default_silent_types() -> Vec<String> {
    vec![
        "ci".to_string(),
        "docs".to_string(),
        "style".to_string(),
        "test".to_string(),
    ]
}

fn default_need_cc_label() -> String {
    "CC missing".to_string()
}

fn default_breaking_label() -> String {
    "breaking change".to_string()
}

/// Settings for the GitHub releases tag source.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct GitHubConfig {
    #[serde(default = "default_api_url")]
    pub api_url: String,

    #[serde(default = "default_token_env")]
    pub token_env: Vec<String>,

    #[serde(default = "default_per_page")]
    pub per_page: u32,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        GitHubConfig {
            api_url: default_api_url(),
            token_env: default_token_env(),
            per_page: default_per_page(),
        }
    }
}

impl GitHubConfig {
    /// First non-empty token found in the configured environment variables.
    pub fn token(&self) -> Option<String> {
        self.token_env
            .iter()
            .filter_map(|name| env::var(name).ok())
            .find(|value| !value.trim().is_empty())
    }
}

/// Commit types used when mapping a conventional commit to a release type.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ConventionalConfig {
    #[serde(default = "default_patch_types")]
    pub patch_types: Vec<String>,

    #[serde(default = "default_silent_types")]
    pub silent_types: Vec<String>,
}

impl Default for ConventionalConfig {
    fn default() -> Self {
        ConventionalConfig {
            patch_types: default_patch_types(),
            silent_types: default_silent_types(),
        }
    }
}

/// Pull request labels derived from a conventional title.
///
/// `names` maps a commit type or scope to the label it gets. Unmapped scopes
/// are used as labels verbatim, unmapped types get no label.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct LabelConfig {
    #[serde(default = "default_need_cc_label")]
    pub need_cc: String,

    #[serde(default = "default_breaking_label")]
    pub breaking: String,

    #[serde(default)]
    pub names: BTreeMap<String, String>,
}

impl Default for LabelConfig {
    fn default() -> Self {
        LabelConfig {
            need_cc: default_need_cc_label(),
            breaking: default_breaking_label(),
            names: BTreeMap::new(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            alpha_marker: default_alpha_marker(),
            github: GitHubConfig::default(),
            conventional: ConventionalConfig::default(),
            labels: LabelConfig::default(),
        }
    }
}

impl Config {
    /// The configured alpha marker, validated.
    pub fn alpha_marker(&self) -> Result<AlphaMarker> {
        AlphaMarker::new(self.alpha_marker.clone())
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `semver-release.toml` in current directory
/// 3. `.semver-release.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if Path::new("./semver-release.toml").exists() {
        fs::read_to_string("./semver-release.toml")?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(".semver-release.toml");
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    let config: Config = toml::from_str(&config_str)?;
    config.alpha_marker()?;
    Ok(config)
}
