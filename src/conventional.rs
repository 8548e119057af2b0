use crate::config::{ConventionalConfig, LabelConfig};
use crate::domain::ReleaseType;
use regex::Regex;
use std::collections::BTreeSet;
use std::fmt;

/// Label added while a test phase is running
pub const ONGOING_TEST_LABEL: &str = "ongoing test";

/// Types and scopes whose changes need the running test phase
const TEST_RELEVANT: [&str; 3] = ["feat", "fix", "refactor"];

#[derive(Debug, PartialEq)]
pub struct ParsedCommit {
    pub r#type: String,
    pub scope: Option<String>,
    pub description: String,
    pub is_breaking_change: bool,
}

/// What a change asks the release pipeline to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseSignal {
    /// Bump the version by the given release type
    Bump(ReleaseType),
    /// Publish the pending version as it is
    Release,
}

impl fmt::Display for ReleaseSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReleaseSignal::Bump(release_type) => write!(f, "{}", release_type),
            ReleaseSignal::Release => write!(f, "release"),
        }
    }
}

/// Parse `type(scope)!: description` style commit messages
///
/// Returns `None` for messages that are not conventional commits.
pub fn parse_conventional_commit(message: &str) -> Option<ParsedCommit> {
    let re = Regex::new(r"^([a-z]+)\s*(?:\(([^)]+)\))?(!?):\s*(.*)").ok()?;
    let captures = re.captures(message.trim_start())?;

    let r#type = captures.get(1)?.as_str().to_string();
    let scope = captures.get(2).map(|m| m.as_str().to_string());
    let exclamation_marker = captures.get(3).map(|m| m.as_str()).unwrap_or("");
    let description = captures
        .get(4)
        .map(|m| m.as_str().to_string())
        .unwrap_or_default();

    let is_breaking_change = exclamation_marker == "!"
        || message.contains("BREAKING CHANGE:")
        || message.contains("BREAKING-CHANGE:");

    Some(ParsedCommit {
        r#type,
        scope,
        description,
        is_breaking_change,
    })
}

/// Release signal of a commit (or pull request) title and body
pub fn classify_commit(
    title: &str,
    body: Option<&str>,
    config: &ConventionalConfig,
) -> Option<ReleaseSignal> {
    let message = match body {
        Some(body) if !body.trim().is_empty() => format!("{}\n\n{}", title, body),
        _ => title.to_string(),
    };
    let parsed = parse_conventional_commit(&message)?;

    if parsed.is_breaking_change {
        return Some(ReleaseSignal::Bump(ReleaseType::Major));
    }
    if parsed.r#type == "release" || parsed.scope.as_deref() == Some("release") {
        return Some(ReleaseSignal::Release);
    }
    if parsed.r#type == "feat" {
        return Some(ReleaseSignal::Bump(ReleaseType::Minor));
    }
    if config.patch_types.contains(&parsed.r#type) {
        return Some(ReleaseSignal::Bump(ReleaseType::Patch));
    }
    if !config.silent_types.contains(&parsed.r#type) {
        return Some(ReleaseSignal::Bump(ReleaseType::Alpha));
    }
    None
}

/// Labels for a pull request with the given title and body
///
/// A title that is not a conventional commit only gets `config.need_cc`.
/// Labels come back sorted and without duplicates.
pub fn pr_labels(title: &str, body: Option<&str>, config: &LabelConfig, ongoing_test: bool) -> Vec<String> {
    let message = match body {
        Some(body) => format!("{}\n{}", title, body),
        None => title.to_string(),
    };
    let Some(parsed) = parse_conventional_commit(&message) else {
        return vec![config.need_cc.clone()];
    };

    let mut labels = BTreeSet::new();
    if parsed.is_breaking_change {
        labels.insert(config.breaking.clone());
    }
    if parsed.r#type == "release" {
        labels.insert("fix".to_string());
    } else if let Some(label) = config.names.get(&parsed.r#type) {
        labels.insert(label.clone());
    }
    if let Some(scope) = &parsed.scope {
        labels.insert(config.names.get(scope).unwrap_or(scope).clone());
    }

    let relevant = std::iter::once(parsed.r#type.as_str())
        .chain(parsed.scope.as_deref())
        .any(|name| TEST_RELEVANT.contains(&name));
    if ongoing_test && (relevant || parsed.is_breaking_change) {
        labels.insert(ONGOING_TEST_LABEL.to_string());
    }

    labels.into_iter().collect()
}

/// Release type a version number represents
///
/// Accepts compact alpha versions (`1.0.0a1`). `None` for `0.0.0` and for
/// anything that is not a version.
pub fn classify_version(version: &str) -> Option<ReleaseType> {
    let re = Regex::new(r"^(\d+\.\d+\.\d+)([a-zA-Z].*)$").ok()?;
    let version = version.trim();
    let normalized = match re.captures(version) {
        Some(captures) => format!("{}-{}", &captures[1], &captures[2]),
        None => version.to_string(),
    };
    let parsed = semver::Version::parse(&normalized).ok()?;

    if !parsed.pre.is_empty() {
        Some(ReleaseType::Alpha)
    } else if parsed.patch != 0 {
        Some(ReleaseType::Patch)
    } else if parsed.minor != 0 {
        Some(ReleaseType::Minor)
    } else if parsed.major != 0 {
        Some(ReleaseType::Major)
    } else {
        None
    }
}
