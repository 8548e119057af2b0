use thiserror::Error;

/// Unified error type for release version operations
#[derive(Error, Debug)]
pub enum ReleaseError {
    #[error("Invalid version string: '{0}'")]
    InvalidVersion(String),

    #[error("No release history")]
    EmptyHistory,

    #[error("Usage error: {0}")]
    Usage(String),

    #[error("Version store error: {0}")]
    Store(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Tag source error: {0}")]
    Source(String),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in semver-release
pub type Result<T> = std::result::Result<T, ReleaseError>;

impl ReleaseError {
    /// Create an invalid version error for the offending input
    pub fn invalid_version(input: impl Into<String>) -> Self {
        ReleaseError::InvalidVersion(input.into())
    }

    /// Create a usage error with context
    pub fn usage(msg: impl Into<String>) -> Self {
        ReleaseError::Usage(msg.into())
    }

    /// Create a version store error with context
    pub fn store(msg: impl Into<String>) -> Self {
        ReleaseError::Store(msg.into())
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        ReleaseError::Config(msg.into())
    }

    /// Create a tag source error with context
    pub fn source(msg: impl Into<String>) -> Self {
        ReleaseError::Source(msg.into())
    }

    /// Whether the error stems from how the tool was invoked
    pub fn is_usage(&self) -> bool {
        matches!(self, ReleaseError::Usage(_))
    }
}

impl From<toml::de::Error> for ReleaseError {
    fn from(err: toml::de::Error) -> Self {
        ReleaseError::Config(err.to_string())
    }
}
