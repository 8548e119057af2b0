use std::fmt;

/// Non-fatal conditions met while resolving a release version.
/// These are reported on stderr and never change the answer printed.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryWarning {
    /// Tag exists but cannot be parsed as a semantic version
    UnparsableTag { tag: String },
    /// The tag source returned no usable release
    EmptyHistory { repository: String },
    /// A save was requested but the computed version is not newer
    DowngradeRefused {
        path: String,
        version: String,
        reference: String,
    },
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::UnparsableTag { tag } => {
                write!(f, "Skipping tag '{}': not a semantic version", tag)
            }
            BoundaryWarning::EmptyHistory { repository } => {
                write!(f, "No versioned releases found for '{}'", repository)
            }
            BoundaryWarning::DowngradeRefused {
                path,
                version,
                reference,
            } => {
                write!(
                    f,
                    "Not writing {} to '{}': not newer than {} (use --fsave to force)",
                    version, path, reference
                )
            }
        }
    }
}
