//! User interface module - logging setup and terminal output.
//!
//! Separates concerns:
//! - `formatter` - Formatting functions for error and warning messages
//! - This module - Process-level setup shared by the binaries

use tracing_subscriber::EnvFilter;

use crate::error::ReleaseError;

pub mod formatter;

pub use formatter::{display_boundary_warning, display_error};

/// Exit status for argument combinations that cannot be served.
pub const EXIT_USAGE: i32 = 2;

/// Exit status for every other failure.
pub const EXIT_FAILURE: i32 = 1;

/// Initialise the global tracing subscriber.
///
/// Respects `RUST_LOG` and falls back to `default_level`. Logs go to stderr.
pub fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

/// Process exit status for an error bubbled up to `main`.
pub fn exit_code(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<ReleaseError>() {
        Some(release_err) if release_err.is_usage() => EXIT_USAGE,
        _ => EXIT_FAILURE,
    }
}

/// Print the error chain and terminate with the matching exit status.
pub fn exit_with(err: anyhow::Error) -> ! {
    display_error(&format!("{:#}", err));
    std::process::exit(exit_code(&err))
}
