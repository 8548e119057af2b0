//! Formatting functions for diagnostic output.
//!
//! Everything here writes to stderr so that stdout carries only the
//! answer a pipeline consumes.

use crate::boundary::BoundaryWarning;

/// Render an error message with a red `ERROR:` label.
pub fn format_error(message: &str) -> String {
    format!("\x1b[31mERROR:\x1b[0m {}", message)
}

/// Render a boundary warning with a yellow warning icon.
pub fn format_boundary_warning(warning: &BoundaryWarning) -> String {
    format!("\x1b[33m⚠ WARNING:\x1b[0m {}", warning)
}

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{}", format_error(message));
}

/// Display a boundary warning to the user.
pub fn display_boundary_warning(warning: &BoundaryWarning) {
    eprintln!("{}", format_boundary_warning(warning));
}
