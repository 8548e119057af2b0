pub mod analyzer;
pub mod boundary;
pub mod cli;
pub mod config;
pub mod conventional;
pub mod domain;
pub mod error;
pub mod source;
pub mod store;
pub mod ui;

pub use error::{ReleaseError, Result};
