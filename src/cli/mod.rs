//! Workflows behind the command-line binaries

pub mod orchestration;

pub use orchestration::{run_query, QueryMode, QueryResult, ReleaseQueryArgs, SaveMode};
