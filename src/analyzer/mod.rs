//! Queries over the release history

pub mod cycle;
pub mod history;

pub use cycle::{cycle_edge, CycleEdge};
pub use history::{History, Query};
