//! Per-run state shared by every component of a metrics collection.
//!
//! A [`RunContext`] is created once at the start of a run and threaded through the
//! aggregation. It pins the [`ReportingWindow`] and the upstream version metadata so that
//! every query in one report sees the same dates and the same channel versions, and it
//! memoizes the resolved version set of each `(channel, mode)` pair.

mod options;
mod run_context;
mod window;

pub use options::{AffectedMatch, RunOptions};
pub use run_context::RunContext;
pub use window::ReportingWindow;
