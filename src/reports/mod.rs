//! Report generation for a finished metrics run
//!
//! Three generators are provided, each accessed through a `generate` function taking a
//! [`MetricsReport`](crate::metrics::MetricsReport):
//! - **Console**: the resolved version sets and one aligned line per metric
//! - **Excel**: a workbook with a sheet of hyperlinked query descriptions and a sheet
//!   holding the date and one column per query kind, ratios formatted as percentages
//! - **JSON**: the date, every metric with its description and URL, and the link list
//!
//! Metrics always appear in the configured kind order.

mod console;
mod excel;
mod json;

pub use console::generate as generate_console;
pub use console::generate_versions as generate_console_versions;
pub use excel::generate as generate_xlsx;
pub use json::generate as generate_json;
