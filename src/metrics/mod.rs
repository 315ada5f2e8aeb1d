//! Metric records and the aggregation driver
//!
//! A run produces one [`Metric`] per configured [`QueryKind`](crate::queries::QueryKind), in
//! configured order. The [`Aggregator`] fills them in three passes:
//!
//! 1. **Raw**: each issue-tracker, telemetry and crash-report kind is fetched once and
//!    memoized for the rest of the run.
//! 2. **Derived**: crash rates and adoption shares are computed from memoized counts,
//!    fetching any dependency that is not itself a report column.
//! 3. **Links**: the browsable query URL of each issue-tracker and crash-report kind is
//!    attached for traceability.
//!
//! Records live in a [`MetricSet`] that rejects a second write to the same kind and refuses
//! to produce a [`MetricsReport`] while any value is missing.

mod aggregator;
mod metric_set;
mod metric_value;
mod rates;
mod report;

pub use aggregator::Aggregator;
pub use metric_set::{Metric, MetricRecord, MetricSet, validate_kinds};
pub use metric_value::MetricValue;
pub use rates::{adjusted_total, adoption_share, crash_rate};
pub use report::{MetricsReport, VersionRow, VersionSummary};
