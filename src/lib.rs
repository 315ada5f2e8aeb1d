//! release-metrics crate
//!
//! Collects release-readiness signals for a product from an issue tracker, a usage telemetry
//! endpoint and a crash-report search endpoint, normalizes them against the versions that
//! currently make up each release channel, and emits a consolidated report.
//!
//! # Module Organization
//!
//! - [`catalog`]: Channel version resolution from upstream product metadata
//! - [`context`]: Per-run state (reporting window, memoized version sets)
//! - [`queries`]: Query kinds and provider URL construction
//! - [`facts`]: HTTP adapters for the external providers
//! - [`metrics`]: Metric records and the aggregation driver
//! - [`reports`]: Report generation in multiple formats
//! - [`config`]: Run configuration

/// Result type alias using `ohno::AppError` as the default error type.
pub type Result<T, E = ohno::AppError> = core::result::Result<T, E>;

pub mod catalog;
pub mod commands;
pub mod config;
pub mod context;
pub mod facts;
pub mod metrics;
pub mod queries;
pub mod reports;

pub use crate::commands::{Host, run};
