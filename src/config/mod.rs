//! Run configuration
//!
//! Configuration is read from `release-metrics.toml` in the working directory, or from an
//! explicit `--config` path. Every key is optional and falls back to the embedded
//! `default_config.toml`, which is also what `init` writes out. Unknown keys, unknown query
//! kinds, and empty or repeated kind lists are rejected before any request is made.

#[expect(clippy::module_inception, reason = "the config type lives in its own file like the other modules")]
mod config;

pub use config::{CONFIG_FILE_NAME, Config, DEFAULT_CONFIG_TOML};
