//! Command-line interface and orchestration for release-metrics
//!
//! This module implements the CLI commands and wires configuration, providers, the
//! aggregator and the report generators together.
//!
//! # Commands
//!
//! - **collect**: Resolve channel versions, query every configured kind, and write the
//!   console summary plus Excel and optional JSON reports
//! - **versions**: Resolve and print the channel version sets without querying bugs or crashes
//! - **init**: Generate a default configuration file
//! - **validate**: Check a configuration file for syntax errors, unknown keys and bad kind lists
//!
//! All output goes through the [`Host`] trait so commands can be exercised in tests without
//! touching the real terminal or terminating the process.

mod collect;
mod common;
mod host;
mod init;
mod run;
mod validate;
mod versions;

pub use collect::{CollectArgs, collect_metrics};
pub use common::{ColorMode, CommonArgs, LogLevel, Session, init_logging};
pub use host::Host;
pub use init::{InitArgs, init_config};
pub use run::run;
pub use validate::{ValidateArgs, validate_config};
pub use versions::{VersionsArgs, show_versions};
