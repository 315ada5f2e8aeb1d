//! Setup shared by the commands that talk to the upstream services.

use crate::Result;
use crate::config::Config;
use crate::context::ReportingWindow;
use crate::facts::Providers;
use crate::metrics::Aggregator;
use camino::Utf8PathBuf;
use chrono::NaiveDate;
use clap::{Args, ValueEnum};
use std::io::IsTerminal;

const LOG_TARGET: &str = "  commands";

/// Log level for diagnostic output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// No logging output
    None,

    /// Only error messages
    Error,

    /// Warning and error messages
    Warn,

    /// Info, warning, and error messages
    Info,

    /// Debug, info, warning, and error messages
    Debug,

    /// Trace, debug, info, warning, and error messages
    Trace,
}

/// Color mode configuration for output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Always use colors
    Always,

    /// Never use colors
    Never,

    /// Use colors if the output is a terminal, otherwise don't use colors
    Auto,
}

/// Arguments shared by the `collect` and `versions` commands
#[derive(Args, Debug, Clone)]
pub struct CommonArgs {
    /// Path to configuration file (default is `release-metrics.toml`)
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<Utf8PathBuf>,

    /// Bugzilla API key
    #[arg(long, value_name = "KEY", env = "BMO_API_KEY", hide_env_values = true)]
    pub bugzilla_api_key: Option<String>,

    /// Collect for this day instead of today (YYYY-MM-DD); counts cover the day before
    #[arg(long, value_name = "DATE")]
    pub date: Option<NaiveDate>,

    /// Include this many nightly cycles before the latest one
    #[arg(long, value_name = "COUNT", help_heading = "Channel Versions")]
    pub include_previous_dailies: Option<u32>,

    /// Include the previous beta cycle
    #[arg(long, help_heading = "Channel Versions")]
    pub include_previous_beta: bool,

    /// Include this many release cycles before the latest one
    #[arg(long, value_name = "COUNT", help_heading = "Channel Versions")]
    pub include_previous_releases: Option<u32>,

    /// Track the upcoming ESR major instead of the current one
    #[arg(long, help_heading = "Channel Versions")]
    pub esr_next: bool,

    /// Keep installations on legacy ESR majors in total-adi
    #[arg(long, help_heading = "Channel Versions")]
    pub include_legacy_esr: bool,

    /// Control when to use colored output
    #[arg(long, value_name = "WHEN", default_value = "auto")]
    pub color: ColorMode,

    /// Set the logging level for diagnostic output
    #[arg(long, value_name = "LEVEL", default_value = "info")]
    pub log_level: LogLevel,
}

/// Everything a command needs to run the aggregation.
#[derive(Debug)]
pub struct Session {
    pub config: Config,
    pub aggregator: Aggregator,
    pub window: ReportingWindow,
    pub use_colors: bool,
}

impl Session {
    /// Set up logging, load the configuration, apply command-line overrides and create the
    /// aggregator.
    pub fn new(args: &CommonArgs) -> Result<Self> {
        init_logging(args.log_level);

        let mut config = Config::load(&Utf8PathBuf::from("."), args.config.as_ref())?;
        apply_overrides(&mut config, args);

        let providers = Providers::new(config.endpoints.clone(), args.bugzilla_api_key.clone())?;
        let aggregator = Aggregator::new(providers, config.run_options(), config.kinds.clone())?;
        let window = args.date.map_or_else(ReportingWindow::now, ReportingWindow::ending);
        log::debug!(target: LOG_TARGET, "Reporting window {window}");

        let use_colors = match args.color {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => std::io::stdout().is_terminal(),
        };

        Ok(Self {
            config,
            aggregator,
            window,
            use_colors,
        })
    }
}

fn apply_overrides(config: &mut Config, args: &CommonArgs) {
    if let Some(count) = args.include_previous_dailies {
        config.include_previous_dailies = count;
    }

    if let Some(count) = args.include_previous_releases {
        config.include_previous_releases = count;
    }

    config.include_previous_beta |= args.include_previous_beta;
    config.esr_next |= args.esr_next;
    config.include_legacy_esr |= args.include_legacy_esr;
}

/// Initialize logger based on log level
///
/// A logger that is already installed is left in place.
pub fn init_logging(log_level: LogLevel) {
    let level = match log_level {
        LogLevel::None => return,
        LogLevel::Error => "error",
        LogLevel::Warn => "warn",
        LogLevel::Info => "info",
        LogLevel::Debug => "debug",
        LogLevel::Trace => "trace",
    };

    let env = env_logger::Env::default().filter_or("RUST_LOG", level);

    let _ = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(matches!(log_level, LogLevel::Debug | LogLevel::Trace))
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser, Debug)]
    struct Wrapper {
        #[command(flatten)]
        common: CommonArgs,
    }

    fn parse(args: &[&str]) -> CommonArgs {
        Wrapper::parse_from(core::iter::once("test").chain(args.iter().copied())).common
    }

    #[test]
    fn test_overrides_replace_file_values() {
        let args = parse(&["--include-previous-dailies", "2", "--esr-next", "--include-previous-beta"]);
        let mut config = Config::default();
        apply_overrides(&mut config, &args);

        assert_eq!(config.include_previous_dailies, 2);
        assert_eq!(config.include_previous_releases, 0);
        assert!(config.esr_next);
        assert!(config.include_previous_beta);
        assert!(!config.include_legacy_esr);
    }

    #[test]
    fn test_absent_flags_keep_file_values() {
        let args = parse(&[]);
        let mut config = Config {
            include_previous_releases: 3,
            include_legacy_esr: true,
            ..Config::default()
        };
        apply_overrides(&mut config, &args);

        assert_eq!(config.include_previous_releases, 3);
        assert!(config.include_legacy_esr);
    }

    #[test]
    fn test_date_parses() {
        let args = parse(&["--date", "2025-01-03"]);
        assert_eq!(args.date, NaiveDate::from_ymd_opt(2025, 1, 3));
        assert_eq!(args.log_level, LogLevel::Info);
    }
}
