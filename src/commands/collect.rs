use super::Host;
use super::common::{CommonArgs, Session};
use crate::Result;
use crate::reports::{generate_console, generate_json, generate_xlsx};
use camino::Utf8PathBuf;
use clap::Parser;
use ohno::IntoAppError;
use std::fs;
use std::io::Write;

const LOG_TARGET: &str = "   collect";

#[derive(Parser, Debug)]
pub struct CollectArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Output the metrics to an Excel workbook (default is `release-metrics-<date>.xlsx`)
    #[arg(long, value_name = "PATH", help_heading = "Report Output")]
    pub excel: Option<Utf8PathBuf>,

    /// Skip the Excel workbook
    #[arg(long, conflicts_with = "excel", help_heading = "Report Output")]
    pub no_excel: bool,

    /// Output the metrics to a JSON file
    #[arg(long, value_name = "PATH", help_heading = "Report Output")]
    pub json: Option<Utf8PathBuf>,
}

/// Collect every configured metric and write the reports.
///
/// Nothing is written unless every metric was collected.
pub async fn collect_metrics<H: Host>(host: &mut H, args: &CollectArgs) -> Result<()> {
    let session = Session::new(&args.common)?;

    let report = match session.aggregator.collect(session.window).await {
        Ok(report) => report,
        Err(e) => {
            let _ = writeln!(host.error(), "❌ Metrics collection failed: {e:#}");
            host.exit(1);
            return Err(e);
        }
    };

    let mut console_output = String::new();
    generate_console(&report, session.use_colors, &mut console_output)?;
    let _ = write!(host.output(), "{console_output}");

    if !args.no_excel {
        let filename = args
            .excel
            .clone()
            .unwrap_or_else(|| Utf8PathBuf::from(format!("release-metrics-{}.xlsx", report.date.format("%Y-%m-%d"))));

        let mut file = fs::File::create(&filename).into_app_err_with(|| format!("creating Excel report '{filename}'"))?;
        generate_xlsx(&report, &mut file)?;
        log::info!(target: LOG_TARGET, "Wrote Excel report to {filename}");
        let _ = writeln!(host.output(), "Excel report: {filename}");
    }

    if let Some(filename) = &args.json {
        let mut json_output = String::new();
        generate_json(&report, &mut json_output)?;
        fs::write(filename, json_output).into_app_err_with(|| format!("writing JSON report '{filename}'"))?;
        log::info!(target: LOG_TARGET, "Wrote JSON report to {filename}");
        let _ = writeln!(host.output(), "JSON report: {filename}");
    }

    Ok(())
}
