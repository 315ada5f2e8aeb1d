use super::Host;
use super::common::{CommonArgs, Session};
use crate::Result;
use crate::reports::generate_console_versions;
use clap::Parser;
use std::io::Write;

#[derive(Parser, Debug)]
pub struct VersionsArgs {
    #[command(flatten)]
    pub common: CommonArgs,
}

/// Print every resolved channel version set without querying bugs or crashes.
pub async fn show_versions<H: Host>(host: &mut H, args: &VersionsArgs) -> Result<()> {
    let session = Session::new(&args.common)?;

    let summary = match session.aggregator.resolve_versions(session.window).await {
        Ok(summary) => summary,
        Err(e) => {
            let _ = writeln!(host.error(), "❌ Version resolution failed: {e:#}");
            host.exit(1);
            return Err(e);
        }
    };

    let mut output = String::new();
    generate_console_versions(&summary, session.use_colors, &mut output)?;
    let _ = write!(host.output(), "{output}");
    Ok(())
}
