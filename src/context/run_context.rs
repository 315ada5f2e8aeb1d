use super::{ReportingWindow, RunOptions};
use crate::Result;
use crate::catalog::{Channel, ProductVersionMetadata, ResolveMode, VersionCatalog};
use crate::facts::AdiSnapshot;
use ohno::app_err;
use std::collections::HashMap;
use std::sync::Arc;

const LOG_TARGET: &str = "   context";

/// Write-once state of a single collection run.
///
/// The metadata, window and options are fixed at construction. The telemetry snapshot is
/// installed at most once, and channel version sets are resolved on first access and then
/// served from the memo for the rest of the run.
#[derive(Debug)]
pub struct RunContext {
    metadata: ProductVersionMetadata,
    window: ReportingWindow,
    options: RunOptions,
    snapshot: Option<Arc<AdiSnapshot>>,
    resolved: HashMap<(Channel, ResolveMode), Arc<[String]>>,
}

impl RunContext {
    #[must_use]
    pub fn new(metadata: ProductVersionMetadata, window: ReportingWindow, options: RunOptions) -> Self {
        Self {
            metadata,
            window,
            options,
            snapshot: None,
            resolved: HashMap::new(),
        }
    }

    #[must_use]
    pub const fn window(&self) -> ReportingWindow {
        self.window
    }

    #[must_use]
    pub const fn options(&self) -> &RunOptions {
        &self.options
    }

    #[must_use]
    pub const fn catalog(&self) -> VersionCatalog<'_> {
        VersionCatalog::new(&self.metadata, &self.options)
    }

    /// The telemetry snapshot, if one has been installed.
    #[must_use]
    pub const fn snapshot(&self) -> Option<&Arc<AdiSnapshot>> {
        self.snapshot.as_ref()
    }

    /// Install the run's telemetry snapshot.
    ///
    /// Only the first snapshot is kept; later calls return the one already installed.
    pub fn install_snapshot(&mut self, snapshot: AdiSnapshot) -> Arc<AdiSnapshot> {
        Arc::clone(self.snapshot.get_or_insert_with(|| Arc::new(snapshot)))
    }

    /// Resolve the versions of `channel` in `mode`, memoized for the rest of the run.
    ///
    /// The maintenance channel is discovered from the most recent day of the telemetry
    /// snapshot, which must have been installed beforehand.
    pub fn versions(&mut self, channel: Channel, mode: ResolveMode) -> Result<Arc<[String]>> {
        if let Some(versions) = self.resolved.get(&(channel, mode)) {
            return Ok(Arc::clone(versions));
        }

        let catalog = self.catalog();
        let versions: Arc<[String]> = if let Some(versions) = catalog.synthesized(channel, mode)? {
            versions.into()
        } else {
            let snapshot = self
                .snapshot
                .as_ref()
                .ok_or_else(|| app_err!("the telemetry snapshot is required to resolve the {channel} channel"))?;
            let (date, day) = snapshot.latest_day()?;
            log::debug!(target: LOG_TARGET, "Discovering {channel} versions from telemetry for {date}");
            catalog.maintenance(mode, day.version_names())?.into()
        };

        log::info!(target: LOG_TARGET, "Resolved {channel} versions ({mode}): {}", versions.join(", "));
        let _ = self.resolved.insert((channel, mode), Arc::clone(&versions));
        Ok(versions)
    }
}
