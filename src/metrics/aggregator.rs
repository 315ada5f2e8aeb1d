use super::rates::{adjusted_total, adoption_share, crash_rate};
use super::{MetricSet, MetricValue, MetricsReport, VersionSummary, validate_kinds};
use crate::Result;
use crate::catalog::{Channel, ResolveMode, legacy_cohort_adoption};
use crate::context::{ReportingWindow, RunContext, RunOptions};
use crate::facts::{AdiSnapshot, Providers, channel_adoption};
use crate::queries::{AdoptionScope, Provider, QueryKind, QuerySource, crash_report_query, issue_tracker_query};
use ohno::{EnrichableExt, bail};
use std::collections::HashMap;
use std::sync::Arc;
use url::Url;

const LOG_TARGET: &str = "aggregator";

/// Drives a collection run: resolves channel versions, queries every provider once per kind,
/// computes the derived metrics and assembles the report.
#[derive(Debug)]
pub struct Aggregator {
    providers: Providers,
    options: RunOptions,
    kinds: Vec<QueryKind>,
}

impl Aggregator {
    /// Create an aggregator for `kinds`, in report column order.
    pub fn new(providers: Providers, options: RunOptions, kinds: Vec<QueryKind>) -> Result<Self> {
        validate_kinds(&kinds)?;
        Ok(Self { providers, options, kinds })
    }

    /// Run every configured query for the reporting window and build the report.
    ///
    /// Raw kinds are fetched first in configured order, then derived kinds are computed,
    /// fetching any dependency that is not itself a report column. The first failure aborts
    /// the run.
    pub async fn collect(&self, window: ReportingWindow) -> Result<MetricsReport> {
        self.check_credentials()?;

        log::info!(target: LOG_TARGET, "Collecting {} metric(s) for {window}", self.kinds.len());
        let mut run = Run::start(&self.providers, window, self.options.clone()).await?;

        let maintenance_major = run.ctx.catalog().maintenance_major()?;
        let mut set = MetricSet::new(&self.kinds, |kind| kind.description(maintenance_major))?;

        for &kind in self.kinds.iter().filter(|kind| !kind.is_derived()) {
            let count = run.raw(kind).await?;
            set.set_value(kind, MetricValue::Count(count))?;
        }

        for &kind in self.kinds.iter().filter(|kind| kind.is_derived()) {
            let value = run.derived(kind).await?;
            set.set_value(kind, value)?;
        }

        for &kind in &self.kinds {
            if let Some(url) = run.human_urls.remove(&kind) {
                set.attach_url(kind, url)?;
            }
        }

        let versions = run.summary().await?;
        set.into_report(window.today(), versions)
    }

    /// Resolve and summarize every channel's versions without querying bugs or crashes.
    pub async fn resolve_versions(&self, window: ReportingWindow) -> Result<VersionSummary> {
        let mut run = Run::start(&self.providers, window, self.options.clone()).await?;
        run.summary().await
    }

    /// Fail before any network request when an issue-tracker kind is configured, directly
    /// or as a dependency, and no credential is available.
    fn check_credentials(&self) -> Result<()> {
        if self.providers.has_bugzilla_credential() {
            return Ok(());
        }

        let needs_credential = self
            .kinds
            .iter()
            .flat_map(|&kind| core::iter::once(kind).chain(kind.dependencies()))
            .find(|kind| kind.provider() == Provider::IssueTracker);

        if let Some(kind) = needs_credential {
            bail!("query kind '{kind}' needs a Bugzilla API key, set BMO_API_KEY or pass --bugzilla-api-key");
        }

        Ok(())
    }
}

/// The mutable state of one run: the context plus every raw count and browsable URL
/// produced so far.
struct Run<'a> {
    providers: &'a Providers,
    ctx: RunContext,
    counts: HashMap<QueryKind, u64>,
    human_urls: HashMap<QueryKind, Url>,
}

impl<'a> Run<'a> {
    async fn start(providers: &'a Providers, window: ReportingWindow, options: RunOptions) -> Result<Self> {
        let metadata = providers.product_metadata().await?;
        log::info!(
            target: LOG_TARGET,
            "Product metadata: nightly {}, beta {}, release {}, maintenance {}",
            metadata.nightly_major(),
            metadata.beta_major(),
            metadata.release_major(),
            metadata.maintenance_major()
        );

        Ok(Self {
            providers,
            ctx: RunContext::new(metadata, window, options),
            counts: HashMap::new(),
            human_urls: HashMap::new(),
        })
    }

    /// The run's telemetry snapshot, downloaded on first use.
    async fn snapshot(&mut self) -> Result<Arc<AdiSnapshot>> {
        if let Some(snapshot) = self.ctx.snapshot() {
            return Ok(Arc::clone(snapshot));
        }

        let snapshot = self.providers.adi_snapshot().await?;
        Ok(self.ctx.install_snapshot(snapshot))
    }

    async fn versions(&mut self, channel: Channel, mode: ResolveMode) -> Result<Arc<[String]>> {
        if channel == Channel::Maintenance {
            let _ = self.snapshot().await?;
        }

        self.ctx.versions(channel, mode)
    }

    /// The raw count of `kind`, fetched at most once per run.
    async fn raw(&mut self, kind: QueryKind) -> Result<u64> {
        if let Some(&count) = self.counts.get(&kind) {
            return Ok(count);
        }

        log::info!(target: LOG_TARGET, "Querying {} for '{kind}'", kind.provider());
        let count = match kind.source() {
            QuerySource::IssueTracker(_) => self.bug_count(kind).await,
            QuerySource::Telemetry(scope) => self.adoption(kind, scope).await,
            QuerySource::CrashReports(channel) => self.crash_count(kind, channel).await,
            QuerySource::CrashRate { .. } | QuerySource::AdoptionShare { .. } => {
                bail!("'{kind}' is derived and has no raw count")
            }
        }
        .map_err(|e| e.enrich_with(|| format!("collecting '{kind}' from {}", kind.provider())))?;

        log::info!(target: LOG_TARGET, "{kind}: {count}");
        let _ = self.counts.insert(kind, count);
        Ok(count)
    }

    async fn bug_count(&mut self, kind: QueryKind) -> Result<u64> {
        let options = self.ctx.options();
        let flags = self.ctx.catalog().status_flags(&options.status_field_prefix)?;
        let query = issue_tracker_query(&self.providers.endpoints().bugzilla, kind, &flags, options.affected_match)?;

        let count = self.providers.bug_count(&query.machine_url).await?;
        let _ = self.human_urls.insert(kind, query.human_url);
        Ok(count)
    }

    async fn crash_count(&mut self, kind: QueryKind, channel: Channel) -> Result<u64> {
        let versions = self.versions(channel, ResolveMode::CurrentOnly).await?;
        let window = self.ctx.window();
        let query = crash_report_query(
            &self.providers.endpoints().crash_stats,
            &self.ctx.options().product,
            kind,
            &versions,
            &window,
        )?;

        let count = self.providers.crash_count(&query.machine_url).await?;
        let _ = self.human_urls.insert(kind, query.human_url);
        Ok(count)
    }

    async fn adoption(&mut self, kind: QueryKind, scope: AdoptionScope) -> Result<u64> {
        let snapshot = self.snapshot().await?;
        let date = self.ctx.window().yesterday_key();
        let day = snapshot.day(&date)?;

        match scope {
            AdoptionScope::Channel(channel, mode) => {
                let versions = self.versions(channel, mode).await?;
                let count = channel_adoption(day, channel, &versions);
                log::debug!(target: LOG_TARGET, "{kind}: {count} installation(s) across {} version(s) on {date}", versions.len());
                Ok(count)
            }

            AdoptionScope::Total => {
                let options = self.ctx.options();
                let total = day.total();
                let legacy = legacy_cohort_adoption(day.versions(), options.legacy_esr_major);
                let adjusted = adjusted_total(total, legacy, options.include_legacy_esr);

                if options.include_legacy_esr {
                    log::info!(target: LOG_TARGET, "Total adoption {total} includes {legacy} on {} and older", options.legacy_esr_major);
                } else {
                    log::info!(
                        target: LOG_TARGET,
                        "Total adoption {total} adjusted to {adjusted} by excluding {legacy} on {} and older",
                        options.legacy_esr_major
                    );
                }

                Ok(adjusted)
            }
        }
    }

    async fn derived(&mut self, kind: QueryKind) -> Result<MetricValue> {
        let (numerator, denominator) = match kind.source() {
            QuerySource::CrashRate { crashes, adoption } => (crashes, adoption),
            QuerySource::AdoptionShare { adoption } => (adoption, QueryKind::TotalAdi),
            QuerySource::IssueTracker(_) | QuerySource::Telemetry(_) | QuerySource::CrashReports(_) => {
                bail!("'{kind}' is not a derived query kind")
            }
        };

        let top = self.raw(numerator).await?;
        let bottom = self.raw(denominator).await?;
        let ratio = match kind.source() {
            QuerySource::AdoptionShare { .. } => adoption_share(top, bottom),
            _ => crash_rate(top, bottom),
        };

        log::info!(target: LOG_TARGET, "{kind}: {top} / {bottom} = {}", MetricValue::Ratio(ratio));
        Ok(MetricValue::Ratio(ratio))
    }

    /// Every version set the run relies on, plus the tracked issue-tracker flags.
    async fn summary(&mut self) -> Result<VersionSummary> {
        let options = self.ctx.options();
        let prefix = options.status_field_prefix.clone();
        let major = self.ctx.catalog().maintenance_major()?;
        let flags = self.ctx.catalog().status_flags(&prefix)?;

        let mut summary = VersionSummary::default();
        summary.push(
            "Bugzilla affected versions",
            flags.iter().map(|flag| flag.strip_prefix(prefix.as_str()).unwrap_or(flag)),
        );

        for (label, channel, mode) in [
            ("Daily versions", Channel::Nightly, ResolveMode::Full),
            ("Beta versions", Channel::Beta, ResolveMode::Full),
            ("Release versions", Channel::Release, ResolveMode::Full),
            ("Current daily versions", Channel::Nightly, ResolveMode::CurrentOnly),
            ("Current beta versions", Channel::Beta, ResolveMode::CurrentOnly),
            ("Current release versions", Channel::Release, ResolveMode::CurrentOnly),
        ] {
            let versions = self.versions(channel, mode).await?;
            summary.push(label, versions.iter().map(String::as_str));
        }

        let full = self.versions(Channel::Maintenance, ResolveMode::Full).await?;
        summary.push(format!("ESR {major} versions"), full.iter().map(String::as_str));
        let current = self.versions(Channel::Maintenance, ResolveMode::CurrentOnly).await?;
        summary.push(format!("ESR {major} current versions"), current.iter().map(String::as_str));

        Ok(summary)
    }
}
