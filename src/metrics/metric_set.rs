use super::{MetricValue, MetricsReport, VersionSummary};
use crate::Result;
use crate::queries::QueryKind;
use chrono::NaiveDate;
use ohno::{IntoAppError, app_err, bail};
use serde::Serialize;
use std::collections::HashSet;
use url::Url;

/// One metric of a run, filled in as the aggregation passes complete.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricRecord {
    pub kind: QueryKind,
    pub value: Option<MetricValue>,
    pub description: Option<String>,
    pub query_url: Option<Url>,
}

/// A completed metric as it appears in a report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Metric {
    pub kind: QueryKind,
    pub value: MetricValue,
    pub description: Option<String>,
    pub url: Option<Url>,
}

/// The records of a run, in the order the kinds were configured.
#[derive(Debug, Clone)]
pub struct MetricSet {
    records: Vec<MetricRecord>,
}

/// Reject an empty kind list or one that names a kind twice.
pub fn validate_kinds(kinds: &[QueryKind]) -> Result<()> {
    if kinds.is_empty() {
        bail!("at least one query kind must be configured");
    }

    let mut seen = HashSet::new();
    for &kind in kinds {
        if !seen.insert(kind) {
            bail!("query kind '{kind}' is configured more than once");
        }
    }

    Ok(())
}

impl MetricSet {
    /// Create one empty record per kind, with the display text each kind carries.
    pub fn new(kinds: &[QueryKind], describe: impl Fn(QueryKind) -> Option<String>) -> Result<Self> {
        validate_kinds(kinds)?;

        let records = kinds
            .iter()
            .map(|&kind| MetricRecord {
                kind,
                value: None,
                description: describe(kind),
                query_url: None,
            })
            .collect();

        Ok(Self { records })
    }

    #[must_use]
    pub fn records(&self) -> &[MetricRecord] {
        &self.records
    }

    fn record_mut(&mut self, kind: QueryKind) -> Result<&mut MetricRecord> {
        self.records
            .iter_mut()
            .find(|record| record.kind == kind)
            .into_app_err_with(|| format!("query kind '{kind}' is not part of this run"))
    }

    /// Set the value of `kind`. A value is written exactly once.
    pub fn set_value(&mut self, kind: QueryKind, value: MetricValue) -> Result<()> {
        let record = self.record_mut(kind)?;
        if record.value.is_some() {
            bail!("a value for '{kind}' has already been recorded");
        }

        record.value = Some(value);
        Ok(())
    }

    pub fn attach_url(&mut self, kind: QueryKind, url: Url) -> Result<()> {
        self.record_mut(kind)?.query_url = Some(url);
        Ok(())
    }

    /// Finish the run, failing if any record is still missing its value.
    pub fn into_report(self, date: NaiveDate, versions: VersionSummary) -> Result<MetricsReport> {
        let metrics = self
            .records
            .into_iter()
            .map(|record| {
                let value = record.value.ok_or_else(|| app_err!("no value was recorded for '{}'", record.kind))?;
                Ok(Metric {
                    kind: record.kind,
                    value,
                    description: record.description,
                    url: record.query_url,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(MetricsReport { date, metrics, versions })
    }
}
