use super::Metric;
use chrono::NaiveDate;
use url::Url;

/// One labelled row of resolved versions, as shown to the operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionRow {
    pub label: String,
    pub versions: Vec<String>,
}

/// The version sets a run resolved, kept for the console summary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VersionSummary {
    pub rows: Vec<VersionRow>,
}

impl VersionSummary {
    pub fn push(&mut self, label: impl Into<String>, versions: impl IntoIterator<Item = impl Into<String>>) {
        self.rows.push(VersionRow {
            label: label.into(),
            versions: versions.into_iter().map(Into::into).collect(),
        });
    }
}

/// The finished output of a collection run.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricsReport {
    /// The day the run was made for; counts cover the day before.
    pub date: NaiveDate,
    pub metrics: Vec<Metric>,
    pub versions: VersionSummary,
}

impl MetricsReport {
    /// The described query links, in column order.
    pub fn links(&self) -> impl Iterator<Item = (&str, &Url)> {
        self.metrics
            .iter()
            .filter_map(|metric| Some((metric.description.as_deref()?, metric.url.as_ref()?)))
    }
}
