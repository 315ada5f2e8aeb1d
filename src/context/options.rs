use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// How the per-version "affected" terms of an issue-tracker query are combined.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum AffectedMatch {
    /// A bug matches when it is affected in at least one tracked version.
    Any,

    /// A bug matches only when it is affected in every tracked version.
    #[default]
    All,
}

/// Knobs that shape channel resolution and the derived metrics of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    /// Product name used by the crash-report provider.
    pub product: String,

    /// Number of nightly cycles before the latest one to include.
    pub include_previous_dailies: u32,

    /// Whether the previous beta cycle is included.
    pub include_previous_beta: bool,

    /// Number of release cycles before the latest one to include.
    pub include_previous_releases: u32,

    /// Track the upcoming maintenance major instead of the current one.
    pub esr_next: bool,

    /// Keep the legacy maintenance cohort in the total adoption count.
    pub include_legacy_esr: bool,

    /// Highest major version that belongs to the legacy maintenance cohort.
    pub legacy_esr_major: u32,

    /// Prefix of the issue tracker's per-version status flags.
    pub status_field_prefix: String,

    pub affected_match: AffectedMatch,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            product: "Thunderbird".to_string(),
            include_previous_dailies: 0,
            include_previous_beta: false,
            include_previous_releases: 0,
            esr_next: false,
            include_legacy_esr: false,
            legacy_esr_major: 115,
            status_field_prefix: "cf_status_thunderbird_".to_string(),
            affected_match: AffectedMatch::All,
        }
    }
}
