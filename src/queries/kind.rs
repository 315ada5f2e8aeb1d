use crate::catalog::{Channel, ResolveMode};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

/// The external system a query kind is answered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum Provider {
    IssueTracker,
    Telemetry,
    CrashReports,

    /// Computed from other kinds once their raw counts exist.
    Derived,
}

/// How the keyword list of an issue-tracker query is matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum KeywordMatch {
    AllWords,
    AnyWords,
    NoWords,
}

/// The per-kind clause of an issue-tracker query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BugFilter {
    pub keywords: &'static str,
    pub keyword_match: KeywordMatch,

    /// Restrict to S1/S2 (and legacy critical/major) severities.
    pub severe_only: bool,
}

/// Which part of the telemetry snapshot an adoption kind reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdoptionScope {
    Channel(Channel, ResolveMode),

    /// The product-wide daily total, less the legacy cohort unless configured otherwise.
    Total,
}

/// Everything needed to evaluate a query kind, selected by exhaustive match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuerySource {
    IssueTracker(BugFilter),
    Telemetry(AdoptionScope),

    /// Crash reports are always counted for the current-only version set.
    CrashReports(Channel),

    CrashRate { crashes: QueryKind, adoption: QueryKind },
    AdoptionShare { adoption: QueryKind },
}

/// A named cross-provider metric request.
///
/// The kebab-case name is the identifier used in configuration files and reports.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumString, EnumIter, IntoStaticStr, Serialize, Deserialize,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum QueryKind {
    RegressionAll,
    RegressionSevere,
    NonRegressionAll,
    NonRegressionSevere,
    Topcrash,
    Perf,
    SecCritHigh,
    SecModerateLow,
    Dataloss,

    DailyAdi,
    BetaAdi,
    ReleaseAdi,
    TotalAdi,
    EsrAdi,
    CurrentDailyAdi,
    CurrentBetaAdi,
    CurrentReleaseAdi,

    DailyCrashes,
    BetaCrashes,
    ReleaseCrashes,
    EsrCrashes,

    DailyCrashRate,
    BetaCrashRate,
    ReleaseCrashRate,
    EsrCrashRate,

    #[strum(serialize = "daily-adi-%")]
    #[serde(rename = "daily-adi-%")]
    DailyAdiShare,

    #[strum(serialize = "beta-adi-%")]
    #[serde(rename = "beta-adi-%")]
    BetaAdiShare,

    #[strum(serialize = "release-adi-%")]
    #[serde(rename = "release-adi-%")]
    ReleaseAdiShare,

    #[strum(serialize = "esr-adi-%")]
    #[serde(rename = "esr-adi-%")]
    EsrAdiShare,
}

const fn bugs(keywords: &'static str, keyword_match: KeywordMatch, severe_only: bool) -> QuerySource {
    QuerySource::IssueTracker(BugFilter {
        keywords,
        keyword_match,
        severe_only,
    })
}

const fn adoption(channel: Channel, mode: ResolveMode) -> QuerySource {
    QuerySource::Telemetry(AdoptionScope::Channel(channel, mode))
}

impl QueryKind {
    /// The source that answers this kind.
    #[must_use]
    pub const fn source(self) -> QuerySource {
        use KeywordMatch::{AllWords, AnyWords, NoWords};

        match self {
            Self::RegressionAll => bugs("regression", AllWords, false),
            Self::RegressionSevere => bugs("regression", AllWords, true),
            Self::NonRegressionAll => bugs("regression", NoWords, false),
            Self::NonRegressionSevere => bugs("regression", NoWords, true),
            Self::Topcrash => bugs("topcrash-thunderbird", AllWords, false),
            Self::Perf => bugs("perf", AllWords, false),
            Self::SecCritHigh => bugs("sec-crit sec-high", AnyWords, false),
            Self::SecModerateLow => bugs("sec-moderate sec-low", AnyWords, false),
            Self::Dataloss => bugs("dataloss", AllWords, false),

            Self::DailyAdi => adoption(Channel::Nightly, ResolveMode::Full),
            Self::BetaAdi => adoption(Channel::Beta, ResolveMode::Full),
            Self::ReleaseAdi => adoption(Channel::Release, ResolveMode::Full),
            Self::EsrAdi => adoption(Channel::Maintenance, ResolveMode::Full),
            Self::TotalAdi => QuerySource::Telemetry(AdoptionScope::Total),
            Self::CurrentDailyAdi => adoption(Channel::Nightly, ResolveMode::CurrentOnly),
            Self::CurrentBetaAdi => adoption(Channel::Beta, ResolveMode::CurrentOnly),
            Self::CurrentReleaseAdi => adoption(Channel::Release, ResolveMode::CurrentOnly),

            Self::DailyCrashes => QuerySource::CrashReports(Channel::Nightly),
            Self::BetaCrashes => QuerySource::CrashReports(Channel::Beta),
            Self::ReleaseCrashes => QuerySource::CrashReports(Channel::Release),
            Self::EsrCrashes => QuerySource::CrashReports(Channel::Maintenance),

            Self::DailyCrashRate => QuerySource::CrashRate {
                crashes: Self::DailyCrashes,
                adoption: Self::CurrentDailyAdi,
            },
            Self::BetaCrashRate => QuerySource::CrashRate {
                crashes: Self::BetaCrashes,
                adoption: Self::CurrentBetaAdi,
            },
            Self::ReleaseCrashRate => QuerySource::CrashRate {
                crashes: Self::ReleaseCrashes,
                adoption: Self::CurrentReleaseAdi,
            },
            // current-minor crashes against full-major adoption
            Self::EsrCrashRate => QuerySource::CrashRate {
                crashes: Self::EsrCrashes,
                adoption: Self::EsrAdi,
            },

            Self::DailyAdiShare => QuerySource::AdoptionShare { adoption: Self::DailyAdi },
            Self::BetaAdiShare => QuerySource::AdoptionShare { adoption: Self::BetaAdi },
            Self::ReleaseAdiShare => QuerySource::AdoptionShare { adoption: Self::ReleaseAdi },
            Self::EsrAdiShare => QuerySource::AdoptionShare { adoption: Self::EsrAdi },
        }
    }

    #[must_use]
    pub const fn provider(self) -> Provider {
        match self.source() {
            QuerySource::IssueTracker(_) => Provider::IssueTracker,
            QuerySource::Telemetry(_) => Provider::Telemetry,
            QuerySource::CrashReports(_) => Provider::CrashReports,
            QuerySource::CrashRate { .. } | QuerySource::AdoptionShare { .. } => Provider::Derived,
        }
    }

    /// The channel this kind is scoped to, if any.
    #[must_use]
    pub const fn channel(self) -> Option<Channel> {
        match self.source() {
            QuerySource::Telemetry(AdoptionScope::Channel(channel, _)) | QuerySource::CrashReports(channel) => Some(channel),
            QuerySource::CrashRate { crashes: dependency, .. } | QuerySource::AdoptionShare { adoption: dependency } => {
                dependency.channel()
            }
            QuerySource::IssueTracker(_) | QuerySource::Telemetry(AdoptionScope::Total) => None,
        }
    }

    /// The raw kinds a derived kind is computed from. Empty for raw kinds.
    #[must_use]
    pub fn dependencies(self) -> Vec<Self> {
        match self.source() {
            QuerySource::CrashRate { crashes, adoption } => vec![crashes, adoption],
            QuerySource::AdoptionShare { adoption } => vec![adoption, Self::TotalAdi],
            QuerySource::IssueTracker(_) | QuerySource::Telemetry(_) | QuerySource::CrashReports(_) => Vec::new(),
        }
    }

    #[must_use]
    pub const fn is_derived(self) -> bool {
        matches!(self.provider(), Provider::Derived)
    }

    /// The human-readable description shown next to the query link in reports.
    ///
    /// Only kinds backed by a browsable query have one.
    #[must_use]
    pub fn description(self, maintenance_major: u32) -> Option<String> {
        let affecting = format!("(affecting {maintenance_major}+)");

        let text = match self {
            Self::RegressionAll => format!("# of regressions {affecting}"),
            Self::RegressionSevere => format!("# of severe (S1/S2) regressions {affecting}"),
            Self::NonRegressionAll => format!("# of non-regressions {affecting}"),
            Self::NonRegressionSevere => format!("# of severe (S1/S2) non-regressions {affecting}"),
            Self::Topcrash => format!("# of topcrash bugs {affecting}"),
            Self::Perf => format!("# of perf bugs {affecting}"),
            Self::SecCritHigh => format!("# of sec-crit, sec-high bugs {affecting}"),
            Self::SecModerateLow => format!("# of sec-moderate, sec-low {affecting}"),
            Self::Dataloss => format!("# of dataloss bugs {affecting}"),
            Self::EsrCrashes => format!("ESR {maintenance_major} crashes (last 24 hours)"),
            Self::DailyCrashes | Self::BetaCrashes | Self::ReleaseCrashes => {
                let channel = self.channel()?;
                format!("{} crashes (last 24 hours)", channel.label())
            }
            _ => return None,
        };

        Some(text)
    }
}
