use super::HttpClient;
use crate::Result;
use crate::catalog::Channel;
use ohno::{IntoAppError, app_err};
use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use url::Url;

const LOG_TARGET: &str = " telemetry";

/// One day of adoption data: the product-wide total and the per-version breakdown.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AdiDay {
    count: u64,

    #[serde(default)]
    versions: HashMap<String, u64>,
}

impl AdiDay {
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.count
    }

    /// Adoption of a single version; a version with no users that day counts as zero.
    #[must_use]
    pub fn version_count(&self, version: &str) -> u64 {
        self.versions.get(version).copied().unwrap_or(0)
    }

    pub fn version_names(&self) -> impl Iterator<Item = &str> {
        self.versions.keys().map(String::as_str)
    }

    pub fn versions(&self) -> impl Iterator<Item = (&str, u64)> {
        self.versions.iter().map(|(version, count)| (version.as_str(), *count))
    }
}

/// The full telemetry snapshot, keyed by `YYYY-MM-DD` date.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct AdiSnapshot {
    days: BTreeMap<String, AdiDay>,
}

impl AdiSnapshot {
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).into_app_err("unable to decode the telemetry snapshot")
    }

    /// The data for `date`.
    ///
    /// A missing date is an error rather than zero adoption, since it means the snapshot
    /// has not been published for that day yet.
    pub fn day(&self, date: &str) -> Result<&AdiDay> {
        self.days
            .get(date)
            .ok_or_else(|| app_err!("the telemetry snapshot has no entry for {date}"))
    }

    /// The most recent day in the snapshot.
    pub fn latest_day(&self) -> Result<(&str, &AdiDay)> {
        self.days
            .last_key_value()
            .map(|(date, day)| (date.as_str(), day))
            .ok_or_else(|| app_err!("the telemetry snapshot contains no dates"))
    }

    pub(super) async fn fetch(http: &HttpClient, url: &Url) -> Result<Self> {
        log::info!(target: LOG_TARGET, "Downloading the telemetry snapshot");
        let snapshot: Self = http.get_json("telemetry", url, None).await?;
        log::debug!(target: LOG_TARGET, "Telemetry snapshot covers {} day(s)", snapshot.days.len());
        Ok(snapshot)
    }
}

/// The telemetry version keys a channel's adoption is reported under.
///
/// Beta adoption is published per major as `{major}.0` rather than per beta build, so every
/// distinct beta major contributes that key exactly once. Other channels use their version
/// strings as-is.
#[must_use]
pub fn adoption_keys(channel: Channel, versions: &[String]) -> Vec<String> {
    match channel {
        Channel::Beta => {
            let mut seen = BTreeSet::new();
            versions
                .iter()
                .filter_map(|version| version.split('.').next())
                .filter(|major| seen.insert(*major))
                .map(|major| format!("{major}.0"))
                .collect()
        }
        Channel::Nightly | Channel::Release | Channel::Maintenance => versions.to_vec(),
    }
}

/// Sum the adoption of a channel's versions on `day`.
#[must_use]
pub fn channel_adoption(day: &AdiDay, channel: Channel, versions: &[String]) -> u64 {
    adoption_keys(channel, versions).iter().map(|key| day.version_count(key)).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SNAPSHOT: &str = r#"{
        "2025-01-01": {"count": 900, "versions": {"133.0": 350}},
        "2025-01-02": {"count": 1000, "versions": {"133.0": 400, "134.0": 30, "136.0a1": 7}}
    }"#;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_missing_versions_count_as_zero() {
        let snapshot = AdiSnapshot::from_json(SNAPSHOT).unwrap();
        let day = snapshot.day("2025-01-02").unwrap();
        let release = strings(&["133.0", "133.0.1", "133.0.2", "133.0.3"]);

        assert_eq!(channel_adoption(day, Channel::Release, &release), 400);
        assert_eq!(day.total(), 1000);
    }

    #[test]
    fn test_missing_date_is_an_error() {
        let snapshot = AdiSnapshot::from_json(SNAPSHOT).unwrap();
        let err = snapshot.day("2025-01-03").unwrap_err();
        assert!(err.to_string().contains("2025-01-03"));
    }

    #[test]
    fn test_latest_day() {
        let snapshot = AdiSnapshot::from_json(SNAPSHOT).unwrap();
        let (date, day) = snapshot.latest_day().unwrap();
        assert_eq!(date, "2025-01-02");
        assert_eq!(day.version_count("136.0a1"), 7);

        assert!(AdiSnapshot::default().latest_day().is_err());
    }

    #[test]
    fn test_beta_keys_are_counted_once_per_major() {
        let current = strings(&["134.0b1", "134.0b2", "134.0b3", "134.0b4", "134.0b5", "134.0b6"]);
        assert_eq!(adoption_keys(Channel::Beta, &current), ["134.0"]);

        let mut with_previous = current;
        with_previous.extend(strings(&["133.0b1", "133.0b2"]));
        assert_eq!(adoption_keys(Channel::Beta, &with_previous), ["134.0", "133.0"]);

        let snapshot = AdiSnapshot::from_json(SNAPSHOT).unwrap();
        let day = snapshot.day("2025-01-02").unwrap();
        assert_eq!(channel_adoption(day, Channel::Beta, &strings(&["134.0b1", "134.0b2"])), 30);
    }

    #[test]
    fn test_day_without_versions() {
        let snapshot = AdiSnapshot::from_json(r#"{"2025-01-02": {"count": 5}}"#).unwrap();
        let day = snapshot.day("2025-01-02").unwrap();
        assert_eq!(day.version_count("133.0"), 0);
        assert_eq!(day.versions().count(), 0);
    }

    #[test]
    fn test_malformed_snapshot_is_rejected() {
        assert!(AdiSnapshot::from_json(r#"{"2025-01-02": {"versions": {}}}"#).is_err());
        assert!(AdiSnapshot::from_json("[]").is_err());
    }
}
