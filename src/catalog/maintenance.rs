//! Maintenance-track helpers operating on versions observed in telemetry.

use semver::Version;
use std::collections::BTreeMap;

/// Returns `true` for alpha or beta version strings such as `136.0a1` or `134.0b2`.
#[must_use]
pub fn is_prerelease(version: &str) -> bool {
    version.contains(['a', 'b'])
}

/// Parses a stable `major.minor` or `major.minor.patch` version string.
///
/// Telemetry publishes `.0` releases without a patch component (`140.0`), so a missing
/// patch is read as zero. Pre-releases and any other shape yield `None`.
#[must_use]
pub fn parse_stable(version: &str) -> Option<Version> {
    if is_prerelease(version) {
        return None;
    }

    match version.matches('.').count() {
        1 => Version::parse(&format!("{version}.0")).ok(),
        2 => Version::parse(version).ok(),
        _ => None,
    }
}

/// Sorts by numeric version, breaking ties between `140.0` and `140.0.0` by the string.
fn sort_and_dedup(mut versions: Vec<(Version, String)>) -> Vec<String> {
    versions.sort();
    versions.dedup_by(|l, r| l.1 == r.1);
    versions.into_iter().map(|(_, version)| version).collect()
}

/// Selects every stable version string observed under `major`, sorted ascending.
///
/// Pre-release strings and strings without at least a `major.minor` shape are skipped.
#[must_use]
pub fn observed_for_major<'v>(observed: impl IntoIterator<Item = &'v str>, major: u32) -> Vec<String> {
    let versions = observed
        .into_iter()
        .filter_map(|version| parse_stable(version).map(|parsed| (parsed, version.to_owned())))
        .filter(|(parsed, _)| parsed.major == u64::from(major))
        .collect();

    sort_and_dedup(versions)
}

/// Returns the versions sharing the numerically largest `major.minor`, sorted ascending.
///
/// Versions that do not parse as stable versions take no part in the selection.
#[must_use]
pub fn latest_minor_group(versions: &[String]) -> Vec<String> {
    let mut groups: BTreeMap<(u64, u64), Vec<(Version, String)>> = BTreeMap::new();

    for version in versions {
        if let Some(parsed) = parse_stable(version) {
            groups.entry((parsed.major, parsed.minor)).or_default().push((parsed, version.clone()));
        }
    }

    groups.pop_last().map(|(_, latest)| sort_and_dedup(latest)).unwrap_or_default()
}

/// Sums the adoption of every stable version at or below `legacy_major`.
///
/// This backs the single "legacy cohort still present" adjustment of the total adoption
/// count. Malformed version strings are skipped.
#[must_use]
pub fn legacy_cohort_adoption<'v>(versions: impl IntoIterator<Item = (&'v str, u64)>, legacy_major: u32) -> u64 {
    versions
        .into_iter()
        .filter(|(version, _)| parse_stable(version).is_some_and(|parsed| parsed.major <= u64::from(legacy_major)))
        .map(|(_, count)| count)
        .sum()
}
