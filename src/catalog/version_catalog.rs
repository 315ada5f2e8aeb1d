use super::{Channel, ProductVersionMetadata, ResolveMode, latest_minor_group, observed_for_major};
use crate::Result;
use crate::context::RunOptions;
use ohno::bail;

/// Number of beta builds shipped per cycle (`{major}.0b1` ..= `{major}.0b6`).
const BETA_BUILDS_PER_CYCLE: u32 = 6;

/// Number of dot releases tracked after each `{major}.0` release.
const DOT_RELEASES_PER_CYCLE: u32 = 3;

/// Resolves the version strings that belong to each channel.
///
/// All results are pure functions of the metadata snapshot, the run options and, for the
/// maintenance track, the set of versions observed in telemetry.
#[derive(Debug, Clone, Copy)]
pub struct VersionCatalog<'a> {
    metadata: &'a ProductVersionMetadata,
    options: &'a RunOptions,
}

impl<'a> VersionCatalog<'a> {
    #[must_use]
    pub const fn new(metadata: &'a ProductVersionMetadata, options: &'a RunOptions) -> Self {
        Self { metadata, options }
    }

    /// Resolve a channel whose versions follow a predictable naming pattern.
    ///
    /// Returns `None` for [`Channel::Maintenance`], which must be resolved from telemetry
    /// through [`Self::maintenance`].
    pub fn synthesized(&self, channel: Channel, mode: ResolveMode) -> Result<Option<Vec<String>>> {
        Ok(match channel {
            Channel::Nightly => Some(self.nightly(mode)?),
            Channel::Beta => Some(self.beta(mode)?),
            Channel::Release => Some(self.release(mode)?),
            Channel::Maintenance => None,
        })
    }

    /// The latest nightly, followed by `include_previous_dailies` predecessor nightlies.
    pub fn nightly(&self, mode: ResolveMode) -> Result<Vec<String>> {
        let mut versions = vec![self.metadata.latest_nightly().to_owned()];

        if mode == ResolveMode::Full {
            let majors = prior_majors(Channel::Nightly, self.metadata.nightly_major(), self.options.include_previous_dailies)?;
            versions.extend(majors.map(|major| format!("{major}.0a1")));
        }

        Ok(versions)
    }

    /// The six beta builds of the latest beta major, plus the previous cycle if configured.
    pub fn beta(&self, mode: ResolveMode) -> Result<Vec<String>> {
        let major = self.metadata.beta_major();
        let mut versions = beta_cycle(major);

        if mode == ResolveMode::Full && self.options.include_previous_beta {
            versions.extend(prior_majors(Channel::Beta, major, 1)?.flat_map(beta_cycle));
        }

        Ok(versions)
    }

    /// `{major}.0` and its dot releases, extended by `include_previous_releases` prior cycles.
    pub fn release(&self, mode: ResolveMode) -> Result<Vec<String>> {
        let major = self.metadata.release_major();
        let mut versions = release_cycle(major);

        if mode == ResolveMode::Full {
            versions.extend(prior_majors(Channel::Release, major, self.options.include_previous_releases)?.flat_map(release_cycle));
        }

        Ok(versions)
    }

    /// Resolve the maintenance track from the versions observed in telemetry.
    ///
    /// The full set holds every stable version observed under the tracked maintenance major;
    /// the current-only set narrows it to the latest minor version.
    pub fn maintenance<'v>(&self, mode: ResolveMode, observed: impl IntoIterator<Item = &'v str>) -> Result<Vec<String>> {
        let major = self.maintenance_major()?;
        let full = observed_for_major(observed, major);

        Ok(match mode {
            ResolveMode::Full => full,
            ResolveMode::CurrentOnly => latest_minor_group(&full),
        })
    }

    /// The maintenance major this run tracks.
    pub fn maintenance_major(&self) -> Result<u32> {
        self.metadata.tracked_maintenance_major(self.options.esr_next)
    }

    /// Issue-tracker status flags for every version from the maintenance major up to nightly.
    ///
    /// The maintenance branch has its own `esr{major}` flag which comes first.
    pub fn status_flags(&self, prefix: &str) -> Result<Vec<String>> {
        let start = self.maintenance_major()?;
        let end = self.metadata.nightly_major();

        let mut flags = vec![format!("{prefix}esr{start}")];
        flags.extend((start..=end).map(|major| format!("{prefix}{major}")));
        Ok(flags)
    }
}

/// The `cycles` majors preceding `major`, newest first.
fn prior_majors(channel: Channel, major: u32, cycles: u32) -> Result<impl Iterator<Item = u32>> {
    let Some(oldest) = major.checked_sub(cycles) else {
        bail!("cannot include {cycles} previous {channel} cycle(s) before major version {major}");
    };

    Ok((oldest..major).rev())
}

fn beta_cycle(major: u32) -> Vec<String> {
    (1..=BETA_BUILDS_PER_CYCLE).map(|build| format!("{major}.0b{build}")).collect()
}

fn release_cycle(major: u32) -> Vec<String> {
    core::iter::once(format!("{major}.0"))
        .chain((1..=DOT_RELEASES_PER_CYCLE).map(|dot| format!("{major}.0.{dot}")))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    const DETAILS: &str = r#"{
        "LATEST_THUNDERBIRD_DEVEL_VERSION": "134.0b3",
        "LATEST_THUNDERBIRD_NIGHTLY_VERSION": "136.0a1",
        "LATEST_THUNDERBIRD_VERSION": "133.0.1",
        "THUNDERBIRD_ESR": "128.5.2esr",
        "THUNDERBIRD_ESR_NEXT": "140.0esr"
    }"#;

    fn metadata() -> ProductVersionMetadata {
        ProductVersionMetadata::from_json(DETAILS).unwrap()
    }

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(ToString::to_string).collect()
    }

    fn assert_subset(current: &[String], full: &[String]) {
        let full: HashSet<_> = full.iter().collect();
        assert!(current.iter().all(|v| full.contains(v)), "{current:?} is not a subset of {full:?}");
    }

    fn assert_unique(versions: &[String]) {
        let unique: HashSet<_> = versions.iter().collect();
        assert_eq!(unique.len(), versions.len(), "duplicate versions in {versions:?}");
    }

    #[test]
    fn test_nightly_without_history() {
        let metadata = metadata();
        let options = RunOptions::default();
        let catalog = VersionCatalog::new(&metadata, &options);

        assert_eq!(catalog.nightly(ResolveMode::Full).unwrap(), strings(&["136.0a1"]));
        assert_eq!(catalog.nightly(ResolveMode::CurrentOnly).unwrap(), strings(&["136.0a1"]));
    }

    #[test]
    fn test_nightly_with_previous_cycles() {
        let metadata = metadata();
        let options = RunOptions {
            include_previous_dailies: 2,
            ..RunOptions::default()
        };
        let catalog = VersionCatalog::new(&metadata, &options);

        assert_eq!(catalog.nightly(ResolveMode::Full).unwrap(), strings(&["136.0a1", "135.0a1", "134.0a1"]));
        assert_eq!(catalog.nightly(ResolveMode::CurrentOnly).unwrap(), strings(&["136.0a1"]));
    }

    #[test]
    fn test_beta_current_only() {
        let metadata = metadata();
        let options = RunOptions {
            include_previous_beta: true,
            ..RunOptions::default()
        };
        let catalog = VersionCatalog::new(&metadata, &options);

        assert_eq!(
            catalog.beta(ResolveMode::CurrentOnly).unwrap(),
            strings(&["134.0b1", "134.0b2", "134.0b3", "134.0b4", "134.0b5", "134.0b6"])
        );
    }

    #[test]
    fn test_beta_with_previous_cycle() {
        let metadata = metadata();
        let options = RunOptions {
            include_previous_beta: true,
            ..RunOptions::default()
        };
        let catalog = VersionCatalog::new(&metadata, &options);

        let full = catalog.beta(ResolveMode::Full).unwrap();
        assert_eq!(full.len(), 12);
        assert_eq!(full[6], "133.0b1");
        assert_eq!(full[11], "133.0b6");
    }

    #[test]
    fn test_release_patterns() {
        let metadata = metadata();
        let options = RunOptions {
            include_previous_releases: 1,
            ..RunOptions::default()
        };
        let catalog = VersionCatalog::new(&metadata, &options);

        assert_eq!(catalog.release(ResolveMode::CurrentOnly).unwrap(), strings(&["133.0", "133.0.1", "133.0.2", "133.0.3"]));
        assert_eq!(
            catalog.release(ResolveMode::Full).unwrap(),
            strings(&["133.0", "133.0.1", "133.0.2", "133.0.3", "132.0", "132.0.1", "132.0.2", "132.0.3"])
        );
    }

    #[test]
    fn test_full_set_sizes_grow_per_cycle() {
        let metadata = metadata();

        for cycles in 0..5 {
            let options = RunOptions {
                include_previous_dailies: cycles,
                include_previous_releases: cycles,
                ..RunOptions::default()
            };
            let catalog = VersionCatalog::new(&metadata, &options);

            let nightly = catalog.nightly(ResolveMode::Full).unwrap();
            let release = catalog.release(ResolveMode::Full).unwrap();
            assert_eq!(nightly.len(), 1 + cycles as usize);
            assert_eq!(release.len(), 4 + 4 * cycles as usize);

            assert_subset(&catalog.nightly(ResolveMode::CurrentOnly).unwrap(), &nightly);
            assert_subset(&catalog.release(ResolveMode::CurrentOnly).unwrap(), &release);
            assert_unique(&nightly);
            assert_unique(&release);
        }

        for include_previous_beta in [false, true] {
            let options = RunOptions {
                include_previous_beta,
                ..RunOptions::default()
            };
            let catalog = VersionCatalog::new(&metadata, &options);
            let beta = catalog.beta(ResolveMode::Full).unwrap();
            assert_eq!(beta.len(), 6 + 6 * usize::from(include_previous_beta));
            assert_subset(&catalog.beta(ResolveMode::CurrentOnly).unwrap(), &beta);
            assert_unique(&beta);
        }
    }

    #[test]
    fn test_synthesized_excludes_maintenance() {
        let metadata = metadata();
        let options = RunOptions::default();
        let catalog = VersionCatalog::new(&metadata, &options);

        assert!(catalog.synthesized(Channel::Maintenance, ResolveMode::Full).unwrap().is_none());
        assert_eq!(
            catalog.synthesized(Channel::Release, ResolveMode::Full).unwrap(),
            Some(catalog.release(ResolveMode::Full).unwrap())
        );
    }

    #[test]
    fn test_maintenance_from_observed_versions() {
        let metadata = metadata();
        let options = RunOptions::default();
        let catalog = VersionCatalog::new(&metadata, &options);
        let observed = ["128.4.0", "128.5.1", "128.5.0", "128.5.0b1", "133.0", "140.0"];

        assert_eq!(catalog.maintenance(ResolveMode::Full, observed).unwrap(), strings(&["128.4.0", "128.5.0", "128.5.1"]));
        assert_eq!(catalog.maintenance(ResolveMode::CurrentOnly, observed).unwrap(), strings(&["128.5.0", "128.5.1"]));
    }

    #[test]
    fn test_maintenance_next_major() {
        let metadata = metadata();
        let options = RunOptions {
            esr_next: true,
            ..RunOptions::default()
        };
        let catalog = VersionCatalog::new(&metadata, &options);
        let observed = ["128.5.0", "140.0", "140.0.1"];

        assert_eq!(catalog.maintenance(ResolveMode::Full, observed).unwrap(), strings(&["140.0", "140.0.1"]));
    }

    #[test]
    fn test_status_flags_span_maintenance_to_nightly() {
        let metadata = metadata();
        let options = RunOptions::default();
        let catalog = VersionCatalog::new(&metadata, &options);

        let flags = catalog.status_flags("cf_status_thunderbird_").unwrap();
        assert_eq!(flags.len(), 1 + (136 - 128 + 1));
        assert_eq!(flags[0], "cf_status_thunderbird_esr128");
        assert_eq!(flags[1], "cf_status_thunderbird_128");
        assert_eq!(flags.last().map(String::as_str), Some("cf_status_thunderbird_136"));
    }

    #[test]
    fn test_history_before_major_zero_is_an_error() {
        let metadata = ProductVersionMetadata::from_json(
            r#"{
                "LATEST_THUNDERBIRD_DEVEL_VERSION": "0.0b1",
                "LATEST_THUNDERBIRD_NIGHTLY_VERSION": "3.0a1",
                "LATEST_THUNDERBIRD_VERSION": "1.0",
                "THUNDERBIRD_ESR": "1.0esr"
            }"#,
        )
        .unwrap();
        let options = RunOptions {
            include_previous_dailies: 5,
            include_previous_beta: true,
            include_previous_releases: 5,
            ..RunOptions::default()
        };
        let catalog = VersionCatalog::new(&metadata, &options);

        let err = catalog.nightly(ResolveMode::Full).unwrap_err();
        assert!(err.to_string().contains("5 previous nightly cycle(s) before major version 3"));
        assert!(catalog.release(ResolveMode::Full).is_err());
        assert!(catalog.beta(ResolveMode::Full).is_err());
        assert!(catalog.synthesized(Channel::Release, ResolveMode::Full).is_err());

        assert_eq!(catalog.nightly(ResolveMode::CurrentOnly).unwrap(), strings(&["3.0a1"]));
        assert_eq!(catalog.release(ResolveMode::CurrentOnly).unwrap().len(), 4);
    }

    #[test]
    fn test_history_reaching_major_zero_is_complete() {
        let metadata = ProductVersionMetadata::from_json(
            r#"{
                "LATEST_THUNDERBIRD_DEVEL_VERSION": "2.0b1",
                "LATEST_THUNDERBIRD_NIGHTLY_VERSION": "3.0a1",
                "LATEST_THUNDERBIRD_VERSION": "1.0",
                "THUNDERBIRD_ESR": "1.0esr"
            }"#,
        )
        .unwrap();
        let options = RunOptions {
            include_previous_dailies: 3,
            include_previous_releases: 1,
            ..RunOptions::default()
        };
        let catalog = VersionCatalog::new(&metadata, &options);

        assert_eq!(catalog.nightly(ResolveMode::Full).unwrap(), strings(&["3.0a1", "2.0a1", "1.0a1", "0.0a1"]));
        assert_eq!(catalog.release(ResolveMode::Full).unwrap().len(), 8);
    }
}
