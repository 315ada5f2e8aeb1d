use crate::Result;
use crate::context::{AffectedMatch, RunOptions};
use crate::facts::Endpoints;
use crate::metrics::validate_kinds;
use crate::queries::QueryKind;
use camino::{Utf8Path, Utf8PathBuf};
use ohno::{EnrichableExt, IntoAppError, bail};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;

/// The default configuration TOML content, embedded from `default_config.toml`
pub const DEFAULT_CONFIG_TOML: &str = include_str!("../../default_config.toml");

/// File looked up in the working directory when no explicit path is given.
pub const CONFIG_FILE_NAME: &str = "release-metrics.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Product name used when searching crash reports
    #[serde(default = "default_product")]
    pub product: String,

    /// Query kinds to collect, in report column order
    #[serde(default = "default_kinds")]
    pub kinds: Vec<QueryKind>,

    /// Number of nightly cycles before the latest one to include
    #[serde(default)]
    pub include_previous_dailies: u32,

    /// Include the previous beta cycle
    #[serde(default)]
    pub include_previous_beta: bool,

    /// Number of release cycles before the latest one to include
    #[serde(default)]
    pub include_previous_releases: u32,

    /// Track the upcoming maintenance major instead of the current one
    #[serde(default)]
    pub esr_next: bool,

    /// Keep the legacy maintenance cohort in the total adoption count
    #[serde(default)]
    pub include_legacy_esr: bool,

    /// Highest major that belongs to the legacy maintenance cohort
    #[serde(default = "default_legacy_esr_major")]
    pub legacy_esr_major: u32,

    /// Prefix of the issue tracker's per-version status flags
    #[serde(default = "default_status_field_prefix")]
    pub status_field_prefix: String,

    /// How the per-version "affected" terms are joined
    #[serde(default)]
    pub affected_match: AffectedMatch,

    /// Base URLs of the upstream services
    #[serde(default = "default_endpoints")]
    pub endpoints: Endpoints,
}

fn default_product() -> String {
    RunOptions::default().product
}

fn default_legacy_esr_major() -> u32 {
    RunOptions::default().legacy_esr_major
}

fn default_status_field_prefix() -> String {
    RunOptions::default().status_field_prefix
}

// The embedded defaults always carry both keys, so these never recurse.
fn default_kinds() -> Vec<QueryKind> {
    Config::default().kinds
}

fn default_endpoints() -> Endpoints {
    Config::default().endpoints
}

impl Config {
    /// Load configuration from a file or use defaults
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated
    pub fn load(base_dir: &Utf8Path, config_path: Option<&Utf8PathBuf>) -> Result<Self> {
        let (final_path, text) = if let Some(path) = config_path {
            let text = fs::read_to_string(path).into_app_err_with(|| format!("reading configuration file '{path}'"))?;
            (path.clone(), text)
        } else {
            let path = base_dir.join(CONFIG_FILE_NAME);
            match fs::read_to_string(&path) {
                Ok(text) => (path, text),
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    return Ok(Self::default());
                }
                Err(e) => return Err(e).into_app_err_with(|| format!("reading configuration file '{path}'")),
            }
        };

        let config: Self = toml::from_str(&text).into_app_err_with(|| format!("parsing configuration file '{final_path}'"))?;
        config
            .validate()
            .map_err(|e| e.enrich_with(|| format!("validating configuration file '{final_path}'")))?;

        Ok(config)
    }

    /// Save the default configuration to a TOML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written
    pub fn save_default(output_path: &Utf8Path) -> Result<()> {
        fs::write(output_path, DEFAULT_CONFIG_TOML).into_app_err_with(|| format!("writing default configuration to {output_path}"))?;
        Ok(())
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns an error if the kind list is empty or repeats a kind, or a name is blank
    pub fn validate(&self) -> Result<()> {
        validate_kinds(&self.kinds)?;

        if self.product.trim().is_empty() {
            bail!("product must not be empty");
        }

        if self.status_field_prefix.trim().is_empty() {
            bail!("status_field_prefix must not be empty");
        }

        Ok(())
    }

    /// The options that shape version resolution for a run.
    #[must_use]
    pub fn run_options(&self) -> RunOptions {
        RunOptions {
            product: self.product.clone(),
            include_previous_dailies: self.include_previous_dailies,
            include_previous_beta: self.include_previous_beta,
            include_previous_releases: self.include_previous_releases,
            esr_next: self.esr_next,
            include_legacy_esr: self.include_legacy_esr,
            legacy_esr_major: self.legacy_esr_major,
            status_field_prefix: self.status_field_prefix.clone(),
            affected_match: self.affected_match,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        toml::from_str(DEFAULT_CONFIG_TOML).expect("default_config.toml should be valid TOML that deserializes to Config")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_config(dir: &tempfile::TempDir, text: &str) -> Utf8PathBuf {
        let path = Utf8PathBuf::try_from(dir.path().join(CONFIG_FILE_NAME)).unwrap();
        fs::write(&path, text).unwrap();
        path
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        config.validate().unwrap();
        assert_eq!(config.kinds.len(), 26);
        assert_eq!(config.kinds[0], QueryKind::RegressionAll);
        assert_eq!(config.kinds[25], QueryKind::EsrCrashRate);
    }

    #[test]
    fn test_default_config_matches_default_options() {
        assert_eq!(Config::default().run_options(), RunOptions::default());
    }

    #[test]
    fn test_missing_keys_fall_back_to_defaults() {
        let config: Config = toml::from_str("esr_next = true\n").unwrap();
        assert!(config.esr_next);
        assert_eq!(config.kinds, Config::default().kinds);
        assert_eq!(config.endpoints, Config::default().endpoints);
        assert_eq!(config.legacy_esr_major, 115);
    }

    #[test]
    fn test_validate_rejects_empty_kinds() {
        let config = Config {
            kinds: Vec::new(),
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_duplicate_kinds() {
        let config = Config {
            kinds: vec![QueryKind::Perf, QueryKind::Perf],
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unknown_kind_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, "kinds = [\"esr140-adi\"]\n");
        let base = Utf8PathBuf::try_from(dir.path().to_path_buf()).unwrap();
        assert!(Config::load(&base, Some(&path)).is_err());
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, "unknown_field = 1\n");
        let base = Utf8PathBuf::try_from(dir.path().to_path_buf()).unwrap();
        assert!(Config::load(&base, Some(&path)).is_err());
    }

    #[test]
    fn test_save_default_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let base = Utf8PathBuf::try_from(dir.path().to_path_buf()).unwrap();
        let path = base.join(CONFIG_FILE_NAME);
        Config::save_default(&path).unwrap();

        let loaded = Config::load(&base, None).unwrap();
        assert_eq!(loaded, Config::default());
    }

    #[test]
    fn test_load_missing_config_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let base = Utf8PathBuf::try_from(dir.path().to_path_buf()).unwrap();
        assert_eq!(Config::load(&base, None).unwrap(), Config::default());
    }

    #[test]
    fn test_affected_match_parses() {
        let config: Config = toml::from_str("affected_match = \"any\"\n").unwrap();
        assert_eq!(config.affected_match, AffectedMatch::Any);
    }
}
