use crate::Result;
use ohno::{app_err, bail};
use serde::Deserialize;

/// Raw product-details document as published upstream.
///
/// Only the version fields the catalog needs are deserialized; everything else in the
/// document is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductDetails {
    #[serde(rename = "THUNDERBIRD_ESR")]
    pub esr: String,

    #[serde(rename = "THUNDERBIRD_ESR_NEXT", default)]
    pub esr_next: Option<String>,

    #[serde(rename = "LATEST_THUNDERBIRD_NIGHTLY_VERSION")]
    pub latest_nightly: String,

    #[serde(rename = "LATEST_THUNDERBIRD_DEVEL_VERSION")]
    pub latest_devel: String,

    #[serde(rename = "LATEST_THUNDERBIRD_VERSION")]
    pub latest_release: String,
}

/// Immutable snapshot of the upstream-published version numbers for the product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductVersionMetadata {
    maintenance_major: u32,
    next_maintenance_major: Option<u32>,
    latest_nightly: String,
    nightly_major: u32,
    beta_major: u32,
    release_major: u32,
}

impl ProductVersionMetadata {
    /// Parse a product-details JSON document.
    pub fn from_json(text: &str) -> Result<Self> {
        let details: ProductDetails = serde_json::from_str(text)?;
        Self::try_from(details)
    }

    #[must_use]
    pub const fn maintenance_major(&self) -> u32 {
        self.maintenance_major
    }

    #[must_use]
    pub const fn next_maintenance_major(&self) -> Option<u32> {
        self.next_maintenance_major
    }

    /// The full latest nightly version string, e.g. `136.0a1`.
    #[must_use]
    pub fn latest_nightly(&self) -> &str {
        &self.latest_nightly
    }

    #[must_use]
    pub const fn nightly_major(&self) -> u32 {
        self.nightly_major
    }

    #[must_use]
    pub const fn beta_major(&self) -> u32 {
        self.beta_major
    }

    #[must_use]
    pub const fn release_major(&self) -> u32 {
        self.release_major
    }

    /// The maintenance major the run reports on, either the current ESR or the upcoming one.
    pub fn tracked_maintenance_major(&self, use_next: bool) -> Result<u32> {
        if use_next {
            self.next_maintenance_major
                .ok_or_else(|| app_err!("product details do not publish a next ESR version, cannot track it"))
        } else {
            Ok(self.maintenance_major)
        }
    }
}

impl TryFrom<ProductDetails> for ProductVersionMetadata {
    type Error = ohno::AppError;

    fn try_from(details: ProductDetails) -> Result<Self> {
        let next_maintenance_major = match details.esr_next.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(next) => Some(parse_major("THUNDERBIRD_ESR_NEXT", next)?),
        };

        let latest_nightly = details.latest_nightly.trim().to_owned();

        Ok(Self {
            maintenance_major: parse_major("THUNDERBIRD_ESR", &details.esr)?,
            next_maintenance_major,
            nightly_major: parse_major("LATEST_THUNDERBIRD_NIGHTLY_VERSION", &latest_nightly)?,
            latest_nightly,
            beta_major: parse_major("LATEST_THUNDERBIRD_DEVEL_VERSION", &details.latest_devel)?,
            release_major: parse_major("LATEST_THUNDERBIRD_VERSION", &details.latest_release)?,
        })
    }
}

fn parse_major(field: &str, version: &str) -> Result<u32> {
    let Some(major) = version.trim().split('.').next().and_then(|m| m.parse::<u32>().ok()) else {
        bail!("product details field {field} has a malformed version '{version}'");
    };

    Ok(major)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DETAILS: &str = r#"{
        "LATEST_THUNDERBIRD_DEVEL_VERSION": "134.0b3",
        "LATEST_THUNDERBIRD_NIGHTLY_VERSION": "136.0a1",
        "LATEST_THUNDERBIRD_VERSION": "133.0.1",
        "THUNDERBIRD_ESR": "128.5.2esr",
        "THUNDERBIRD_ESR_NEXT": "",
        "THUNDERBIRD_RELEASE_BETA": "134.0b3"
    }"#;

    #[test]
    fn test_parse_product_details() {
        let metadata = ProductVersionMetadata::from_json(DETAILS).unwrap();
        assert_eq!(metadata.maintenance_major(), 128);
        assert_eq!(metadata.next_maintenance_major(), None);
        assert_eq!(metadata.latest_nightly(), "136.0a1");
        assert_eq!(metadata.nightly_major(), 136);
        assert_eq!(metadata.beta_major(), 134);
        assert_eq!(metadata.release_major(), 133);
    }

    #[test]
    fn test_next_esr_is_parsed_when_present() {
        let json = DETAILS.replace(r#""THUNDERBIRD_ESR_NEXT": """#, r#""THUNDERBIRD_ESR_NEXT": "140.0esr""#);
        let metadata = ProductVersionMetadata::from_json(&json).unwrap();
        assert_eq!(metadata.next_maintenance_major(), Some(140));
        assert_eq!(metadata.tracked_maintenance_major(true).unwrap(), 140);
        assert_eq!(metadata.tracked_maintenance_major(false).unwrap(), 128);
    }

    #[test]
    fn test_missing_next_esr_is_an_error_only_when_requested() {
        let metadata = ProductVersionMetadata::from_json(DETAILS).unwrap();
        assert!(metadata.tracked_maintenance_major(false).is_ok());
        let err = metadata.tracked_maintenance_major(true).unwrap_err();
        assert!(err.to_string().contains("next ESR"));
    }

    #[test]
    fn test_null_next_esr() {
        let json = DETAILS.replace(r#""THUNDERBIRD_ESR_NEXT": """#, r#""THUNDERBIRD_ESR_NEXT": null"#);
        let metadata = ProductVersionMetadata::from_json(&json).unwrap();
        assert_eq!(metadata.next_maintenance_major(), None);
    }

    #[test]
    fn test_malformed_major_is_rejected() {
        let json = DETAILS.replace("136.0a1", "nightly");
        let err = ProductVersionMetadata::from_json(&json).unwrap_err();
        assert!(err.to_string().contains("LATEST_THUNDERBIRD_NIGHTLY_VERSION"));
    }

    #[test]
    fn test_missing_field_is_rejected() {
        let result = ProductVersionMetadata::from_json(r#"{"THUNDERBIRD_ESR": "128.0esr"}"#);
        assert!(result.is_err());
    }
}
