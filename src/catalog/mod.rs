//! Release channel version resolution
//!
//! Every version set used by the report is derived from a single [`ProductVersionMetadata`]
//! snapshot fetched at the start of a run. Nightly, beta and release sets are synthesized
//! from the published major numbers; the maintenance (ESR) track is discovered from the
//! versions actually observed in telemetry, since its minor numbers cannot be predicted.

mod channel;
mod maintenance;
mod product_versions;
mod version_catalog;

pub use channel::{Channel, ResolveMode};
pub use maintenance::{is_prerelease, latest_minor_group, legacy_cohort_adoption, observed_for_major, parse_stable};
pub use product_versions::{ProductDetails, ProductVersionMetadata};
pub use version_catalog::VersionCatalog;
