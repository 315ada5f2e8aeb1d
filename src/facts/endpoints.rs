use serde::{Deserialize, Serialize};
use url::Url;

/// Base URLs of the upstream services.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Endpoints {
    /// JSON document with the published product version numbers
    pub product_details: Url,

    /// JSON adoption snapshot keyed by date
    pub telemetry: Url,

    /// Issue tracker root; `rest/bug` and `buglist.cgi` are appended
    pub bugzilla: Url,

    /// Crash report service root; `api/SuperSearch/` and `search/` are appended
    pub crash_stats: Url,
}
