use super::{AdiSnapshot, Endpoints, HttpClient, bugzilla, crash_stats, product_details};
use crate::Result;
use crate::catalog::ProductVersionMetadata;
use ohno::app_err;
use url::Url;

/// The configured set of upstream services and the credential needed to query them.
#[derive(Debug, Clone)]
pub struct Providers {
    http: HttpClient,
    endpoints: Endpoints,
    bugzilla_api_key: Option<String>,
}

impl Providers {
    pub fn new(endpoints: Endpoints, bugzilla_api_key: Option<String>) -> Result<Self> {
        Ok(Self {
            http: HttpClient::new()?,
            endpoints,
            bugzilla_api_key: bugzilla_api_key.filter(|key| !key.trim().is_empty()),
        })
    }

    #[must_use]
    pub const fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Whether a credential for the issue tracker is available.
    #[must_use]
    pub const fn has_bugzilla_credential(&self) -> bool {
        self.bugzilla_api_key.is_some()
    }

    pub async fn product_metadata(&self) -> Result<ProductVersionMetadata> {
        product_details::fetch(&self.http, &self.endpoints.product_details).await
    }

    pub async fn adi_snapshot(&self) -> Result<AdiSnapshot> {
        AdiSnapshot::fetch(&self.http, &self.endpoints.telemetry).await
    }

    /// Count the bugs matched by a machine-readable issue-tracker URL.
    pub async fn bug_count(&self, url: &Url) -> Result<u64> {
        let api_key = self
            .bugzilla_api_key
            .as_deref()
            .ok_or_else(|| app_err!("a Bugzilla API key is required, set BMO_API_KEY or pass --bugzilla-api-key"))?;

        bugzilla::count(&self.http, url, api_key).await
    }

    /// Count the crashes matched by a machine-readable crash-report URL.
    pub async fn crash_count(&self, url: &Url) -> Result<u64> {
        crash_stats::count(&self.http, url).await
    }
}
