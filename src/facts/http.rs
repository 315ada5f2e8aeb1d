use crate::Result;
use ohno::{IntoAppError, bail};
use reqwest::header::HeaderMap;
use serde::de::DeserializeOwned;
use url::Url;

const LOG_TARGET: &str = "      http";

const USER_AGENT: &str = concat!("release-metrics/", env!("CARGO_PKG_VERSION"));

/// Thin JSON-over-HTTP client shared by every provider adapter.
///
/// Each call performs a single GET. There is no retry and no timeout beyond the
/// transport's defaults.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::Client,
}

impl HttpClient {
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .into_app_err("unable to create HTTP client")?;

        Ok(Self { client })
    }

    /// Fetch `url` and decode its JSON body.
    ///
    /// `provider` names the upstream service in error messages. `headers` are added to this
    /// request only and are never logged.
    pub async fn get_json<T: DeserializeOwned>(&self, provider: &str, url: &Url, headers: Option<HeaderMap>) -> Result<T> {
        log::debug!(target: LOG_TARGET, "GET {url}");

        let mut request = self.client.get(url.clone());
        if let Some(headers) = headers {
            request = request.headers(headers);
        }

        let response = request
            .send()
            .await
            .into_app_err_with(|| format!("unable to reach {provider}"))?;

        let status = response.status();
        if !status.is_success() {
            bail!("{provider} request failed: HTTP {status}");
        }

        response
            .json::<T>()
            .await
            .into_app_err_with(|| format!("unable to decode the {provider} response"))
    }
}
