use super::HttpClient;
use crate::Result;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::Deserialize;
use serde::de::IgnoredAny;
use url::Url;

const LOG_TARGET: &str = "  bugzilla";

const API_KEY_HEADER: HeaderName = HeaderName::from_static("x-bugzilla-api-key");

#[derive(Debug, Deserialize)]
struct BugList {
    bugs: Vec<IgnoredAny>,
}

/// Count the bugs matched by an issue-tracker query.
///
/// The API key travels in a sensitive request header so it never appears in URLs or logs.
pub async fn count(http: &HttpClient, url: &Url, api_key: &str) -> Result<u64> {
    let mut value = HeaderValue::from_str(api_key)?;
    value.set_sensitive(true);

    let mut headers = HeaderMap::new();
    let _ = headers.insert(API_KEY_HEADER, value);

    let list: BugList = http.get_json("bugzilla", url, Some(headers)).await?;
    log::debug!(target: LOG_TARGET, "Query matched {} bug(s)", list.bugs.len());

    Ok(list.bugs.len() as u64)
}
