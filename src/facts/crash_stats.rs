use super::HttpClient;
use crate::Result;
use serde::Deserialize;
use url::Url;

const LOG_TARGET: &str = "   crashes";

/// The part of a search response the report consumes; facets are ignored.
#[derive(Debug, Deserialize)]
struct SearchResults {
    total: u64,
}

/// Count the crashes matched by a crash-report search.
pub async fn count(http: &HttpClient, url: &Url) -> Result<u64> {
    let results: SearchResults = http.get_json("crash-stats", url, None).await?;
    log::debug!(target: LOG_TARGET, "Search matched {} crash(es)", results.total);
    Ok(results.total)
}
