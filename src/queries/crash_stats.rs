use super::{BuiltQuery, QueryKind, QuerySource, endpoint_url};
use crate::Result;
use crate::catalog::Channel;
use crate::context::ReportingWindow;
use ohno::bail;
use url::Url;

const FACETS: [&str; 2] = ["platform", "release_channel"];
const COLUMNS: [&str; 6] = ["date", "signature", "product", "version", "build_id", "platform"];

/// The crash provider's name for a version, which carries an `esr` suffix on the maintenance track.
#[must_use]
pub fn crash_version(channel: Channel, version: &str) -> String {
    match channel {
        Channel::Maintenance => format!("{version}esr"),
        Channel::Nightly | Channel::Beta | Channel::Release => version.to_owned(),
    }
}

/// Build the crash-report search for `kind` over `versions` within `window`.
///
/// The date range is half-open: crashes from `yesterday` up to, not including, `today`.
/// An empty version set is rejected, since it would turn into a product-wide search.
pub fn build_query(endpoint: &Url, product: &str, kind: QueryKind, versions: &[String], window: &ReportingWindow) -> Result<BuiltQuery> {
    let QuerySource::CrashReports(channel) = kind.source() else {
        bail!("query kind '{kind}' is not answered by crash-stats");
    };

    if versions.is_empty() {
        bail!("no {channel} versions were resolved for crash-stats query '{kind}'");
    }

    let mut machine_url = endpoint_url(endpoint, "api/SuperSearch/")?;
    append_search(&mut machine_url, product, channel, versions, window);

    let mut human_url = endpoint_url(endpoint, "search/")?;
    append_search(&mut human_url, product, channel, versions, window);
    append_presentation(&mut human_url);

    Ok(BuiltQuery { machine_url, human_url })
}

#[expect(unused_results, reason = "form_urlencoded::Serializer methods return &mut Self for chaining")]
fn append_search(url: &mut Url, product: &str, channel: Channel, versions: &[String], window: &ReportingWindow) {
    let mut pairs = url.query_pairs_mut();

    pairs.append_pair("product", product);

    for version in versions {
        pairs.append_pair("version", &crash_version(channel, version));
    }

    pairs
        .append_pair("date", &format!(">={}T00:00:00.000Z", window.yesterday_key()))
        .append_pair("date", &format!("<{}T00:00:00.000Z", window.today_key()));

    for facet in FACETS {
        pairs.append_pair("_facets", facet);
    }
}

#[expect(unused_results, reason = "form_urlencoded::Serializer methods return &mut Self for chaining")]
fn append_presentation(url: &mut Url) {
    {
        let mut pairs = url.query_pairs_mut();
        pairs.append_pair("_sort", "-date");
        for column in COLUMNS {
            pairs.append_pair("_columns", column);
        }
    }

    url.set_fragment(Some("facet-release_channel"));
}
