//! Query kinds and provider URL construction
//!
//! Every metric in a report is identified by a [`QueryKind`]. Each kind maps to exactly one
//! [`Provider`] through [`QueryKind::source`], an exhaustive match, so adding a kind without
//! teaching the aggregator how to answer it is a compile-time error.
//!
//! The issue-tracker and crash-report builders produce a [`BuiltQuery`] holding two URLs that
//! encode the same filter: a machine-readable API form used for counting and a browsable
//! form that ends up in the report for traceability. Telemetry kinds have no query string;
//! their channel filter is the resolved version set applied to the downloaded snapshot.

mod bugzilla;
mod crash_stats;
mod kind;

pub use bugzilla::build_query as issue_tracker_query;
pub use crash_stats::{build_query as crash_report_query, crash_version};
pub use kind::{AdoptionScope, BugFilter, KeywordMatch, Provider, QueryKind, QuerySource};

use crate::Result;
use ohno::IntoAppError;
use url::Url;

/// The two URL variants of one provider query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltQuery {
    /// Query-API form, consumed by the provider adapter.
    pub machine_url: Url,

    /// Browsable form, attached to the report.
    pub human_url: Url,
}

/// Append `path` to a configured endpoint base, keeping any path prefix the base carries.
fn endpoint_url(base: &Url, path: &str) -> Result<Url> {
    let joined = format!("{}/{path}", base.as_str().trim_end_matches('/'));
    Url::parse(&joined).into_app_err_with(|| format!("building a query URL from endpoint '{base}'"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_url_keeps_prefix() {
        let base = Url::parse("http://127.0.0.1:8080/bmo/").unwrap();
        assert_eq!(endpoint_url(&base, "rest/bug").unwrap().as_str(), "http://127.0.0.1:8080/bmo/rest/bug");

        let base = Url::parse("https://bugzilla.mozilla.org").unwrap();
        assert_eq!(endpoint_url(&base, "buglist.cgi").unwrap().as_str(), "https://bugzilla.mozilla.org/buglist.cgi");
    }
}
