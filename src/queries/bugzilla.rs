use super::{BugFilter, BuiltQuery, QueryKind, QuerySource, endpoint_url};
use crate::Result;
use crate::context::AffectedMatch;
use ohno::bail;
use url::Url;

/// Summary terms that mark a bug as noise for release readiness.
const EXCLUDED_SUMMARY_TERMS: &str = "intermit perma assert debug ews";

/// Component terms that mark a bug as out of the product's hands.
const EXCLUDED_COMPONENT_TERMS: &str = " add-on build upstream";

const SEVERE: [&str; 4] = ["S1", "critical", "S2", "major"];

/// Index of the first per-version field; 1..=3 are taken by the base filter.
const FIRST_STATUS_FIELD: usize = 4;

/// Build the issue-tracker query for `kind`.
///
/// `status_flags` lists one status field per tracked version; each becomes an
/// `affected` comparison inside a parenthesized group joined according to `affected`.
pub fn build_query(endpoint: &Url, kind: QueryKind, status_flags: &[String], affected: AffectedMatch) -> Result<BuiltQuery> {
    let QuerySource::IssueTracker(filter) = kind.source() else {
        bail!("query kind '{kind}' is not answered by the issue tracker");
    };

    if status_flags.is_empty() {
        bail!("no status flags to filter issue-tracker query '{kind}' by");
    }

    let mut machine_url = endpoint_url(endpoint, "rest/bug")?;
    let _ = machine_url.query_pairs_mut().append_pair("include_fields", "id,summary,status");
    append_filter(&mut machine_url, filter, status_flags, affected);

    let mut human_url = endpoint_url(endpoint, "buglist.cgi")?;
    append_filter(&mut human_url, filter, status_flags, affected);

    Ok(BuiltQuery { machine_url, human_url })
}

#[expect(unused_results, reason = "form_urlencoded::Serializer methods return &mut Self for chaining")]
fn append_filter(url: &mut Url, filter: BugFilter, status_flags: &[String], affected: AffectedMatch) {
    let fields = FIRST_STATUS_FIELD..FIRST_STATUS_FIELD + status_flags.len();
    let close_group = FIRST_STATUS_FIELD + status_flags.len();

    let mut pairs = url.query_pairs_mut();

    pairs
        .append_pair("bug_type", "defect")
        .append_pair("chfield", "[Bug creation]")
        .append_pair("f1", "short_desc")
        .append_pair("f2", "component")
        .append_pair("f3", "OP");

    for (index, flag) in fields.clone().zip(status_flags) {
        pairs.append_pair(&format!("f{index}"), flag);
    }
    pairs.append_pair(&format!("f{close_group}"), "CP");

    pairs.append_pair(
        "j3",
        match affected {
            AffectedMatch::Any => "OR",
            AffectedMatch::All => "AND",
        },
    );

    for index in fields.clone() {
        pairs.append_pair(&format!("o{index}"), "equals");
    }

    pairs
        .append_pair("resolution", "---")
        .append_pair("v1", EXCLUDED_SUMMARY_TERMS)
        .append_pair("v2", EXCLUDED_COMPONENT_TERMS);

    for index in fields {
        pairs.append_pair(&format!("v{index}"), "affected");
    }

    let keyword_match: &'static str = filter.keyword_match.into();
    pairs.append_pair("keywords", filter.keywords).append_pair("keywords_type", keyword_match);

    if filter.severe_only {
        for severity in SEVERE {
            pairs.append_pair("bug_severity", severity);
        }
    }

    pairs.append_pair("o1", "nowordssubstr").append_pair("o2", "nowordssubstr");
}
