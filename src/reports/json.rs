use crate::Result;
use crate::metrics::MetricsReport;
use core::fmt::Write;
use serde_json::json;

pub fn generate<W: Write>(report: &MetricsReport, writer: &mut W) -> Result<()> {
    let metrics: Vec<_> = report
        .metrics
        .iter()
        .map(|metric| {
            json!({
                "kind": metric.kind,
                "value": metric.value,
                "description": metric.description,
                "url": metric.url,
            })
        })
        .collect();

    let links: Vec<_> = report
        .links()
        .map(|(description, url)| json!({ "description": description, "url": url }))
        .collect();

    let output = json!({
        "date": report.date.format("%Y-%m-%d").to_string(),
        "metrics": metrics,
        "links": links,
    });

    write!(writer, "{}", serde_json::to_string_pretty(&output)?)?;
    Ok(())
}
