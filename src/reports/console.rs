use crate::Result;
use crate::metrics::{MetricsReport, VersionSummary};
use core::fmt::Write;
use owo_colors::OwoColorize;

/// Write the resolved version sets, one labelled row each.
pub fn generate_versions<W: Write>(summary: &VersionSummary, use_colors: bool, writer: &mut W) -> Result<()> {
    let width = summary.rows.iter().map(|row| row.label.len()).max().unwrap_or(0);

    for row in &summary.rows {
        let versions = if row.versions.is_empty() {
            "(none)".to_string()
        } else {
            row.versions.join(", ")
        };

        if use_colors {
            writeln!(writer, "{:<width$} : {versions}", row.label.bold())?;
        } else {
            writeln!(writer, "{:<width$} : {versions}", row.label)?;
        }
    }

    Ok(())
}

/// Write the version summary followed by one line per metric.
pub fn generate<W: Write>(report: &MetricsReport, use_colors: bool, writer: &mut W) -> Result<()> {
    generate_versions(&report.versions, use_colors, writer)?;
    writeln!(writer)?;

    let heading = format!("Release metrics for {}", report.date.format("%Y-%m-%d"));
    if use_colors {
        writeln!(writer, "{}", heading.bold())?;
    } else {
        writeln!(writer, "{heading}")?;
    }

    let names: Vec<String> = report.metrics.iter().map(|metric| metric.kind.to_string()).collect();
    let width = names.iter().map(String::len).max().unwrap_or(0);

    for (name, metric) in names.iter().zip(&report.metrics) {
        let value = metric.value.to_string();
        if use_colors {
            writeln!(writer, "  {name:<width$} : {}", value.cyan())?;
        } else {
            writeln!(writer, "  {name:<width$} : {value}")?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::{Metric, MetricValue};
    use crate::queries::QueryKind;
    use chrono::NaiveDate;

    fn summary() -> VersionSummary {
        let mut summary = VersionSummary::default();
        summary.push("Daily versions", ["136.0a1"]);
        summary.push("ESR 128 current versions", Vec::<String>::new());
        summary
    }

    #[test]
    fn test_versions_are_aligned() {
        let mut output = String::new();
        generate_versions(&summary(), false, &mut output).unwrap();
        assert_eq!(
            output,
            "Daily versions           : 136.0a1\nESR 128 current versions : (none)\n"
        );
    }

    #[test]
    fn test_metrics_follow_configured_order() {
        let report = MetricsReport {
            date: NaiveDate::from_ymd_opt(2025, 1, 3).unwrap(),
            metrics: vec![
                Metric {
                    kind: QueryKind::TotalAdi,
                    value: MetricValue::Count(1000),
                    description: None,
                    url: None,
                },
                Metric {
                    kind: QueryKind::ReleaseAdiShare,
                    value: MetricValue::Ratio(0.4),
                    description: None,
                    url: None,
                },
            ],
            versions: summary(),
        };

        let mut output = String::new();
        generate(&report, false, &mut output).unwrap();

        assert!(output.contains("Release metrics for 2025-01-03"));
        let total = output.find("total-adi").unwrap();
        let share = output.find("release-adi-%").unwrap();
        assert!(total < share);
        assert!(output.contains("release-adi-% : 0.400000 (40.0000%)"));
    }

    #[test]
    fn test_colors_add_escape_codes() {
        let mut plain = String::new();
        let mut colored = String::new();
        generate_versions(&summary(), false, &mut plain).unwrap();
        generate_versions(&summary(), true, &mut colored).unwrap();
        assert!(colored.contains('\u{1b}'));
        assert!(!plain.contains('\u{1b}'));
    }
}
