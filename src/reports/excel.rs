use crate::Result;
use crate::metrics::{MetricValue, MetricsReport};
use rust_xlsxwriter::{Color, DocProperties, Format, FormatAlign, Workbook, Worksheet};
use std::io::Write;

const LINKS_SHEET: &str = "Release Metrics Charts";
const DATA_SHEET: &str = "Data from Queries";

const LINKS_COLUMN_WIDTH: f64 = 80.0;
const DATA_COLUMN_WIDTH: f64 = 12.0;

pub fn generate<W: Write>(report: &MetricsReport, writer: &mut W) -> Result<()> {
    let mut workbook = Workbook::new();

    let properties = DocProperties::new().set_author("release-metrics");
    let _ = workbook.set_properties(&properties);

    write_links(workbook.add_worksheet(), report)?;
    write_data(workbook.add_worksheet(), report)?;

    let data = workbook.save_to_buffer()?;
    writer.write_all(&data)?;

    Ok(())
}

/// The first sheet lists every described query as a hyperlink to its browsable form.
#[expect(unused_results, reason = "rust_xlsxwriter methods return &mut Worksheet for chaining")]
fn write_links(worksheet: &mut Worksheet, report: &MetricsReport) -> Result<()> {
    worksheet.set_name(LINKS_SHEET)?;

    let header_format = Format::new()
        .set_bold()
        .set_font_name("Arial")
        .set_font_size(10)
        .set_background_color(Color::RGB(0x00B0_B3B2))
        .set_align(FormatAlign::Center);

    worksheet.write_string_with_format(0, 0, "Query URLs", &header_format)?;

    for (index, (description, url)) in report.links().enumerate() {
        #[expect(clippy::cast_possible_truncation, reason = "Row count is bounded by the number of query kinds")]
        worksheet.write_url_with_text((index + 1) as u32, 0, url.as_str(), description)?;
    }

    worksheet.set_column_width(0, LINKS_COLUMN_WIDTH)?;
    Ok(())
}

/// The second sheet holds one row of values under a `Date` column and one column per kind.
#[expect(unused_results, reason = "rust_xlsxwriter methods return &mut Worksheet for chaining")]
fn write_data(worksheet: &mut Worksheet, report: &MetricsReport) -> Result<()> {
    worksheet.set_name(DATA_SHEET)?;

    let header_format = Format::new()
        .set_bold()
        .set_text_wrap()
        .set_font_name("Helvetica Neue")
        .set_font_size(10)
        .set_align(FormatAlign::Center);
    let date_format = Format::new()
        .set_font_name("Helvetica Neue")
        .set_font_size(10)
        .set_background_color(Color::RGB(0x00D4_D4D4));
    let count_format = Format::new().set_font_name("Helvetica Neue").set_font_size(10);
    let ratio_format = Format::new()
        .set_font_name("Helvetica Neue")
        .set_font_size(10)
        .set_num_format("0.00%");

    worksheet.write_string_with_format(0, 0, "Date", &header_format)?;
    worksheet.write_string_with_format(1, 0, report.date.format("%Y-%m-%d").to_string(), &date_format)?;
    worksheet.set_column_width(0, DATA_COLUMN_WIDTH)?;

    for (index, metric) in report.metrics.iter().enumerate() {
        #[expect(clippy::cast_possible_truncation, reason = "Column index limited by Excel's u16 column limit")]
        let col = (index + 1) as u16;

        let format = match metric.value {
            MetricValue::Count(_) => &count_format,
            MetricValue::Ratio(_) => &ratio_format,
        };

        worksheet.write_string_with_format(0, col, metric.kind.to_string(), &header_format)?;
        worksheet.write_number_with_format(1, col, metric.value.as_f64(), format)?;
        worksheet.set_column_width(col, DATA_COLUMN_WIDTH)?;
    }

    worksheet.set_freeze_panes(1, 1)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::{Metric, VersionSummary};
    use crate::queries::QueryKind;
    use chrono::NaiveDate;
    use url::Url;

    fn report(metrics: Vec<Metric>) -> MetricsReport {
        MetricsReport {
            date: NaiveDate::from_ymd_opt(2025, 1, 3).unwrap(),
            metrics,
            versions: VersionSummary::default(),
        }
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetSystemTimePreciseAsFileTime (rust_xlsxwriter)")]
    fn test_generate_produces_workbook() {
        let report = report(vec![
            Metric {
                kind: QueryKind::Perf,
                value: MetricValue::Count(4),
                description: Some("# of perf bugs (affecting 128+)".into()),
                url: Some(Url::parse("https://bugzilla.example/buglist.cgi?keywords=perf").unwrap()),
            },
            Metric {
                kind: QueryKind::BetaCrashRate,
                value: MetricValue::Ratio(0.0125),
                description: None,
                url: None,
            },
        ]);

        let mut output = Vec::new();
        generate(&report, &mut output).unwrap();
        assert!(output.len() > 1000);
        assert_eq!(&output[0..2], b"PK");
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetSystemTimePreciseAsFileTime (rust_xlsxwriter)")]
    fn test_generate_without_links() {
        let report = report(vec![Metric {
            kind: QueryKind::TotalAdi,
            value: MetricValue::Count(1000),
            description: None,
            url: None,
        }]);

        let mut output = Vec::new();
        generate(&report, &mut output).unwrap();
        assert_eq!(&output[0..2], b"PK");
    }
}
