//! Printable HTML report. Delivery (print, save, download) is up to the caller.

use crate::math::StatsHelper;
use crate::prelude::Category;
use crate::record::ClassificationRecord;
use crate::statistics::EcoImpactStats;
use chrono::{DateTime, Utc};
use std::fmt::Write;

const STYLE: &str = "body { font-family: Arial, sans-serif; margin: 20px; }
h1, h2 { color: #2d3748; }
table { border-collapse: collapse; width: 100%; margin-top: 20px; }
th, td { border: 1px solid #e2e8f0; padding: 8px; text-align: left; }
th { background-color: #f7fafc; }
.recyclable { color: #22543d; background-color: #c6f6d5; }
.biodegradable { color: #744210; background-color: #fefcbf; }
.non-recyclable { color: #742a2a; background-color: #fed7d7; }
.summary-box { background-color: #f0fff4; border: 1px solid #c6f6d5; border-radius: 5px; padding: 15px; margin: 20px 0; }
.footer { margin-top: 30px; text-align: center; font-size: 12px; color: #718096; }";

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

fn css_class(category: &Category) -> &'static str {
    match category {
        Category::Recyclable => "recyclable",
        Category::Biodegradable => "biodegradable",
        Category::NonRecyclable => "non-recyclable",
        Category::Unknown(_) => "unknown",
    }
}

struct Summary {
    total: u64,
    counts: [u64; 3],
    impact: EcoImpactStats,
}

impl Summary {
    fn of(records: &[ClassificationRecord]) -> Self {
        let count = |category: Category| records.iter().filter(|r| r.category == category).count() as u64;
        let counts = Category::CANONICAL.map(count);
        Self {
            total: records.len() as u64,
            counts,
            impact: EcoImpactStats::from_counts(counts[0], counts[1]),
        }
    }
}

/// Summary section followed by one table row per record.
pub fn to_report_document(records: &[ClassificationRecord], generated_at: DateTime<Utc>) -> String {
    let summary = Summary::of(records);
    let mut html = String::new();

    // fmt::Write into a String cannot fail.
    let _ = write!(
        html,
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>Waste Classification Report</title>\n<style>\n{STYLE}\n</style>\n</head>\n<body>\n"
    );
    let _ = write!(
        html,
        "<div class=\"header\"><h1>Waste Classification Report</h1><p class=\"date\">Generated {}</p></div>\n",
        generated_at.format("%Y-%m-%d %H:%M UTC")
    );

    let _ = write!(
        html,
        "<div class=\"summary-box\">\n<h2>Summary</h2>\n<p>Total items: {}</p>\n<ul>\n",
        summary.total
    );
    for (category, count) in Category::CANONICAL.iter().zip(summary.counts) {
        let _ = writeln!(
            html,
            "<li>{}: {} ({}%)</li>",
            category,
            count,
            StatsHelper::percentage(count, summary.total)
        );
    }
    let impact = summary.impact;
    let _ = write!(
        html,
        "</ul>\n<h2>Environmental Impact</h2>\n<ul>\n<li>CO2 saved: {:.2} kg</li>\n<li>Landfill reduction: {:.2} kg</li>\n<li>Water saved: {:.0} L</li>\n<li>Energy saved: {:.2} kWh</li>\n</ul>\n</div>\n",
        impact.co2_saved, impact.landfill_reduction, impact.water_saved, impact.energy_saved
    );

    html.push_str(
        "<table>\n<thead><tr><th>Date</th><th>Waste Type</th><th>Category</th><th>Accuracy</th></tr></thead>\n<tbody>\n",
    );
    for record in records {
        let _ = writeln!(
            html,
            "<tr><td>{}</td><td>{}</td><td class=\"{}\">{}</td><td>{}%</td></tr>",
            record.timestamp.format("%Y-%m-%d %H:%M"),
            escape(&record.waste_type),
            css_class(&record.category),
            escape(record.category.as_str()),
            record.accuracy
        );
    }
    html.push_str("</tbody>\n</table>\n");
    html.push_str("<div class=\"footer\">Waste classification dashboard</div>\n</body>\n</html>\n");
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn record(category: Category, waste_type: &str) -> ClassificationRecord {
        ClassificationRecord::new(
            "id",
            Utc.with_ymd_and_hms(2025, 3, 12, 10, 30, 0).unwrap(),
            None,
            category,
            92.0,
            waste_type,
        )
    }

    fn generated() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 14, 8, 0, 0).unwrap()
    }

    #[test]
    fn report_summarizes_categories() {
        let records = vec![
            record(Category::Recyclable, "Glass Bottle"),
            record(Category::Recyclable, "Cardboard"),
            record(Category::Biodegradable, "Food Waste"),
            record(Category::NonRecyclable, "Styrofoam"),
        ];
        let html = to_report_document(&records, generated());
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("Generated 2025-03-14 08:00 UTC"));
        assert!(html.contains("Total items: 4"));
        assert!(html.contains("<li>Recyclable: 2 (50%)</li>"));
        assert!(html.contains("<li>Non-recyclable: 1 (25%)</li>"));
        assert!(html.contains("CO2 saved: 1.10 kg"));
        assert_eq!(html.matches("<tr><td>").count(), 4);
    }

    #[test]
    fn empty_report_has_zero_percentages() {
        let html = to_report_document(&[], generated());
        assert!(html.contains("Total items: 0"));
        assert!(html.contains("<li>Biodegradable: 0 (0%)</li>"));
    }

    #[test]
    fn waste_type_is_escaped() {
        let html = to_report_document(&[record(Category::Recyclable, "<script>")], generated());
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<td><script>"));
    }

    #[test]
    fn unknown_category_label_is_shown_escaped() {
        let records = [record(Category::from_label("E-waste <b>"), "Phone")];
        let html = to_report_document(&records, generated());
        assert!(html.contains("<td class=\"unknown\">E-waste &lt;b&gt;</td>"));
        assert!(html.contains("Total items: 1"));
    }
}
