use crate::prelude::Category;
use crate::record::{timestamp, ClassificationRecord};
use crate::statistics::eco::ItemImpact;

pub const CSV_HEADER: &str = "ID,Date,Waste Type,Category,Accuracy,Recyclable,Biodegradable,Hazardous,CO2_Impact,Water_Saved,Energy_Saved";

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "Yes"
    } else {
        "No"
    }
}

/// Keeps a field on one line, quoting it only when a comma or quote would
/// otherwise break the row.
fn field(value: &str) -> String {
    let flat = value.replace(['\r', '\n'], " ");
    if flat.contains([',', '"']) {
        format!("\"{}\"", flat.replace('"', "\"\""))
    } else {
        flat
    }
}

fn row(record: &ClassificationRecord) -> String {
    let impact = ItemImpact::for_category(&record.category);
    [
        field(&record.id),
        timestamp::format(&record.timestamp),
        field(&record.waste_type),
        field(record.category.as_str()),
        format!("{}%", record.accuracy),
        yes_no(record.category == Category::Recyclable).to_string(),
        yes_no(record.category == Category::Biodegradable).to_string(),
        yes_no(false).to_string(),
        format!("{:.2}", impact.co2),
        format!("{:.0}", impact.water),
        format!("{:.2}", impact.energy),
    ]
    .join(",")
}

/// Header plus one newline-terminated row per record.
pub fn to_csv(records: &[ClassificationRecord]) -> String {
    let mut csv = String::with_capacity(CSV_HEADER.len() + 1 + records.len() * 96);
    csv.push_str(CSV_HEADER);
    csv.push('\n');
    for record in records {
        csv.push_str(&row(record));
        csv.push('\n');
    }
    csv
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn record(id: &str, category: Category, waste_type: &str) -> ClassificationRecord {
        ClassificationRecord::new(
            id,
            Utc.with_ymd_and_hms(2025, 3, 12, 10, 30, 0).unwrap(),
            None,
            category,
            95.0,
            waste_type,
        )
    }

    #[test]
    fn empty_export_is_header_only() {
        assert_eq!(to_csv(&[]), format!("{CSV_HEADER}\n"));
    }

    #[test]
    fn recyclable_row_carries_item_impact() {
        let csv = to_csv(&[record("1", Category::Recyclable, "Plastic Bottle")]);
        let row = csv.lines().nth(1).unwrap();
        assert_eq!(
            row,
            "1,2025-03-12T10:30:00.000Z,Plastic Bottle,Recyclable,95%,Yes,No,No,0.50,200,1.00"
        );
    }

    #[test]
    fn biodegradable_and_residual_rows() {
        let csv = to_csv(&[
            record("2", Category::Biodegradable, "Food Waste"),
            record("3", Category::NonRecyclable, "Styrofoam"),
        ]);
        let rows: Vec<&str> = csv.lines().skip(1).collect();
        assert!(rows[0].ends_with("Biodegradable,95%,No,Yes,No,0.10,0,0.00"));
        assert!(rows[1].ends_with("Non-recyclable,95%,No,No,No,0.00,0,0.00"));
    }

    #[test]
    fn data_rows_match_record_count() {
        let records: Vec<_> = (0..12)
            .map(|i| record(&i.to_string(), Category::Recyclable, "Aluminum Can"))
            .collect();
        let csv = to_csv(&records);
        assert!(csv.ends_with('\n'));
        let rows: Vec<Vec<&str>> = csv
            .lines()
            .skip(1)
            .map(|line| line.split(',').collect())
            .collect();
        assert_eq!(rows.len(), records.len());
        assert!(rows.iter().all(|columns| columns.len() == 11));
    }

    #[test]
    fn fields_with_commas_are_quoted() {
        let csv = to_csv(&[record("q", Category::Recyclable, "Tin, dented")]);
        assert!(csv.contains(",\"Tin, dented\","));
    }

    #[test]
    fn line_breaks_in_fields_keep_one_line_per_record() {
        let csv = to_csv(&[
            record("n", Category::Recyclable, "Tin\ncan"),
            record("r", Category::Recyclable, "Jar\r\nlid"),
        ]);
        assert_eq!(csv.lines().count(), 3);
        assert!(csv.contains(",Tin can,"));
        assert!(csv.contains(",Jar  lid,"));
    }

    #[test]
    fn unknown_category_label_is_exported_verbatim() {
        let csv = to_csv(&[record("h", Category::from_label("Hazardous"), "Battery")]);
        let row = csv.lines().nth(1).unwrap();
        assert!(row.ends_with("Battery,Hazardous,95%,No,No,No,0.00,0,0.00"));
    }
}
