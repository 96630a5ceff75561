//! Serializers for the record list.

pub mod csv;
pub mod report;

use crate::record::ClassificationRecord;
use chrono::{DateTime, Utc};

pub struct ExportEngine;

impl ExportEngine {
    pub fn to_csv(records: &[ClassificationRecord]) -> String {
        csv::to_csv(records)
    }

    pub fn to_report_document(
        records: &[ClassificationRecord],
        generated_at: DateTime<Utc>,
    ) -> String {
        report::to_report_document(records, generated_at)
    }
}
