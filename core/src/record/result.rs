use crate::prelude::Category;
use crate::record::ClassificationRecord;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Composting guidance attached to biodegradable entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompostingInfo {
    pub suitable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_to_compost: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nutrient_value: Option<String>,
}

/// Disposal details shared by catalog entries and classifier responses.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisposalDetails {
    pub recyclable: bool,
    pub biodegradable: bool,
    #[serde(default)]
    pub hazardous: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decomposition_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environmental_impact: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disposal_method: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub composting: Option<CompostingInfo>,
}

/// Details payload of a simulated classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WasteDetails {
    pub waste_type: String,
    #[serde(flatten)]
    pub disposal: DisposalDetails,
}

/// Output of the classification simulator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub category: Category,
    pub accuracy: f64,
    pub details: WasteDetails,
}

impl ClassificationResult {
    /// Attaches a fresh id and the given timestamp.
    pub fn into_record(
        self,
        image_url: Option<String>,
        timestamp: DateTime<Utc>,
    ) -> ClassificationRecord {
        ClassificationRecord::new(
            ClassificationRecord::generate_id(),
            timestamp,
            image_url,
            self.category,
            self.accuracy,
            self.details.waste_type,
        )
    }
}

/// Response body returned by the external classification service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifierResponse {
    pub category: Category,
    pub accuracy: f64,
    pub waste_type: String,
    #[serde(default)]
    pub details: DisposalDetails,
}

impl ClassifierResponse {
    pub fn into_record(
        self,
        image_url: Option<String>,
        timestamp: DateTime<Utc>,
    ) -> ClassificationRecord {
        ClassificationRecord::new(
            ClassificationRecord::generate_id(),
            timestamp,
            image_url,
            self.category,
            self.accuracy,
            self.waste_type,
        )
    }
}
