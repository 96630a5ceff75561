use crate::prelude::Category;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// One observed or simulated waste item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationRecord {
    pub id: String,
    #[serde(with = "crate::record::timestamp")]
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub image_url: Option<String>,
    pub category: Category,
    #[serde(deserialize_with = "clamped_accuracy")]
    pub accuracy: f64,
    pub waste_type: String,
}

impl ClassificationRecord {
    pub fn new(
        id: impl Into<String>,
        timestamp: DateTime<Utc>,
        image_url: Option<String>,
        category: Category,
        accuracy: f64,
        waste_type: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            timestamp,
            image_url,
            category,
            accuracy: clamp_accuracy(accuracy),
            waste_type: waste_type.into(),
        }
    }

    /// Fresh record id of the form `waste-<uuid>`.
    pub fn generate_id() -> String {
        format!("waste-{}", uuid::Uuid::new_v4())
    }

    /// True when the waste type names hazardous or electronic waste.
    pub fn is_hazardous(&self) -> bool {
        let lowered = self.waste_type.to_lowercase();
        lowered.contains("hazardous") || lowered.contains("e-waste")
    }

    pub fn feed_item(&self) -> LiveFeedItem {
        LiveFeedItem {
            id: self.id.clone(),
            timestamp: self.timestamp,
            image_url: self.image_url.clone(),
            category: self.category.clone(),
            accuracy: self.accuracy,
            waste_type: self.waste_type.clone(),
        }
    }
}

/// Projection of a record shown in the live feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveFeedItem {
    pub id: String,
    #[serde(with = "crate::record::timestamp")]
    pub timestamp: DateTime<Utc>,
    pub image_url: Option<String>,
    pub category: Category,
    pub accuracy: f64,
    pub waste_type: String,
}

fn clamp_accuracy(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 100.0)
    }
}

fn clamped_accuracy<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    f64::deserialize(deserializer).map(clamp_accuracy)
}
