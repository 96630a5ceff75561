//! Dataset the dashboard starts from and returns to on reset.

use super::snapshot::Snapshot;
use crate::prelude::Category;
use crate::record::ClassificationRecord;
use crate::statistics::{AccuracyTrendItem, Distribution, Stats};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

const BOTTLE_IMAGE: &str = "https://images.pexels.com/photos/802221/pexels-photo-802221.jpeg";
const FOOD_IMAGE: &str = "https://images.pexels.com/photos/3826114/pexels-photo-3826114.jpeg";
const FOAM_IMAGE: &str = "https://images.pexels.com/photos/239369/pexels-photo-239369.jpeg";

fn at(day: u32, hour: u32, minute: u32) -> chrono::DateTime<chrono::Utc> {
    let date = NaiveDate::from_ymd_opt(2025, 3, day).unwrap_or_default();
    let time = NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or_default();
    NaiveDateTime::new(date, time).and_utc()
}

fn seed_record(
    id: &str,
    (day, hour, minute): (u32, u32, u32),
    image: &str,
    category: Category,
    accuracy: f64,
    waste_type: &str,
) -> ClassificationRecord {
    ClassificationRecord::new(
        id,
        at(day, hour, minute),
        Some(image.to_string()),
        category,
        accuracy,
        waste_type,
    )
}

fn trend_day(day: u32, recyclable: u32, biodegradable: u32, non_recyclable: u32) -> AccuracyTrendItem {
    AccuracyTrendItem {
        date: NaiveDate::from_ymd_opt(2025, 3, day).unwrap_or_default(),
        recyclable,
        biodegradable,
        non_recyclable,
    }
}

pub fn seed_snapshot() -> Snapshot {
    Snapshot {
        recent_classifications: vec![
            seed_record("1", (12, 10, 30), BOTTLE_IMAGE, Category::Recyclable, 95.0, "Plastic Bottle"),
            seed_record("2", (12, 10, 15), FOOD_IMAGE, Category::Biodegradable, 88.0, "Food Waste"),
            seed_record("3", (12, 9, 45), FOAM_IMAGE, Category::NonRecyclable, 92.0, "Styrofoam"),
            seed_record("4", (11, 16, 20), BOTTLE_IMAGE, Category::Recyclable, 97.0, "Aluminum Can"),
            seed_record("5", (11, 15, 10), FOOD_IMAGE, Category::Biodegradable, 85.0, "Paper Napkin"),
            seed_record("6", (11, 11, 45), FOAM_IMAGE, Category::NonRecyclable, 90.0, "Plastic Bag"),
            seed_record("7", (10, 14, 30), BOTTLE_IMAGE, Category::Recyclable, 93.0, "Glass Bottle"),
        ],
        stats: Stats {
            total_classified: 358,
            recyclable: 187,
            biodegradable: 112,
            non_recyclable: 59,
        },
        distribution: Distribution {
            recyclable: 52,
            biodegradable: 31,
            non_recyclable: 17,
        },
        accuracy_trend: vec![
            trend_day(6, 88, 82, 79),
            trend_day(7, 89, 84, 80),
            trend_day(8, 91, 85, 82),
            trend_day(9, 92, 86, 83),
            trend_day(10, 93, 87, 85),
            trend_day(11, 94, 88, 86),
            trend_day(12, 95, 89, 87),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_records_are_newest_first() {
        let seed = seed_snapshot();
        assert_eq!(seed.recent_classifications.len(), 7);
        assert!(seed
            .recent_classifications
            .windows(2)
            .all(|pair| pair[0].timestamp >= pair[1].timestamp));
    }

    #[test]
    fn seed_trend_spans_a_week() {
        let seed = seed_snapshot();
        assert_eq!(seed.accuracy_trend.len(), 7);
        assert_eq!(seed.accuracy_trend[0].date.to_string(), "2025-03-06");
    }
}
