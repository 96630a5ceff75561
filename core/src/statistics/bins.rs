use crate::prelude::{Category, RandomSource};
use crate::record::ClassificationRecord;
use serde::{Deserialize, Serialize};

/// Fill percentage added by each item dropped in a bin.
const FILL_PER_ITEM: f64 = 0.5;

/// Simulated fill level of each physical bin, in percent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BinLevels {
    pub recyclable: f64,
    pub biodegradable: f64,
    pub non_recyclable: f64,
    pub hazardous: f64,
}

impl BinLevels {
    pub fn from_records(records: &[ClassificationRecord]) -> Self {
        let count = |category: Category| {
            records
                .iter()
                .filter(|record| record.category == category)
                .count()
        };
        let hazardous = records.iter().filter(|record| record.is_hazardous()).count();

        Self {
            recyclable: fill(count(Category::Recyclable)),
            biodegradable: fill(count(Category::Biodegradable)),
            non_recyclable: fill(count(Category::NonRecyclable)),
            hazardous: fill(hazardous),
        }
    }

    /// Independent draws in `0..100`, used before any record exists.
    pub fn synthetic<R: RandomSource + ?Sized>(rng: &mut R) -> Self {
        let mut draw = || (rng.next_unit() * 100.0).floor();
        Self {
            recyclable: draw(),
            biodegradable: draw(),
            non_recyclable: draw(),
            hazardous: draw(),
        }
    }
}

fn fill(count: usize) -> f64 {
    (count as f64 * FILL_PER_ITEM).min(100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prelude::SequenceSource;
    use chrono::Utc;

    fn record(category: Category, waste_type: &str) -> ClassificationRecord {
        ClassificationRecord::new("id", Utc::now(), None, category, 90.0, waste_type)
    }

    #[test]
    fn levels_scale_with_bucket_counts() {
        let records = vec![
            record(Category::Recyclable, "Glass Bottle"),
            record(Category::Recyclable, "Cardboard"),
            record(Category::Biodegradable, "Food Waste"),
            record(Category::NonRecyclable, "Hazardous Battery"),
        ];
        let levels = BinLevels::from_records(&records);
        assert_eq!(levels.recyclable, 1.0);
        assert_eq!(levels.biodegradable, 0.5);
        assert_eq!(levels.non_recyclable, 0.5);
        assert_eq!(levels.hazardous, 0.5);
    }

    #[test]
    fn levels_cap_at_one_hundred() {
        let records: Vec<_> = (0..250)
            .map(|_| record(Category::Recyclable, "Aluminum Can"))
            .collect();
        assert_eq!(BinLevels::from_records(&records).recyclable, 100.0);
    }

    #[test]
    fn no_records_means_empty_bins() {
        assert_eq!(BinLevels::from_records(&[]), BinLevels::default());
    }

    #[test]
    fn synthetic_levels_follow_draws() {
        let mut rng = SequenceSource::new(vec![0.1, 0.255, 0.5, 0.999]);
        let levels = BinLevels::synthetic(&mut rng);
        assert_eq!(levels.recyclable, 10.0);
        assert_eq!(levels.biodegradable, 25.0);
        assert_eq!(levels.non_recyclable, 50.0);
        assert_eq!(levels.hazardous, 99.0);
    }
}
