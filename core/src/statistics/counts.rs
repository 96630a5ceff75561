use crate::math::StatsHelper;
use crate::prelude::Category;
use serde::{Deserialize, Serialize};

/// Running counters per category.
///
/// `recyclable + biodegradable + non_recyclable <= total_classified`; the
/// difference is the number of records with an unknown category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Stats {
    pub total_classified: u64,
    pub recyclable: u64,
    pub biodegradable: u64,
    pub non_recyclable: u64,
}

impl Stats {
    pub fn record(&mut self, category: &Category) {
        self.total_classified += 1;
        match category {
            Category::Recyclable => self.recyclable += 1,
            Category::Biodegradable => self.biodegradable += 1,
            Category::NonRecyclable => self.non_recyclable += 1,
            Category::Unknown(_) => {}
        }
    }

    pub fn bucket(&self, category: &Category) -> u64 {
        match category {
            Category::Recyclable => self.recyclable,
            Category::Biodegradable => self.biodegradable,
            Category::NonRecyclable => self.non_recyclable,
            Category::Unknown(_) => self.total_classified.saturating_sub(
                self.recyclable + self.biodegradable + self.non_recyclable,
            ),
        }
    }
}

/// Whole-number percentage breakdown of `Stats`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Distribution {
    pub recyclable: u32,
    pub biodegradable: u32,
    pub non_recyclable: u32,
}

impl Distribution {
    pub fn from_stats(stats: &Stats) -> Self {
        let total = stats.total_classified;
        Self {
            recyclable: StatsHelper::percentage(stats.recyclable, total),
            biodegradable: StatsHelper::percentage(stats.biodegradable, total),
            non_recyclable: StatsHelper::percentage(stats.non_recyclable, total),
        }
    }

    pub fn sum(&self) -> u32 {
        self.recyclable + self.biodegradable + self.non_recyclable
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn category() -> impl Strategy<Value = Category> {
        prop_oneof![
            Just(Category::Recyclable),
            Just(Category::Biodegradable),
            Just(Category::NonRecyclable),
        ]
    }

    proptest! {
        #[test]
        fn prop_distribution_sums_near_hundred(
            categories in prop::collection::vec(category(), 1..300)
        ) {
            let mut stats = Stats::default();
            for category in categories {
                stats.record(&category);
            }
            let sum = Distribution::from_stats(&stats).sum();
            prop_assert!((98..=102).contains(&sum), "sum was {}", sum);
        }

        #[test]
        fn prop_buckets_never_exceed_total(
            categories in prop::collection::vec(
                prop_oneof![category(), Just(Category::Unknown("Hazardous".into()))],
                0..300,
            )
        ) {
            let mut stats = Stats::default();
            for category in categories {
                stats.record(&category);
            }
            prop_assert!(
                stats.recyclable + stats.biodegradable + stats.non_recyclable
                    <= stats.total_classified
            );
        }
    }
}
