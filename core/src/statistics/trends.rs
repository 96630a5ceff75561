use crate::prelude::{Category, RandomSource};
use crate::record::ClassificationRecord;
use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Number of daily points in the waste trend series.
pub const WASTE_TREND_DAYS: u64 = 14;

/// Mean accuracy per category for one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccuracyTrendItem {
    pub date: NaiveDate,
    pub recyclable: u32,
    pub biodegradable: u32,
    pub non_recyclable: u32,
}

/// Item volume per category for one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WasteTrend {
    pub date: NaiveDate,
    pub recyclable: u32,
    pub biodegradable: u32,
    pub non_recyclable: u32,
}

#[derive(Default)]
struct DayAccumulator {
    sums: [f64; 3],
    counts: [u32; 3],
}

impl DayAccumulator {
    fn add(&mut self, slot: usize, accuracy: f64) {
        self.sums[slot] += accuracy;
        self.counts[slot] += 1;
    }

    fn mean(&self, slot: usize) -> u32 {
        if self.counts[slot] == 0 {
            return 0;
        }
        (self.sums[slot] / self.counts[slot] as f64).round() as u32
    }
}

fn slot(category: &Category) -> Option<usize> {
    match category {
        Category::Recyclable => Some(0),
        Category::Biodegradable => Some(1),
        Category::NonRecyclable => Some(2),
        Category::Unknown(_) => None,
    }
}

/// Groups records by UTC calendar date, ascending.
pub fn accuracy_trend(records: &[ClassificationRecord]) -> Vec<AccuracyTrendItem> {
    let mut days: BTreeMap<NaiveDate, DayAccumulator> = BTreeMap::new();
    for record in records {
        let day = days.entry(record.timestamp.date_naive()).or_default();
        if let Some(slot) = slot(&record.category) {
            day.add(slot, record.accuracy);
        }
    }

    days.into_iter()
        .map(|(date, day)| AccuracyTrendItem {
            date,
            recyclable: day.mean(0),
            biodegradable: day.mean(1),
            non_recyclable: day.mean(2),
        })
        .collect()
}

/// Fourteen synthetic daily volumes ending on `today`.
pub fn waste_trends<R: RandomSource + ?Sized>(today: NaiveDate, rng: &mut R) -> Vec<WasteTrend> {
    (0..WASTE_TREND_DAYS)
        .rev()
        .map(|offset| {
            let i = offset as f64;
            let date = today.checked_sub_days(Days::new(offset)).unwrap_or(today);
            let recyclable = 30.0 + (i * 0.5).sin() * 10.0;
            let biodegradable = 25.0 + (i * 0.5).cos() * 8.0;
            let non_recyclable = 15.0 + (i * 0.8).sin() * 5.0;
            WasteTrend {
                date,
                recyclable: (recyclable + rng.next_unit() * 5.0).round() as u32,
                biodegradable: (biodegradable + rng.next_unit() * 5.0).round() as u32,
                non_recyclable: (non_recyclable + rng.next_unit() * 5.0).round() as u32,
            }
        })
        .collect()
}
