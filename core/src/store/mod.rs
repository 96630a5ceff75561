//! Owned dashboard state and its mutation rules.
//!
//! Every operation recomputes the affected views before returning, so a
//! caller never observes a partially updated store.

pub mod seed;
pub mod shared;
pub mod snapshot;
pub mod view;

pub use shared::SharedStore;
pub use snapshot::{FileSlot, MemorySlot, Snapshot, SnapshotSlot, SNAPSHOT_KEY};
pub use view::DashboardView;

use crate::export::ExportEngine;
use crate::prelude::{CoreResult, RandomSource};
use crate::record::{ClassificationRecord, LiveFeedItem};
use crate::statistics::trends::{accuracy_trend, waste_trends};
use crate::statistics::{
    AccuracyTrendItem, AiMetrics, BinLevels, Distribution, EcoImpactStats, Stats, SystemHealth,
    WasteTrend,
};
use crate::telemetry::LogManager;
use chrono::{DateTime, Utc};
use rand::rngs::StdRng;

/// Tunables for the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreOptions {
    /// Entries kept in the live feed.
    pub feed_capacity: usize,
    /// Records kept in history; `None` keeps everything.
    pub history_capacity: Option<usize>,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            feed_capacity: 10,
            history_capacity: None,
        }
    }
}

pub struct ClassificationStore<R = StdRng> {
    options: StoreOptions,
    rng: R,
    logger: LogManager,
    records: Vec<ClassificationRecord>,
    stats: Stats,
    distribution: Distribution,
    accuracy_trend: Vec<AccuracyTrendItem>,
    eco_impact: EcoImpactStats,
    system_health: SystemHealth,
    bin_levels: BinLevels,
    ai_metrics: AiMetrics,
    waste_trends: Vec<WasteTrend>,
    live_feed: Vec<LiveFeedItem>,
}

impl<R: RandomSource> ClassificationStore<R> {
    /// Store populated from the seed dataset.
    pub fn new(options: StoreOptions, rng: R) -> Self {
        Self::from_snapshot(seed::seed_snapshot(), options, rng)
    }

    /// Store with no records at all; synthetic views fill the gaps.
    pub fn empty(options: StoreOptions, rng: R) -> Self {
        Self::from_snapshot(Snapshot::default(), options, rng)
    }

    pub fn from_snapshot(snapshot: Snapshot, options: StoreOptions, rng: R) -> Self {
        let mut store = Self {
            options,
            rng,
            logger: LogManager::new("store"),
            records: Vec::new(),
            stats: Stats::default(),
            distribution: Distribution::default(),
            accuracy_trend: Vec::new(),
            eco_impact: EcoImpactStats::default(),
            system_health: SystemHealth::from_usage(0),
            bin_levels: BinLevels::default(),
            ai_metrics: AiMetrics::default(),
            waste_trends: Vec::new(),
            live_feed: Vec::new(),
        };
        store.install(snapshot);
        store
    }

    /// Loads the snapshot stored under `SNAPSHOT_KEY`, or the seed when absent
    /// or unreadable.
    pub fn load<S: SnapshotSlot + ?Sized>(
        slot: &S,
        options: StoreOptions,
        rng: R,
    ) -> CoreResult<Self> {
        let logger = LogManager::new("store");
        let snapshot = match slot.read(SNAPSHOT_KEY)? {
            Some(raw) => match Snapshot::decode(&raw) {
                Ok(snapshot) => {
                    logger.record(&format!(
                        "restored snapshot with {} records",
                        snapshot.recent_classifications.len()
                    ));
                    snapshot
                }
                Err(err) => {
                    logger.warn(&format!("discarding unreadable snapshot: {err}"));
                    seed::seed_snapshot()
                }
            },
            None => seed::seed_snapshot(),
        };
        Ok(Self::from_snapshot(snapshot, options, rng))
    }

    pub fn save<S: SnapshotSlot + ?Sized>(&self, slot: &mut S) -> CoreResult<()> {
        self.to_snapshot().save_to(slot)?;
        self.logger
            .record(&format!("saved snapshot with {} records", self.records.len()));
        Ok(())
    }

    pub fn to_snapshot(&self) -> Snapshot {
        Snapshot {
            recent_classifications: self.records.clone(),
            stats: self.stats,
            distribution: self.distribution,
            accuracy_trend: self.accuracy_trend.clone(),
        }
    }

    pub fn add_classification(&mut self, record: ClassificationRecord) {
        self.logger.record(&format!(
            "adding {} ({}, {:.1}%)",
            record.waste_type, record.category, record.accuracy
        ));
        if !record.category.is_known() {
            self.logger
                .warn(&format!("record {} has an unrecognized category", record.id));
        }

        self.live_feed.insert(0, record.feed_item());
        self.live_feed.truncate(self.options.feed_capacity);

        self.stats.record(&record.category);
        self.records.insert(0, record);
        self.enforce_history_capacity();

        self.distribution = Distribution::from_stats(&self.stats);
        self.accuracy_trend = accuracy_trend(&self.records);
        self.eco_impact = EcoImpactStats::from_counts(self.stats.recyclable, self.stats.biodegradable);
        self.bin_levels = BinLevels::from_records(&self.records);
        self.ai_metrics = AiMetrics::from_records(&self.records);
        self.waste_trends = waste_trends(Utc::now().date_naive(), &mut self.rng);
    }

    /// Recomputes health, bins, model metrics and trends; records are untouched.
    pub fn refresh_system_status(&mut self) {
        self.system_health = if self.stats.total_classified == 0 {
            SystemHealth::synthetic(&mut self.rng)
        } else {
            SystemHealth::from_usage(self.stats.total_classified)
        };
        self.bin_levels = if self.records.is_empty() {
            BinLevels::synthetic(&mut self.rng)
        } else {
            BinLevels::from_records(&self.records)
        };
        self.ai_metrics = AiMetrics::from_records(&self.records);
        self.waste_trends = waste_trends(Utc::now().date_naive(), &mut self.rng);
        self.logger.record(&format!(
            "refreshed system status: {:?}",
            self.system_health.status
        ));
    }

    /// Resets to the seed dataset.
    pub fn clear_data(&mut self) {
        self.install(seed::seed_snapshot());
        self.logger.record("reset to seed dataset");
    }

    pub fn export_csv(&self) -> String {
        ExportEngine::to_csv(&self.records)
    }

    pub fn report_document(&self, generated_at: DateTime<Utc>) -> String {
        ExportEngine::to_report_document(&self.records, generated_at)
    }

    pub fn dashboard(&self) -> DashboardView {
        DashboardView {
            recent_classifications: self.records.clone(),
            stats: self.stats,
            distribution: self.distribution,
            accuracy_trend: self.accuracy_trend.clone(),
            eco_impact: self.eco_impact,
            system_health: self.system_health,
            bin_levels: self.bin_levels,
            ai_metrics: self.ai_metrics,
            waste_trends: self.waste_trends.clone(),
            live_feed: self.live_feed.clone(),
        }
    }

    pub fn records(&self) -> &[ClassificationRecord] {
        &self.records
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    pub fn distribution(&self) -> &Distribution {
        &self.distribution
    }

    pub fn accuracy_trend(&self) -> &[AccuracyTrendItem] {
        &self.accuracy_trend
    }

    pub fn eco_impact(&self) -> &EcoImpactStats {
        &self.eco_impact
    }

    pub fn system_health(&self) -> &SystemHealth {
        &self.system_health
    }

    pub fn bin_levels(&self) -> &BinLevels {
        &self.bin_levels
    }

    pub fn ai_metrics(&self) -> &AiMetrics {
        &self.ai_metrics
    }

    pub fn waste_trends(&self) -> &[WasteTrend] {
        &self.waste_trends
    }

    pub fn live_feed(&self) -> &[LiveFeedItem] {
        &self.live_feed
    }

    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }

    fn install(&mut self, snapshot: Snapshot) {
        self.records = snapshot.recent_classifications;
        self.enforce_history_capacity();
        self.stats = snapshot.stats;
        self.distribution = snapshot.distribution;
        self.accuracy_trend = snapshot.accuracy_trend;
        self.eco_impact =
            EcoImpactStats::from_counts(self.stats.recyclable, self.stats.biodegradable);
        self.live_feed = self
            .records
            .iter()
            .take(self.options.feed_capacity)
            .map(ClassificationRecord::feed_item)
            .collect();
        self.refresh_system_status();
    }

    fn enforce_history_capacity(&mut self) {
        if let Some(capacity) = self.options.history_capacity {
            self.records.truncate(capacity);
        }
    }
}

impl ClassificationStore<StdRng> {
    /// Seeded store driven by a reproducible `StdRng`.
    pub fn with_seed(options: StoreOptions, seed: u64) -> Self {
        use rand::SeedableRng;
        Self::new(options, StdRng::seed_from_u64(seed))
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::prelude::Category;
    use proptest::prelude::*;
    use rand::SeedableRng;

    proptest! {
        #[test]
        fn prop_feed_never_exceeds_capacity(
            capacity in 1usize..20,
            adds in 0usize..60,
        ) {
            let options = StoreOptions { feed_capacity: capacity, history_capacity: None };
            let mut store = ClassificationStore::new(options, StdRng::seed_from_u64(1));
            for i in 0..adds {
                store.add_classification(ClassificationRecord::new(
                    i.to_string(),
                    Utc::now(),
                    None,
                    Category::Recyclable,
                    90.0,
                    "Aluminum Can",
                ));
            }
            prop_assert!(store.live_feed().len() <= capacity);
            prop_assert_eq!(store.stats().total_classified, 358 + adds as u64);
        }
    }
}
