use crate::record::{ClassificationRecord, LiveFeedItem};
use crate::statistics::{
    AccuracyTrendItem, AiMetrics, BinLevels, Distribution, EcoImpactStats, Stats, SystemHealth,
    WasteTrend,
};
use serde::Serialize;

/// Everything the dashboard renders, captured at one consistent point.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub recent_classifications: Vec<ClassificationRecord>,
    pub stats: Stats,
    pub distribution: Distribution,
    pub accuracy_trend: Vec<AccuracyTrendItem>,
    pub eco_impact: EcoImpactStats,
    pub system_health: SystemHealth,
    pub bin_levels: BinLevels,
    pub ai_metrics: AiMetrics,
    pub waste_trends: Vec<WasteTrend>,
    pub live_feed: Vec<LiveFeedItem>,
}
