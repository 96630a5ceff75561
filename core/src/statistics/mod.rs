//! Pure derivations from classification records to dashboard figures.

pub mod bins;
pub mod counts;
pub mod eco;
pub mod health;
pub mod metrics;
pub mod trends;

pub use bins::BinLevels;
pub use counts::{Distribution, Stats};
pub use eco::EcoImpactStats;
pub use health::{HealthStatus, SystemHealth};
pub use metrics::{AiMetrics, ConfusionMatrix};
pub use trends::{AccuracyTrendItem, WasteTrend};

/// Average mass of one classified item, in kilograms.
pub const ITEM_WEIGHT_KG: f64 = 0.2;
/// CO2 avoided per kilogram recycled.
pub const RECYCLED_CO2_PER_KG: f64 = 2.5;
/// CO2 avoided per kilogram composted.
pub const COMPOSTED_CO2_PER_KG: f64 = 0.5;
/// Litres of water saved per kilogram recycled.
pub const RECYCLED_WATER_PER_KG: f64 = 1000.0;
/// kWh saved per kilogram recycled.
pub const RECYCLED_ENERGY_PER_KG: f64 = 5.0;
/// CO2 absorbed by one tree per year, in kilograms.
pub const TREE_CO2_PER_YEAR: f64 = 20.0;
