use crate::math::StatsHelper;
use crate::prelude::RandomSource;
use serde::{Deserialize, Serialize};

/// Classifications after which the usage model saturates.
const SATURATION: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HealthStatus {
    Healthy,
    Warning,
    Critical,
}

impl HealthStatus {
    pub fn classify(error_rate: f64, cpu_usage: u32, memory_usage: u32) -> Self {
        if error_rate > 1.8 || cpu_usage > 55 || memory_usage > 55 {
            HealthStatus::Critical
        } else if error_rate > 1.5 || cpu_usage > 50 || memory_usage > 50 {
            HealthStatus::Warning
        } else {
            HealthStatus::Healthy
        }
    }
}

/// Synthetic health figures of the sorting station.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemHealth {
    /// hours
    pub uptime: u32,
    /// milliseconds
    pub response_time: u32,
    /// images per minute
    pub processing_rate: u32,
    /// percent
    pub error_rate: f64,
    pub storage_used: u32,
    pub cpu_usage: u32,
    pub memory_usage: u32,
    pub status: HealthStatus,
}

impl SystemHealth {
    /// Usage-scaled model: load grows and latency falls with volume.
    pub fn from_usage(total_classified: u64) -> Self {
        let total = total_classified as f64;
        let load = (total / SATURATION).min(1.0);
        let capped = total.min(SATURATION);

        let uptime = (100.0 + total * 0.5).round() as u32;
        let response_time =
            StatsHelper::round_to_multiple((100.0 - load * 70.0).max(30.0), 10.0) as u32;
        let processing_rate = (10.0 + load * 40.0).round() as u32;
        let error_rate = StatsHelper::round_to((2.0 - load * 1.9).max(0.1), 2);
        let storage_used = (20.0 + total * 0.2).round().min(100.0) as u32;
        let cpu_usage = (20.0 + capped * 0.15).round() as u32;
        let memory_usage = (20.0 + capped * 0.2).round() as u32;

        Self {
            uptime,
            response_time,
            processing_rate,
            error_rate,
            storage_used,
            cpu_usage,
            memory_usage,
            status: HealthStatus::classify(error_rate, cpu_usage, memory_usage),
        }
    }

    /// Uniform draws within fixed bounds, used before any record exists.
    pub fn synthetic<R: RandomSource + ?Sized>(rng: &mut R) -> Self {
        let mut between = |low: u32, span: f64| low + (rng.next_unit() * span).floor() as u32;
        let uptime = between(100, 500.0);
        let response_time = between(20, 80.0);
        let processing_rate = between(10, 50.0);
        let storage_used = between(20, 60.0);
        let cpu_usage = between(20, 40.0);
        let memory_usage = between(20, 40.0);
        let raw_error_rate = rng.next_unit() * 2.0;

        Self {
            uptime,
            response_time,
            processing_rate,
            error_rate: StatsHelper::round_to(raw_error_rate, 2),
            storage_used,
            cpu_usage,
            memory_usage,
            status: HealthStatus::classify(raw_error_rate, cpu_usage, memory_usage),
        }
    }
}
