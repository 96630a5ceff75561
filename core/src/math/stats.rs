pub struct StatsHelper;

impl StatsHelper {
    pub fn mean(values: &[f64]) -> f64 {
        if values.is_empty() {
            return 0.0;
        }
        values.iter().sum::<f64>() / values.len() as f64
    }

    /// Rounds half away from zero to `decimals` places.
    pub fn round_to(value: f64, decimals: i32) -> f64 {
        let scale = 10f64.powi(decimals);
        (value * scale).round() / scale
    }

    /// Rounds to the nearest multiple of `step`.
    pub fn round_to_multiple(value: f64, step: f64) -> f64 {
        if step <= 0.0 {
            return value;
        }
        (value / step).round() * step
    }

    /// Whole-number share of `part` in `total`; zero when `total` is zero.
    pub fn percentage(part: u64, total: u64) -> u32 {
        if total == 0 {
            return 0;
        }
        (part as f64 / total as f64 * 100.0).round() as u32
    }
}
