use serde::Serialize;
use std::sync::Mutex;

/// Counters for work flowing through the dashboard bridge.
pub struct MetricsRecorder {
    inner: Mutex<Metrics>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Metrics {
    pub classified: usize,
    pub classifier_failures: usize,
    pub exports: usize,
}

impl MetricsRecorder {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Metrics::default()),
        }
    }

    pub fn record_classified(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.classified += 1;
        }
    }

    pub fn record_failure(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.classifier_failures += 1;
        }
    }

    pub fn record_export(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.exports += 1;
        }
    }

    pub fn snapshot(&self) -> Metrics {
        self.inner
            .lock()
            .map(|metrics| *metrics)
            .unwrap_or_default()
    }
}

impl Default for MetricsRecorder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_accumulate_independently() {
        let recorder = MetricsRecorder::new();
        recorder.record_classified();
        recorder.record_classified();
        recorder.record_failure();
        recorder.record_export();
        assert_eq!(
            recorder.snapshot(),
            Metrics {
                classified: 2,
                classifier_failures: 1,
                exports: 1,
            }
        );
    }
}
