use rand::Rng;

/// Source of uniform draws in `[0, 1)`.
///
/// Every `rand::Rng` is a source, so production code hands in a seeded
/// `StdRng` while tests replay a fixed `SequenceSource`.
pub trait RandomSource {
    fn next_unit(&mut self) -> f64;

    /// Uniform index in `0..len`. `len` must be non-zero.
    fn next_index(&mut self, len: usize) -> usize {
        ((self.next_unit() * len as f64) as usize).min(len.saturating_sub(1))
    }
}

impl<R: Rng> RandomSource for R {
    fn next_unit(&mut self) -> f64 {
        self.gen::<f64>()
    }
}

/// Replays a fixed list of draws, cycling when exhausted.
#[derive(Debug, Clone)]
pub struct SequenceSource {
    values: Vec<f64>,
    cursor: usize,
}

impl SequenceSource {
    pub fn new(values: Vec<f64>) -> Self {
        let values = values
            .into_iter()
            .map(|v| v.clamp(0.0, 1.0 - f64::EPSILON))
            .collect();
        Self { values, cursor: 0 }
    }

    /// A source that always yields `value`.
    pub fn constant(value: f64) -> Self {
        Self::new(vec![value])
    }
}

impl RandomSource for SequenceSource {
    fn next_unit(&mut self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value
    }
}
