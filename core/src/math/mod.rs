pub mod random;
pub mod stats;

pub use random::{RandomSource, SequenceSource};
pub use stats::StatsHelper;
