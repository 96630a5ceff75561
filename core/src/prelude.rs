use serde::{Deserialize, Serialize};
use std::fmt;

pub use crate::math::random::{RandomSource, SequenceSource};

/// Waste category assigned to a classified item.
///
/// Only the three canonical categories carry weight in statistics. Any other
/// label is kept verbatim in `Unknown` so it survives persistence and export,
/// but contributes nothing to buckets or eco-impact figures.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(from = "String", into = "String")]
pub enum Category {
    Recyclable,
    Biodegradable,
    NonRecyclable,
    Unknown(String),
}

impl Category {
    pub const CANONICAL: [Category; 3] = [
        Category::Recyclable,
        Category::Biodegradable,
        Category::NonRecyclable,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            Category::Recyclable => "Recyclable",
            Category::Biodegradable => "Biodegradable",
            Category::NonRecyclable => "Non-recyclable",
            Category::Unknown(label) => label,
        }
    }

    /// Parses the canonical label; anything else is kept as `Unknown`.
    pub fn from_label(label: &str) -> Self {
        Category::from(label.to_string())
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Category::Unknown(_))
    }
}

impl From<String> for Category {
    fn from(label: String) -> Self {
        match label.trim() {
            "Recyclable" => Category::Recyclable,
            "Biodegradable" => Category::Biodegradable,
            "Non-recyclable" => Category::NonRecyclable,
            _ => Category::Unknown(label),
        }
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        match category {
            Category::Unknown(label) => label,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Common error type for the persistence boundary of the core.
#[derive(thiserror::Error, Debug)]
pub enum CoreError {
    #[error("storage failure: {0}")]
    Storage(#[from] std::io::Error),
    #[error("snapshot encoding failure: {0}")]
    Encoding(#[from] serde_json::Error),
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

pub type CoreResult<T> = Result<T, CoreError>;
