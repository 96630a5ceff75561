//! Deterministic stand-in for the image classifier.
//!
//! Entry selection is a pure function of the label, except for labels that
//! name vegetable matter, which draw from the vegetable entries. Accuracy is
//! always drawn from the selected entry's range.

use crate::catalog::{WasteTypeCatalog, WasteTypeEntry};
use crate::prelude::{Category, RandomSource};
use crate::record::{ClassificationResult, WasteDetails};
use log::debug;

const VEGETABLE_KEYWORDS: [&str; 17] = [
    "vegetable", "veg", "carrot", "potato", "tomato", "broccoli", "cabbage", "lettuce", "spinach",
    "onion", "cucumber", "kale", "pepper", "eggplant", "zucchini", "peel", "scrap",
];

const VEGETABLE_ENTRY_NAMES: [&str; 3] = ["Vegetable", "Carrot", "Potato"];

pub struct ClassificationSimulator<'a> {
    catalog: &'a WasteTypeCatalog,
}

impl Default for ClassificationSimulator<'static> {
    fn default() -> Self {
        Self::new(WasteTypeCatalog::standard())
    }
}

impl<'a> ClassificationSimulator<'a> {
    pub fn new(catalog: &'a WasteTypeCatalog) -> Self {
        Self { catalog }
    }

    /// Sum of the label's UTF-16 code units.
    pub fn label_hash(label: &str) -> u64 {
        label.encode_utf16().map(u64::from).sum()
    }

    pub fn is_vegetable_label(label: &str) -> bool {
        let lowered = label.to_lowercase();
        VEGETABLE_KEYWORDS
            .iter()
            .any(|keyword| lowered.contains(keyword))
    }

    pub fn classify<R: RandomSource + ?Sized>(
        &self,
        label: &str,
        rng: &mut R,
    ) -> ClassificationResult {
        let entry = self
            .vegetable_entry(label, rng)
            .unwrap_or_else(|| self.hashed_entry(label));
        let range = entry.accuracy_range;
        let span = range.max.saturating_sub(range.min) as f64;
        let accuracy = (range.min as f64 + rng.next_unit() * span).floor();

        debug!("classified {:?} as {} ({})", label, entry.name, entry.category);

        ClassificationResult {
            category: entry.category.clone(),
            accuracy,
            details: WasteDetails {
                waste_type: entry.name.clone(),
                disposal: entry.details.clone(),
            },
        }
    }

    /// Classifies `count` generated labels of the form `waste_<n>.jpg`.
    pub fn simulate_batch<R: RandomSource + ?Sized>(
        &self,
        count: usize,
        rng: &mut R,
    ) -> Vec<ClassificationResult> {
        (0..count)
            .map(|_| {
                let label = format!("waste_{}.jpg", (rng.next_unit() * 1000.0) as u32);
                self.classify(&label, rng)
            })
            .collect()
    }

    fn hashed_entry(&self, label: &str) -> &'a WasteTypeEntry {
        let index = Self::label_hash(label) % self.catalog.len() as u64;
        self.catalog.lookup(index as usize)
    }

    fn vegetable_entry<R: RandomSource + ?Sized>(
        &self,
        label: &str,
        rng: &mut R,
    ) -> Option<&'a WasteTypeEntry> {
        if !Self::is_vegetable_label(label) {
            return None;
        }
        let candidates = self.catalog.filter(|entry| {
            entry.category == Category::Biodegradable
                && VEGETABLE_ENTRY_NAMES
                    .iter()
                    .any(|name| entry.name.contains(name))
        });
        if candidates.is_empty() {
            return None;
        }
        Some(candidates[rng.next_index(candidates.len())])
    }
}
