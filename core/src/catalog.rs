//! Static table of known waste types.

use crate::prelude::{Category, CoreError, CoreResult};
use crate::record::{CompostingInfo, DisposalDetails};
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Inclusive lower and exclusive upper bound for simulated accuracy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccuracyRange {
    pub min: u32,
    pub max: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WasteTypeEntry {
    pub name: String,
    pub category: Category,
    pub accuracy_range: AccuracyRange,
    pub details: DisposalDetails,
}

/// Immutable, non-empty list of waste types.
#[derive(Debug, Clone)]
pub struct WasteTypeCatalog {
    entries: Vec<WasteTypeEntry>,
}

impl WasteTypeCatalog {
    pub fn new(entries: Vec<WasteTypeEntry>) -> CoreResult<Self> {
        if entries.is_empty() {
            return Err(CoreError::InvalidInput("catalog needs at least one entry".into()));
        }
        Ok(Self { entries })
    }

    /// The built-in catalog, shared process-wide.
    pub fn standard() -> &'static WasteTypeCatalog {
        static STANDARD: OnceLock<WasteTypeCatalog> = OnceLock::new();
        STANDARD.get_or_init(|| WasteTypeCatalog {
            entries: standard_entries(),
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry at `index` modulo the catalog size.
    pub fn lookup(&self, index: usize) -> &WasteTypeEntry {
        &self.entries[index % self.entries.len()]
    }

    pub fn filter<P>(&self, predicate: P) -> Vec<&WasteTypeEntry>
    where
        P: Fn(&WasteTypeEntry) -> bool,
    {
        self.entries.iter().filter(|entry| predicate(entry)).collect()
    }

    pub fn entries(&self) -> &[WasteTypeEntry] {
        &self.entries
    }
}

struct EntryTemplate {
    name: &'static str,
    category: Category,
    range: (u32, u32),
    recyclable: bool,
    biodegradable: bool,
    decomposition: &'static str,
    impact: &'static str,
    disposal: &'static str,
    compost: Option<(&'static str, &'static str)>,
}

impl EntryTemplate {
    fn build(self) -> WasteTypeEntry {
        WasteTypeEntry {
            name: self.name.to_string(),
            category: self.category,
            accuracy_range: AccuracyRange {
                min: self.range.0,
                max: self.range.1,
            },
            details: DisposalDetails {
                recyclable: self.recyclable,
                biodegradable: self.biodegradable,
                hazardous: false,
                decomposition_time: Some(self.decomposition.to_string()),
                environmental_impact: Some(self.impact.to_string()),
                disposal_method: Some(self.disposal.to_string()),
                composting: self.compost.map(|(time, nutrients)| CompostingInfo {
                    suitable: true,
                    time_to_compost: Some(time.to_string()),
                    nutrient_value: Some(nutrients.to_string()),
                }),
            },
        }
    }
}

fn recyclable(
    name: &'static str,
    range: (u32, u32),
    biodegradable: bool,
    decomposition: &'static str,
    impact: &'static str,
    disposal: &'static str,
) -> WasteTypeEntry {
    EntryTemplate {
        name,
        category: Category::Recyclable,
        range,
        recyclable: true,
        biodegradable,
        decomposition,
        impact,
        disposal,
        compost: None,
    }
    .build()
}

fn compostable(
    name: &'static str,
    range: (u32, u32),
    decomposition: &'static str,
    impact: &'static str,
    disposal: &'static str,
    nutrients: &'static str,
) -> WasteTypeEntry {
    EntryTemplate {
        name,
        category: Category::Biodegradable,
        range,
        recyclable: false,
        biodegradable: true,
        decomposition,
        impact,
        disposal,
        compost: Some((decomposition, nutrients)),
    }
    .build()
}

fn residual(
    name: &'static str,
    range: (u32, u32),
    decomposition: &'static str,
    impact: &'static str,
    disposal: &'static str,
) -> WasteTypeEntry {
    EntryTemplate {
        name,
        category: Category::NonRecyclable,
        range,
        recyclable: false,
        biodegradable: false,
        decomposition,
        impact,
        disposal,
        compost: None,
    }
    .build()
}

// Order matters: label hashes index into this table.
fn standard_entries() -> Vec<WasteTypeEntry> {
    vec![
        residual(
            "Mixed Plastic",
            (84, 94),
            "100-500 years",
            "High - difficult to process and often ends in landfill",
            "General waste bin, check local specialized recycling",
        ),
        recyclable(
            "Aluminum Can",
            (92, 99),
            false,
            "200-500 years",
            "Moderate - energy intensive to produce",
            "Rinse and recycle in metal recycling bin",
        ),
        recyclable(
            "Glass Bottle",
            (91, 98),
            false,
            "1+ million years",
            "Low if recycled, can be recycled infinitely",
            "Rinse and recycle in glass recycling bin",
        ),
        recyclable(
            "Cardboard",
            (87, 96),
            true,
            "2 months",
            "Low - biodegradable and recyclable",
            "Flatten and recycle in paper recycling bin",
        ),
        compostable(
            "Food Waste",
            (85, 95),
            "2-6 weeks",
            "Low in compost, high in landfill (methane)",
            "Compost bin or food waste collection",
            "Moderate",
        ),
        compostable(
            "Paper Napkin",
            (82, 93),
            "2-4 weeks",
            "Low - biodegrades quickly",
            "Compost if not heavily soiled",
            "Low",
        ),
        compostable(
            "Coffee Grounds",
            (88, 97),
            "2-3 weeks",
            "Beneficial for compost, adds nitrogen",
            "Excellent for compost bins or gardens",
            "High",
        ),
        compostable(
            "Banana Peel",
            (89, 98),
            "2-5 weeks",
            "Low - adds nutrients to soil",
            "Compost bin",
            "High",
        ),
        compostable(
            "Vegetable Scraps",
            (92, 99),
            "1-3 weeks",
            "Beneficial for soil when composted",
            "Compost bin or organic waste collection",
            "Very high",
        ),
        compostable(
            "Carrot Tops",
            (93, 99),
            "1-2 weeks",
            "Low - good for compost",
            "Compost bin or garden",
            "High",
        ),
        compostable(
            "Potato Peels",
            (91, 98),
            "1-4 weeks",
            "Low - good for compost",
            "Compost bin",
            "Moderate",
        ),
        residual(
            "Styrofoam",
            (90, 97),
            "500+ years",
            "High - persists in environment, harmful to wildlife",
            "General waste bin, check local specialized recycling",
        ),
        residual(
            "Plastic Bag",
            (88, 96),
            "10-20 years",
            "High - harmful to marine life and wildlife",
            "Reuse or return to grocery store collection",
        ),
        residual(
            "Disposable Diaper",
            (91, 98),
            "450-500 years",
            "High - contains plastics and human waste",
            "General waste bin",
        ),
        recyclable(
            "Plastic Bottle",
            (90, 98),
            false,
            "450 years",
            "High - can harm marine life if not recycled",
            "Clean and recycle in plastic recycling bin",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_catalog_has_fifteen_entries() {
        let catalog = WasteTypeCatalog::standard();
        assert_eq!(catalog.len(), 15);
        assert_eq!(catalog.lookup(14).name, "Plastic Bottle");
    }

    #[test]
    fn lookup_wraps_out_of_range_indices() {
        let catalog = WasteTypeCatalog::standard();
        assert_eq!(catalog.lookup(15), catalog.lookup(0));
        assert_eq!(catalog.lookup(31).name, catalog.lookup(1).name);
    }

    #[test]
    fn filter_selects_compostable_entries() {
        let catalog = WasteTypeCatalog::standard();
        let compostable = catalog.filter(|entry| {
            entry
                .details
                .composting
                .as_ref()
                .map(|c| c.suitable)
                .unwrap_or(false)
        });
        assert_eq!(compostable.len(), 7);
        assert!(compostable
            .iter()
            .all(|entry| entry.category == Category::Biodegradable));
    }

    #[test]
    fn empty_catalog_is_rejected() {
        assert!(WasteTypeCatalog::new(Vec::new()).is_err());
    }

    #[test]
    fn accuracy_ranges_are_well_formed() {
        for entry in WasteTypeCatalog::standard().entries() {
            assert!(entry.accuracy_range.min < entry.accuracy_range.max);
            assert!(entry.accuracy_range.max <= 100);
        }
    }
}
