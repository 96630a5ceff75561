use super::{
    COMPOSTED_CO2_PER_KG, ITEM_WEIGHT_KG, RECYCLED_CO2_PER_KG, RECYCLED_ENERGY_PER_KG,
    RECYCLED_WATER_PER_KG, TREE_CO2_PER_YEAR,
};
use crate::math::StatsHelper;
use crate::prelude::Category;
use serde::{Deserialize, Serialize};

/// Estimated environmental savings from sorted waste.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EcoImpactStats {
    /// kg of CO2 avoided
    pub co2_saved: f64,
    /// kg diverted from landfill
    pub landfill_reduction: f64,
    /// litres
    pub water_saved: f64,
    /// kWh
    pub energy_saved: f64,
    pub trees_equivalent: f64,
}

impl EcoImpactStats {
    /// Derives savings from the recyclable and biodegradable counts.
    pub fn from_counts(recyclable: u64, biodegradable: u64) -> Self {
        let recycled_kg = recyclable as f64 * ITEM_WEIGHT_KG;
        let composted_kg = biodegradable as f64 * ITEM_WEIGHT_KG;

        let co2_saved = recycled_kg * RECYCLED_CO2_PER_KG + composted_kg * COMPOSTED_CO2_PER_KG;
        let landfill_reduction = recycled_kg + composted_kg;
        let water_saved = recycled_kg * RECYCLED_WATER_PER_KG;
        let energy_saved = recycled_kg * RECYCLED_ENERGY_PER_KG;
        let trees_equivalent = co2_saved / TREE_CO2_PER_YEAR;

        Self {
            co2_saved: StatsHelper::round_to(co2_saved, 2),
            landfill_reduction: StatsHelper::round_to(landfill_reduction, 2),
            water_saved: water_saved.round(),
            energy_saved: StatsHelper::round_to(energy_saved, 2),
            trees_equivalent: StatsHelper::round_to(trees_equivalent, 1),
        }
    }
}

/// Unrounded savings attributed to a single item of `category`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ItemImpact {
    pub co2: f64,
    pub water: f64,
    pub energy: f64,
}

impl ItemImpact {
    pub fn for_category(category: &Category) -> Self {
        match category {
            Category::Recyclable => Self {
                co2: ITEM_WEIGHT_KG * RECYCLED_CO2_PER_KG,
                water: ITEM_WEIGHT_KG * RECYCLED_WATER_PER_KG,
                energy: ITEM_WEIGHT_KG * RECYCLED_ENERGY_PER_KG,
            },
            Category::Biodegradable => Self {
                co2: ITEM_WEIGHT_KG * COMPOSTED_CO2_PER_KG,
                ..Self::default()
            },
            Category::NonRecyclable | Category::Unknown(_) => Self::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_counts_yield_zero_impact() {
        assert_eq!(EcoImpactStats::from_counts(0, 0), EcoImpactStats::default());
    }

    #[test]
    fn ten_recyclables_save_five_kilograms_of_co2() {
        let impact = EcoImpactStats::from_counts(10, 0);
        assert_eq!(impact.co2_saved, 5.0);
        assert_eq!(impact.landfill_reduction, 2.0);
        assert_eq!(impact.water_saved, 2000.0);
        assert_eq!(impact.energy_saved, 10.0);
        assert_eq!(impact.trees_equivalent, 0.3);
    }

    #[test]
    fn seed_counts_round_to_expected_precision() {
        let impact = EcoImpactStats::from_counts(187, 112);
        assert_eq!(impact.co2_saved, 104.7);
        assert_eq!(impact.landfill_reduction, 59.8);
        assert_eq!(impact.water_saved, 37400.0);
        assert_eq!(impact.energy_saved, 187.0);
        assert_eq!(impact.trees_equivalent, 5.2);
    }

    #[test]
    fn item_impact_is_zero_for_residual_waste() {
        assert_eq!(
            ItemImpact::for_category(&Category::NonRecyclable),
            ItemImpact::default()
        );
        assert_eq!(ItemImpact::for_category(&Category::Biodegradable).water, 0.0);
    }
}
