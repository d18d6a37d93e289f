use super::band::{band, Band, BandCutoffs, Directionality};
use serde::Serialize;

pub const CARBON_FOOTPRINT: &str = "carbon_footprint";
pub const ENERGY_CONSUMPTION: &str = "energy_consumption";
pub const WATER_USAGE: &str = "water_usage";
pub const WASTE_GENERATION: &str = "waste_generation";
pub const SUSTAINABILITY_SCORE: &str = "sustainability_score";
pub const CIRCULARITY_INDEX: &str = "circularity_index";
pub const MATERIAL_EFFICIENCY: &str = "material_efficiency";
pub const RECYCLING_POTENTIAL: &str = "recycling_potential";

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetricDefinition {
    pub key: &'static str,
    pub label: &'static str,
    pub unit: &'static str,
    pub directionality: Directionality,
}

impl MetricDefinition {
    const fn lower(key: &'static str, label: &'static str, unit: &'static str) -> Self {
        Self {
            key,
            label,
            unit,
            directionality: Directionality::LowerBetter,
        }
    }

    const fn higher(key: &'static str, label: &'static str, unit: &'static str) -> Self {
        Self {
            key,
            label,
            unit,
            directionality: Directionality::HigherBetter,
        }
    }

    pub fn cutoffs(&self) -> BandCutoffs {
        self.directionality.cutoffs()
    }

    pub fn band(&self, value: f64) -> Band {
        band(value, self.directionality)
    }
}

/// Every metric the comparison ranks, in display order.
pub const TRACKED_METRICS: [MetricDefinition; 8] = [
    MetricDefinition::lower(CARBON_FOOTPRINT, "Carbon Footprint", "kg CO2-eq"),
    MetricDefinition::lower(ENERGY_CONSUMPTION, "Energy Consumption", "MJ"),
    MetricDefinition::lower(WATER_USAGE, "Water Usage", "L"),
    MetricDefinition::lower(WASTE_GENERATION, "Waste Generation", "kg"),
    MetricDefinition::higher(SUSTAINABILITY_SCORE, "Sustainability Score", "score"),
    MetricDefinition::higher(CIRCULARITY_INDEX, "Circularity Index", "%"),
    MetricDefinition::higher(MATERIAL_EFFICIENCY, "Material Efficiency", "%"),
    MetricDefinition::higher(RECYCLING_POTENTIAL, "Recycling Potential", "%"),
];

/// Metrics averaged for the dashboard
pub const DASHBOARD_METRICS: [&str; 4] = [
    CARBON_FOOTPRINT,
    ENERGY_CONSUMPTION,
    SUSTAINABILITY_SCORE,
    CIRCULARITY_INDEX,
];

pub fn definition(key: &str) -> Option<&'static MetricDefinition> {
    TRACKED_METRICS.iter().find(|m| m.key == key)
}

/// Qualitative rating of a 0-100 sustainability score
pub fn sustainability_rating(score: f64) -> &'static str {
    if score >= 80.0 {
        "Excellent"
    } else if score >= 60.0 {
        "Good"
    } else if score >= 40.0 {
        "Fair"
    } else {
        "Poor"
    }
}

/// Qualitative rating of a 0-100 circularity index
pub fn circularity_rating(index: f64) -> &'static str {
    if index >= 80.0 {
        "Highly Circular"
    } else if index >= 60.0 {
        "Moderately Circular"
    } else if index >= 40.0 {
        "Somewhat Circular"
    } else {
        "Linear"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directionality_table() {
        let lower = [CARBON_FOOTPRINT, ENERGY_CONSUMPTION, WATER_USAGE, WASTE_GENERATION];
        let higher = [
            SUSTAINABILITY_SCORE,
            CIRCULARITY_INDEX,
            MATERIAL_EFFICIENCY,
            RECYCLING_POTENTIAL,
        ];
        for key in lower {
            assert_eq!(
                definition(key).unwrap().directionality,
                Directionality::LowerBetter,
                "{}",
                key
            );
        }
        for key in higher {
            assert_eq!(
                definition(key).unwrap().directionality,
                Directionality::HigherBetter,
                "{}",
                key
            );
        }
    }

    #[test]
    fn test_unknown_metric() {
        assert!(definition("ozone_depletion").is_none());
    }

    #[test]
    fn test_dashboard_metrics_are_tracked() {
        for key in DASHBOARD_METRICS {
            assert!(definition(key).is_some(), "{} not tracked", key);
        }
    }

    #[test]
    fn test_definition_band_matches_free_function() {
        let carbon = definition(CARBON_FOOTPRINT).unwrap();
        assert_eq!(carbon.band(75.0), band(75.0, Directionality::LowerBetter));
        assert_eq!(carbon.cutoffs().good, 50.0);
    }

    #[test]
    fn test_ratings() {
        assert_eq!(sustainability_rating(85.0), "Excellent");
        assert_eq!(sustainability_rating(60.0), "Good");
        assert_eq!(sustainability_rating(45.0), "Fair");
        assert_eq!(sustainability_rating(10.0), "Poor");
        assert_eq!(circularity_rating(80.0), "Highly Circular");
        assert_eq!(circularity_rating(65.0), "Moderately Circular");
        assert_eq!(circularity_rating(40.0), "Somewhat Circular");
        assert_eq!(circularity_rating(39.9), "Linear");
    }
}
