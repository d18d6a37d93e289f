use super::types::{AssessmentRecord, ProductionRoute};
use serde::Serialize;

/// Completeness below this percentage is flagged
pub const MIN_COMPLETENESS: f64 = 70.0;

/// Recycled-route records should carry at least this recycled content
pub const MIN_RECYCLED_CONTENT: f64 = 0.5;

/// metal_type, production_route, quantity plus the seven input parameters
const TRACKED_FIELDS: usize = 10;

/// How much of a record's input was given rather than filled in by the
/// predictor, with consistency warnings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QualityReport {
    /// Percentage of input fields provided (0-100, two decimals)
    pub completeness_score: f64,
    pub indicators: Vec<String>,
    pub recommendations: Vec<String>,
}

fn provided_fields(record: &AssessmentRecord) -> usize {
    let p = &record.parameters;
    // metal_type, production_route and quantity are always present
    let optional = [
        p.recycled_content.is_some(),
        p.energy_consumption.is_some(),
        p.electricity_source.is_some(),
        p.transport_distance.is_some(),
        p.waste_generation.is_some(),
        p.end_of_life.is_some(),
        p.process_temperature.is_some(),
    ];
    3 + optional.iter().filter(|given| **given).count()
}

/// Build the data-quality report for one record.
pub fn quality_report(record: &AssessmentRecord) -> QualityReport {
    let ratio = provided_fields(record) as f64 / TRACKED_FIELDS as f64;
    let completeness_score = (ratio * 10_000.0).round() / 100.0;

    let mut indicators = Vec::new();
    let mut recommendations = Vec::new();

    if completeness_score < MIN_COMPLETENESS {
        indicators.push("Low data completeness".to_string());
        recommendations.push("Provide more detailed input data for better accuracy".to_string());
    }

    if record.production_route == ProductionRoute::Recycled {
        if let Some(content) = record.parameters.recycled_content {
            if content < MIN_RECYCLED_CONTENT {
                indicators.push("Low recycled content for recycled route".to_string());
                recommendations.push(
                    "Increase recycled content ratio for recycled production route".to_string(),
                );
            }
        }
    }

    QualityReport {
        completeness_score,
        indicators,
        recommendations,
    }
}
