use crate::assessment::AssessmentRecord;
use crate::metrics::{CARBON_FOOTPRINT, CIRCULARITY_INDEX, ENERGY_CONSUMPTION, MATERIAL_EFFICIENCY};

const MAX_RECORD_ADVISORIES: usize = 3;

/// Threshold rules checked against a single record, in priority order.
/// `(metric, triggers when value is above?, threshold, advice)`
const RULES: [(&str, bool, f64, &str); 4] = [
    (
        CARBON_FOOTPRINT,
        true,
        1000.0,
        "Consider switching to renewable energy sources to reduce carbon footprint",
    ),
    (
        ENERGY_CONSUMPTION,
        true,
        5000.0,
        "Implement energy efficiency measures in production processes",
    ),
    (
        CIRCULARITY_INDEX,
        false,
        50.0,
        "Increase recycling and circular economy practices",
    ),
    (
        MATERIAL_EFFICIENCY,
        false,
        70.0,
        "Optimize material usage to reduce waste",
    ),
];

/// Suggestions for one assessed pathway, at most three. Metrics the record
/// lacks are skipped rather than treated as zero.
pub fn record_advisories(record: &AssessmentRecord) -> Vec<String> {
    RULES
        .iter()
        .filter(|(key, above, threshold, _)| match record.metric(key) {
            Some(value) if *above => value > *threshold,
            Some(value) => value < *threshold,
            None => false,
        })
        .take(MAX_RECORD_ADVISORIES)
        .map(|(_, _, _, advice)| advice.to_string())
        .collect()
}
