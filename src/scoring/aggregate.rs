use crate::assessment::AssessmentRecord;
use crate::metrics::DASHBOARD_METRICS;
use serde::Serialize;

/// Averages of the dashboard metrics over the whole history.
///
/// All fields are zero for an empty history.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DashboardStats {
    pub total_assessments: usize,
    pub average_carbon_footprint: f64,
    pub average_energy_consumption: f64,
    pub average_sustainability_score: f64,
    pub average_circularity_index: f64,
}

/// Compute dashboard averages. A record missing a metric adds nothing to
/// that metric's sum but still counts toward the divisor.
///
/// Recomputed from scratch on every call; the history is small.
pub fn aggregate<'a, I>(history: I) -> DashboardStats
where
    I: IntoIterator<Item = &'a AssessmentRecord>,
{
    let mut count = 0usize;
    // Same order as DASHBOARD_METRICS
    let mut sums = [0.0f64; DASHBOARD_METRICS.len()];

    for record in history {
        count += 1;
        for (sum, key) in sums.iter_mut().zip(DASHBOARD_METRICS) {
            *sum += record.metric(key).unwrap_or(0.0);
        }
    }

    if count == 0 {
        return DashboardStats::default();
    }

    let mean = |sum: f64| sum / count as f64;
    DashboardStats {
        total_assessments: count,
        average_carbon_footprint: mean(sums[0]),
        average_energy_consumption: mean(sums[1]),
        average_sustainability_score: mean(sums[2]),
        average_circularity_index: mean(sums[3]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::{AssessmentInput, InputParameters, MetalType, ProductionRoute};
    use crate::metrics::{
        CARBON_FOOTPRINT, CIRCULARITY_INDEX, ENERGY_CONSUMPTION, SUSTAINABILITY_SCORE, WATER_USAGE,
    };
    use std::collections::BTreeMap;

    fn record_with(results: &[(&str, f64)]) -> AssessmentRecord {
        let input = AssessmentInput {
            name: None,
            metal_type: MetalType::Steel,
            production_route: ProductionRoute::Recycled,
            quantity: 100.0,
            parameters: InputParameters::default(),
        };
        AssessmentRecord::from_input(
            input,
            results.iter().map(|(k, v)| (k.to_string(), *v)).collect::<BTreeMap<_, _>>(),
        )
    }

    #[test]
    fn test_empty_history_is_all_zero() {
        let history: Vec<AssessmentRecord> = Vec::new();
        let stats = aggregate(&history);
        assert_eq!(stats, DashboardStats::default());
        assert_eq!(stats.total_assessments, 0);
        assert_eq!(stats.average_carbon_footprint, 0.0);
        assert_eq!(stats.average_sustainability_score, 0.0);
    }

    #[test]
    fn test_means() {
        let history = vec![
            record_with(&[
                (CARBON_FOOTPRINT, 100.0),
                (ENERGY_CONSUMPTION, 400.0),
                (SUSTAINABILITY_SCORE, 80.0),
                (CIRCULARITY_INDEX, 50.0),
            ]),
            record_with(&[
                (CARBON_FOOTPRINT, 50.0),
                (ENERGY_CONSUMPTION, 200.0),
                (SUSTAINABILITY_SCORE, 60.0),
                (CIRCULARITY_INDEX, 70.0),
            ]),
        ];
        let stats = aggregate(&history);
        assert_eq!(stats.total_assessments, 2);
        assert_eq!(stats.average_carbon_footprint, 75.0);
        assert_eq!(stats.average_energy_consumption, 300.0);
        assert_eq!(stats.average_sustainability_score, 70.0);
        assert_eq!(stats.average_circularity_index, 60.0);
    }

    #[test]
    fn test_missing_metric_still_counts_record() {
        let history = vec![
            record_with(&[(CARBON_FOOTPRINT, 90.0)]),
            record_with(&[(SUSTAINABILITY_SCORE, 40.0)]),
            record_with(&[(CARBON_FOOTPRINT, 30.0)]),
        ];
        let stats = aggregate(&history);
        assert_eq!(stats.total_assessments, 3);
        assert_eq!(stats.average_carbon_footprint, 40.0);
        assert!((stats.average_sustainability_score - 40.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_order_does_not_matter() {
        let a = record_with(&[(CARBON_FOOTPRINT, 10.0)]);
        let b = record_with(&[(CARBON_FOOTPRINT, 20.0)]);
        let forward = aggregate([&a, &b]);
        let backward = aggregate([&b, &a]);
        assert_eq!(forward, backward);
    }

    #[test]
    fn test_non_dashboard_metrics_ignored() {
        let history = vec![record_with(&[(WATER_USAGE, 500.0), (CIRCULARITY_INDEX, 30.0)])];
        let stats = aggregate(&history);
        assert_eq!(stats.average_carbon_footprint, 0.0);
        assert_eq!(stats.average_energy_consumption, 0.0);
        assert_eq!(stats.average_sustainability_score, 0.0);
        assert_eq!(stats.average_circularity_index, 30.0);
    }
}
