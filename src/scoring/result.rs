use crate::assessment::{AssessmentRecord, MetalType, ProductionRoute};
use crate::metrics::Directionality;
use crate::recommend::Recommendation;
use serde::Serialize;

/// The pathway behind one column of a comparison
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathwaySummary {
    pub name: String,
    pub metal_type: MetalType,
    pub production_route: ProductionRoute,
}

impl From<&AssessmentRecord> for PathwaySummary {
    fn from(record: &AssessmentRecord) -> Self {
        Self {
            name: record.display_name(),
            metal_type: record.metal_type,
            production_route: record.production_route,
        }
    }
}

/// Per-metric outcome of a comparison
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricComparison {
    pub key: &'static str,
    pub label: &'static str,
    pub unit: &'static str,
    pub directionality: Directionality,
    /// One value per selected record, in input order (missing -> 0)
    pub values: Vec<f64>,
    pub best_index: usize,
    pub best_value: f64,
    /// Percent improvement over the baseline. `None` for the baseline
    /// itself and for every record when the baseline value is 0.
    pub improvements: Vec<Option<f64>>,
    /// Set when any record lacked this metric
    pub incomplete: bool,
}

impl MetricComparison {
    /// False when every record has the same value. Such a metric still
    /// reports `best_index` 0 but awards no win.
    pub fn is_decisive(&self) -> bool {
        self.values.iter().any(|&v| v != self.best_value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonResult {
    pub pathways: Vec<PathwaySummary>,
    pub metrics: Vec<MetricComparison>,
    /// Number of decisive metrics each record wins, in input order
    pub win_counts: Vec<usize>,
    pub overall_best: usize,
    pub recommendation: Recommendation,
}

impl ComparisonResult {
    pub fn metric(&self, key: &str) -> Option<&MetricComparison> {
        self.metrics.iter().find(|m| m.key == key)
    }

    pub fn best_pathway(&self) -> &PathwaySummary {
        &self.pathways[self.overall_best]
    }

    pub fn has_incomplete(&self) -> bool {
        self.metrics.iter().any(|m| m.incomplete)
    }
}
