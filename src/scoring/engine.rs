use super::error::InputError;
use super::result::{ComparisonResult, MetricComparison, PathwaySummary};
use crate::assessment::AssessmentRecord;
use crate::metrics::{Directionality, MetricDefinition, CARBON_FOOTPRINT, TRACKED_METRICS};
use crate::recommend::{compose, Recommendation};
use tracing::debug;

pub const MIN_SELECTION: usize = 2;
pub const MAX_SELECTION: usize = 4;

/// Compare 2-4 scored records. The first record is the baseline for
/// improvement percentages.
pub fn compare(records: &[AssessmentRecord]) -> Result<ComparisonResult, InputError> {
    if !(MIN_SELECTION..=MAX_SELECTION).contains(&records.len()) {
        return Err(InputError::SelectionSize {
            count: records.len(),
            min: MIN_SELECTION,
            max: MAX_SELECTION,
        });
    }
    if let Some((index, record)) = records
        .iter()
        .enumerate()
        .find(|(_, r)| r.results.is_empty())
    {
        return Err(InputError::EmptyResults {
            index,
            name: record.display_name(),
        });
    }

    let metrics: Vec<MetricComparison> = TRACKED_METRICS
        .iter()
        .map(|definition| compare_metric(definition, records))
        .collect();

    // Win count per record; a metric every record ties on is nobody's win
    let mut win_counts = vec![0usize; records.len()];
    for metric in metrics.iter().filter(|m| m.is_decisive()) {
        win_counts[metric.best_index] += 1;
    }

    let overall_best = pick_overall_best(&win_counts, &metrics);

    let mut result = ComparisonResult {
        pathways: records.iter().map(PathwaySummary::from).collect(),
        metrics,
        win_counts,
        overall_best,
        recommendation: Recommendation::default(),
    };
    result.recommendation = compose(&result);

    Ok(result)
}

fn compare_metric(definition: &MetricDefinition, records: &[AssessmentRecord]) -> MetricComparison {
    let mut incomplete = false;
    let values: Vec<f64> = records
        .iter()
        .map(|record| match record.metric(definition.key) {
            Some(v) => v,
            None => {
                incomplete = true;
                0.0
            }
        })
        .collect();

    if incomplete {
        debug!(metric = definition.key, "metric missing from at least one record");
    }

    // First record to reach the best value wins
    let mut best_index = 0;
    for (i, &value) in values.iter().enumerate().skip(1) {
        if definition.directionality.is_better(value, values[best_index]) {
            best_index = i;
        }
    }

    let improvements = improvements(&values, definition.directionality);

    MetricComparison {
        key: definition.key,
        label: definition.label,
        unit: definition.unit,
        directionality: definition.directionality,
        best_value: values[best_index],
        best_index,
        values,
        improvements,
        incomplete,
    }
}

/// Percent improvement of each record over `values[0]`. A positive number
/// always means better than the baseline.
fn improvements(values: &[f64], directionality: Directionality) -> Vec<Option<f64>> {
    let baseline = values[0];
    if baseline == 0.0 {
        return vec![None; values.len()];
    }

    values
        .iter()
        .enumerate()
        .map(|(i, &value)| {
            if i == 0 {
                return None;
            }
            let delta = match directionality {
                Directionality::LowerBetter => baseline - value,
                Directionality::HigherBetter => value - baseline,
            };
            Some(delta / baseline.abs() * 100.0)
        })
        .collect()
}

/// Highest win count; ties go to the lower carbon footprint, then to the
/// lower input index.
fn pick_overall_best(win_counts: &[usize], metrics: &[MetricComparison]) -> usize {
    let carbon = metrics
        .iter()
        .find(|m| m.key == CARBON_FOOTPRINT)
        .map(|m| m.values.as_slice())
        .unwrap_or(&[]);
    let carbon_at = |i: usize| carbon.get(i).copied().unwrap_or(0.0);

    let mut best = 0;
    for i in 1..win_counts.len() {
        if win_counts[i] > win_counts[best] {
            best = i;
        } else if win_counts[i] == win_counts[best] && carbon_at(i) < carbon_at(best) {
            debug!(
                winner = i,
                runner_up = best,
                "win count tie broken by carbon footprint"
            );
            best = i;
        }
    }
    best
}
