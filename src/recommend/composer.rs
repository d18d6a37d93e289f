use crate::metrics::TRACKED_METRICS;
use crate::scoring::ComparisonResult;
use serde::Serialize;

/// Advice emitted with every comparison, in this order
pub const GENERAL_ADVISORIES: [&str; 5] = [
    "Improve circularity by increasing the share of recycled content in feedstock.",
    "Reduce energy-related emissions by sourcing renewable electricity.",
    "Conserve water through closed-loop cooling and process water recycling.",
    "Cut process waste by recovering scrap and by-products on site.",
    "Design products for disassembly to raise end-of-life recovery rates.",
];

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Recommendation {
    pub advisories: Vec<String>,
    /// One sentence naming the overall best pathway
    pub summary: String,
}

/// Build the guidance text for a finished comparison.
pub fn compose(result: &ComparisonResult) -> Recommendation {
    let advisories = GENERAL_ADVISORIES.iter().map(|s| s.to_string()).collect();

    let best = &result.pathways[result.overall_best];
    let wins = result.win_counts[result.overall_best];
    let pair = format!("{} ({})", best.metal_type, best.production_route);
    let pathway = if best.name == pair {
        pair
    } else {
        format!(
            "{} ({}, {} route)",
            best.name, best.metal_type, best.production_route
        )
    };
    let summary = format!(
        "{} performs best, leading on {} of {} metrics.",
        pathway,
        wins,
        TRACKED_METRICS.len()
    );

    Recommendation {
        advisories,
        summary,
    }
}
