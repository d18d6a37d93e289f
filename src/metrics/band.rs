use serde::{Deserialize, Serialize};

/// Whether a smaller or a larger value is preferable for a metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Directionality {
    LowerBetter,
    HigherBetter,
}

impl Directionality {
    /// True when `candidate` strictly beats `current`
    pub fn is_better(&self, candidate: f64, current: f64) -> bool {
        match self {
            Directionality::LowerBetter => candidate < current,
            Directionality::HigherBetter => candidate > current,
        }
    }

    pub fn cutoffs(&self) -> BandCutoffs {
        match self {
            Directionality::LowerBetter => BandCutoffs {
                good: 50.0,
                warning: 100.0,
            },
            Directionality::HigherBetter => BandCutoffs {
                good: 80.0,
                warning: 60.0,
            },
        }
    }

    pub fn arrow(&self) -> &'static str {
        match self {
            Directionality::LowerBetter => "↓",
            Directionality::HigherBetter => "↑",
        }
    }
}

/// Qualitative severity band, traffic-light style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Band {
    Good,
    Warning,
    Poor,
}

impl Band {
    pub fn label(&self) -> &'static str {
        match self {
            Band::Good => "good",
            Band::Warning => "warning",
            Band::Poor => "poor",
        }
    }
}

/// Thresholds separating good / warning / poor.
///
/// For lower-is-better metrics a value is good below `good` and a warning
/// below `warning`. For higher-is-better metrics (0-100 scale) it is good
/// above `good` and a warning above `warning`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BandCutoffs {
    pub good: f64,
    pub warning: f64,
}

/// Classify a value into a severity band.
pub fn band(value: f64, directionality: Directionality) -> Band {
    let cutoffs = directionality.cutoffs();
    match directionality {
        Directionality::LowerBetter => {
            if value < cutoffs.good {
                Band::Good
            } else if value < cutoffs.warning {
                Band::Warning
            } else {
                Band::Poor
            }
        }
        Directionality::HigherBetter => {
            if value > cutoffs.good {
                Band::Good
            } else if value > cutoffs.warning {
                Band::Warning
            } else {
                Band::Poor
            }
        }
    }
}
