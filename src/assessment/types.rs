use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetalType {
    Aluminum,
    Copper,
    Steel,
    Lithium,
}

impl MetalType {
    pub const ALL: [MetalType; 4] = [
        MetalType::Aluminum,
        MetalType::Copper,
        MetalType::Steel,
        MetalType::Lithium,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            MetalType::Aluminum => "Aluminum",
            MetalType::Copper => "Copper",
            MetalType::Steel => "Steel",
            MetalType::Lithium => "Lithium",
        }
    }

    /// Parse a case-insensitive metal name ("aluminium" is accepted too)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "aluminum" | "aluminium" => Some(MetalType::Aluminum),
            "copper" => Some(MetalType::Copper),
            "steel" => Some(MetalType::Steel),
            "lithium" => Some(MetalType::Lithium),
            _ => None,
        }
    }
}

impl fmt::Display for MetalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductionRoute {
    Primary,
    Recycled,
    Mixed,
}

impl ProductionRoute {
    pub const ALL: [ProductionRoute; 3] = [
        ProductionRoute::Primary,
        ProductionRoute::Recycled,
        ProductionRoute::Mixed,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ProductionRoute::Primary => "primary",
            ProductionRoute::Recycled => "recycled",
            ProductionRoute::Mixed => "mixed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "primary" => Some(ProductionRoute::Primary),
            "recycled" => Some(ProductionRoute::Recycled),
            "mixed" => Some(ProductionRoute::Mixed),
            _ => None,
        }
    }
}

impl fmt::Display for ProductionRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndOfLife {
    Recycling,
    Reuse,
    Landfill,
    Incineration,
}

impl EndOfLife {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "recycling" => Some(EndOfLife::Recycling),
            "reuse" => Some(EndOfLife::Reuse),
            "landfill" => Some(EndOfLife::Landfill),
            "incineration" => Some(EndOfLife::Incineration),
            _ => None,
        }
    }
}

/// Sparse process parameters. Anything left out is filled in by the
/// external predictor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InputParameters {
    /// Recycled content as a ratio (0.0 - 1.0)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recycled_content: Option<f64>,

    /// Process energy in MJ
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub energy_consumption: Option<f64>,

    /// e.g. "grid_mix", "renewable", "coal"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub electricity_source: Option<String>,

    /// Transport distance in km
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transport_distance: Option<f64>,

    /// Process waste in kg
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub waste_generation: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_of_life: Option<EndOfLife>,

    /// Process temperature in °C
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub process_temperature: Option<f64>,
}

/// A pathway description before the predictor has filled in its results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub metal_type: MetalType,
    pub production_route: ProductionRoute,
    /// Quantity in kg
    pub quantity: f64,
    #[serde(default)]
    pub parameters: InputParameters,
}

/// One evaluated pathway together with its predicted metrics.
///
/// Records are never modified once created; the history only appends and
/// evicts them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub metal_type: MetalType,
    pub production_route: ProductionRoute,
    pub quantity: f64,
    #[serde(default)]
    pub parameters: InputParameters,
    /// Metric key -> value, as returned by the predictor
    #[serde(default, deserialize_with = "numeric_results")]
    pub results: BTreeMap<String, f64>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl AssessmentRecord {
    /// Combine an input with the results returned for it.
    pub fn from_input(input: AssessmentInput, results: BTreeMap<String, f64>) -> Self {
        Self {
            name: input.name,
            metal_type: input.metal_type,
            production_route: input.production_route,
            quantity: input.quantity,
            parameters: input.parameters,
            results,
            created_at: Utc::now(),
        }
    }

    /// Look up a metric value. Non-finite values count as absent.
    pub fn metric(&self, key: &str) -> Option<f64> {
        self.results.get(key).copied().filter(|v| v.is_finite())
    }

    /// The record's name, or "Metal (route)" when unnamed
    pub fn display_name(&self) -> String {
        match &self.name {
            Some(name) if !name.trim().is_empty() => name.clone(),
            _ => format!("{} ({})", self.metal_type, self.production_route),
        }
    }

    /// Time elapsed since the record was created
    pub fn age(&self) -> chrono::Duration {
        Utc::now() - self.created_at
    }
}

/// Keep only numeric entries from a predictor's result object. Nested
/// breakdowns (e.g. `environmental_impact`) are dropped.
fn numeric_results<'de, D>(deserializer: D) -> Result<BTreeMap<String, f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: BTreeMap<String, serde_json::Value> = BTreeMap::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .filter_map(|(key, value)| value.as_f64().map(|v| (key, v)))
        .collect())
}
