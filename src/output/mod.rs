pub mod formatter;

pub use formatter::{
    format_age, format_comparison_table, format_comparison_tsv, format_history_table,
    format_history_tsv, format_improvement, format_record_detail, format_stats, format_value,
    should_use_colors,
};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// How command output is rendered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Aligned, colored tables for humans
    #[default]
    Table,
    /// Tab-separated values for scripting
    Tsv,
    /// Pretty-printed JSON
    Json,
}

/// Serialize any result as pretty JSON
pub fn format_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).context("Failed to serialize output as JSON")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::DashboardStats;

    #[test]
    fn test_format_json_stats() {
        let json = format_json(&DashboardStats::default()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["total_assessments"], 0);
        assert_eq!(value["average_carbon_footprint"], 0.0);
    }

    #[test]
    fn test_output_format_names() {
        assert_eq!(serde_json::to_string(&OutputFormat::Tsv).unwrap(), "\"tsv\"");
        assert_eq!(OutputFormat::default(), OutputFormat::Table);
    }
}
