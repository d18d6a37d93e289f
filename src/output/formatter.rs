use std::io::IsTerminal;
use chrono::Duration;
use owo_colors::OwoColorize;
use terminal_size::{Width, terminal_size};

use crate::assessment::{quality_report, AssessmentRecord};
use crate::history::History;
use crate::metrics::{
    circularity_rating, sustainability_rating, Band, CARBON_FOOTPRINT, CIRCULARITY_INDEX,
    SUSTAINABILITY_SCORE, TRACKED_METRICS,
};
use crate::recommend::record_advisories;
use crate::scoring::{ComparisonResult, DashboardStats};

const METRIC_WIDTH: usize = 24;
const CELL_WIDTH: usize = 22;

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Format a metric value compactly (612.5, 12.3k, 1.2M)
pub fn format_value(value: f64) -> String {
    let abs = value.abs();
    let formatted = if abs >= 1_000_000.0 {
        format!("{:.1}M", value / 1_000_000.0)
    } else if abs >= 10_000.0 {
        format!("{:.1}k", value / 1_000.0)
    } else {
        format!("{:.1}", value)
    };

    // Trim trailing .0 (e.g., "40.0" -> "40", "1.0M" -> "1M")
    formatted
        .replace(".0M", "M")
        .replace(".0k", "k")
        .trim_end_matches(".0")
        .to_string()
}

/// "+12.5%", "-3.0%", or "n/a" when no improvement was computed
pub fn format_improvement(improvement: Option<f64>) -> String {
    match improvement {
        Some(pct) => format!("{:+.1}%", pct),
        None => "n/a".to_string(),
    }
}

fn paint(text: &str, band: Band, use_colors: bool) -> String {
    if !use_colors {
        return text.to_string();
    }
    match band {
        Band::Good => text.green().to_string(),
        Band::Warning => text.yellow().to_string(),
        Band::Poor => text.red().to_string(),
    }
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate a name to fit available width, accounting for Unicode
fn truncate_name(name: &str, max_width: usize) -> String {
    let chars: Vec<char> = name.chars().collect();
    if chars.len() <= max_width {
        name.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

/// Format a comparison as a metric-by-pathway table followed by win
/// counts and recommendations.
///
/// The best cell per metric is marked with `*`; metrics missing from any
/// pathway are marked with `?`.
pub fn format_comparison_table(result: &ComparisonResult, use_colors: bool) -> String {
    let mut lines = Vec::new();

    let mut header = format!("{:<width$}", "Metric", width = METRIC_WIDTH);
    for (i, pathway) in result.pathways.iter().enumerate() {
        let title = format!("{}. {}", i + 1, pathway.name);
        header.push_str(&format!(
            "{:<width$}",
            truncate_name(&title, CELL_WIDTH - 1),
            width = CELL_WIDTH
        ));
    }
    lines.push(if use_colors {
        header.trim_end().bold().to_string()
    } else {
        header.trim_end().to_string()
    });

    for metric in &result.metrics {
        let definition = TRACKED_METRICS.iter().find(|m| m.key == metric.key);
        let marker = if metric.incomplete { "?" } else { "" };
        let label = format!(
            "{} {}{}",
            metric.label,
            metric.directionality.arrow(),
            marker
        );
        let mut row = format!("{:<width$}", label, width = METRIC_WIDTH);

        for (i, value) in metric.values.iter().enumerate() {
            let best = if i == metric.best_index { "*" } else { "" };
            let cell = if i == 0 {
                format!("{}{}", format_value(*value), best)
            } else {
                format!(
                    "{}{} ({})",
                    format_value(*value),
                    best,
                    format_improvement(metric.improvements[i])
                )
            };
            let padded = format!("{:<width$}", cell, width = CELL_WIDTH);
            match definition {
                Some(d) => row.push_str(&paint(&padded, d.band(*value), use_colors)),
                None => row.push_str(&padded),
            }
        }
        lines.push(row.trim_end().to_string());
    }

    lines.push(String::new());
    let wins = result
        .pathways
        .iter()
        .zip(&result.win_counts)
        .enumerate()
        .map(|(i, (p, w))| format!("{}. {} ({})", i + 1, p.name, w))
        .collect::<Vec<_>>()
        .join(", ");
    lines.push(format!("Wins: {}", wins));
    if result.has_incomplete() {
        lines.push("? = missing from at least one pathway, ranked as 0".to_string());
    }

    lines.push(String::new());
    let summary = &result.recommendation.summary;
    lines.push(if use_colors {
        summary.bold().to_string()
    } else {
        summary.clone()
    });
    for advisory in &result.recommendation.advisories {
        lines.push(format!("  - {}", advisory));
    }

    lines.join("\n")
}

/// Format a comparison as tab-separated values for scripting
/// Columns: metric key, one value per pathway, best index (1-based), incomplete
pub fn format_comparison_tsv(result: &ComparisonResult) -> String {
    result
        .metrics
        .iter()
        .map(|metric| {
            let values = metric
                .values
                .iter()
                .map(|v| v.to_string())
                .collect::<Vec<_>>()
                .join("\t");
            format!(
                "{}\t{}\t{}\t{}",
                metric.key,
                values,
                metric.best_index + 1,
                metric.incomplete
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format the history as one line per record, newest first
/// Format: "{index}. {age}  {name}  {carbon}  {sustainability}"
pub fn format_history_table(history: &History, use_colors: bool) -> String {
    if history.is_empty() {
        return "No assessments in history.".to_string();
    }

    let name_width = match get_terminal_width() {
        Some(width) if width > 60 => (width - 40).min(40),
        Some(_) => 20,
        None => 40,
    };

    history
        .iter()
        .enumerate()
        .map(|(idx, record)| {
            let index_str = format!("{:>2}.", idx + 1);
            let age = format!("{:>4}", format_age(record.age()));
            let name = format!(
                "{:<width$}",
                truncate_name(&record.display_name(), name_width),
                width = name_width
            );
            let carbon = metric_cell(record, CARBON_FOOTPRINT, use_colors);
            let score = metric_cell(record, SUSTAINABILITY_SCORE, use_colors);

            if use_colors {
                format!("{} {}  {}  {}  {}", index_str.dimmed(), age.dimmed(), name, carbon, score)
            } else {
                format!("{} {}  {}  {}  {}", index_str, age, name, carbon, score)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn metric_cell(record: &AssessmentRecord, key: &str, use_colors: bool) -> String {
    let definition = TRACKED_METRICS.iter().find(|m| m.key == key);
    match (record.metric(key), definition) {
        (Some(value), Some(d)) => {
            let cell = format!("{:>8}", format_value(value));
            paint(&cell, d.band(value), use_colors)
        }
        _ => format!("{:>8}", "-"),
    }
}

/// Format history as tab-separated values for scripting
/// Columns: index, created_at, metal, route, carbon, sustainability (no headers)
pub fn format_history_tsv(history: &History) -> String {
    history
        .iter()
        .enumerate()
        .map(|(idx, record)| {
            let value = |key| {
                record
                    .metric(key)
                    .map(|v| v.to_string())
                    .unwrap_or_default()
            };
            format!(
                "{}\t{}\t{}\t{}\t{}\t{}",
                idx + 1,
                record.created_at.to_rfc3339(),
                record.metal_type.label().to_lowercase(),
                record.production_route,
                value(CARBON_FOOTPRINT),
                value(SUSTAINABILITY_SCORE)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format dashboard averages, one statistic per line
pub fn format_stats(stats: &DashboardStats) -> String {
    format!(
        "Assessments: {}\n\
         Avg carbon footprint: {} kg CO2-eq\n\
         Avg energy consumption: {} MJ\n\
         Avg sustainability score: {} ({})\n\
         Avg circularity index: {}% ({})",
        stats.total_assessments,
        format_value(stats.average_carbon_footprint),
        format_value(stats.average_energy_consumption),
        format_value(stats.average_sustainability_score),
        sustainability_rating(stats.average_sustainability_score),
        format_value(stats.average_circularity_index),
        circularity_rating(stats.average_circularity_index),
    )
}

/// Format a single record with every tracked metric, its band, ratings
/// and suggestions
pub fn format_record_detail(record: &AssessmentRecord, use_colors: bool) -> String {
    let mut lines = Vec::new();
    let title = record.display_name();
    lines.push(if use_colors {
        title.bold().to_string()
    } else {
        title
    });
    lines.push(format!(
        "  Pathway: {} ({})",
        record.metal_type, record.production_route
    ));
    lines.push(format!("  Quantity: {} kg", format_value(record.quantity)));
    lines.push(format!("  Assessed: {} ago", format_age(record.age())));
    lines.push(String::new());

    for metric in &TRACKED_METRICS {
        let line = match record.metric(metric.key) {
            Some(value) => {
                let band = metric.band(value);
                let text = format!(
                    "{} {} ({})",
                    format_value(value),
                    metric.unit,
                    band.label()
                );
                format!("  {:<22}{}", metric.label, paint(&text, band, use_colors))
            }
            None => format!("  {:<22}missing", metric.label),
        };
        lines.push(line);
    }

    let mut ratings = Vec::new();
    if let Some(score) = record.metric(SUSTAINABILITY_SCORE) {
        ratings.push(format!("Sustainability: {}", sustainability_rating(score)));
    }
    if let Some(index) = record.metric(CIRCULARITY_INDEX) {
        ratings.push(format!("Circularity: {}", circularity_rating(index)));
    }
    if !ratings.is_empty() {
        lines.push(String::new());
        lines.push(format!("  {}", ratings.join(" | ")));
    }

    let quality = quality_report(record);
    lines.push(String::new());
    lines.push(format!(
        "  Data completeness: {}%",
        format_value(quality.completeness_score)
    ));
    for (indicator, recommendation) in quality.indicators.iter().zip(&quality.recommendations) {
        let warning = format!("! {}", indicator);
        if use_colors {
            lines.push(format!("    {}", warning.yellow()));
        } else {
            lines.push(format!("    {}", warning));
        }
        lines.push(format!("      {}", recommendation));
    }

    let advice = record_advisories(record);
    if !advice.is_empty() {
        lines.push(String::new());
        lines.push("  Suggestions:".to_string());
        for item in advice {
            lines.push(format!("    - {}", item));
        }
    }

    lines.join("\n")
}

/// Format a duration into a human-readable age string
/// "2h" for hours, "3d" for days, "1w" for weeks
pub fn format_age(duration: Duration) -> String {
    let hours = duration.num_hours();
    let days = duration.num_days();
    let weeks = days / 7;

    if weeks >= 1 {
        format!("{}w", weeks)
    } else if days >= 1 {
        format!("{}d", days)
    } else if hours >= 1 {
        format!("{}h", hours)
    } else {
        let minutes = duration.num_minutes();
        if minutes >= 1 {
            format!("{}m", minutes)
        } else {
            "now".to_string()
        }
    }
}
