use clap::{Parser, Subcommand};
use lca_rank::assessment::AssessmentRecord;
use lca_rank::history::History;
use lca_rank::output::OutputFormat;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const EXIT_SUCCESS: i32 = 0;
const EXIT_INPUT: i32 = 1;
const EXIT_IO: i32 = 2;
const EXIT_CONFIG: i32 = 4;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compare 2-4 assessments side by side and rank them
    Compare {
        /// History indices to compare (1-based, as shown by `history`)
        indices: Vec<usize>,

        /// Read the records from a JSON file instead of the history
        #[arg(short, long, conflicts_with = "indices")]
        file: Option<PathBuf>,
    },
    /// Dashboard averages over the history (default if no subcommand)
    Stats,
    /// Add predictor output (one record or an array) to the history
    Add {
        /// JSON file holding the evaluated assessment(s)
        file: PathBuf,
    },
    /// List the assessments in the history, newest first
    History,
    /// Show one assessment with its metric bands and suggestions
    Show {
        /// Index number of the assessment (1-based, as shown by `history`)
        index: usize,
    },
    /// Describe a new pathway interactively and emit it as JSON
    New {
        /// Write the input to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Remove every assessment from the history
    Clear,
}

#[derive(Parser, Debug)]
#[command(name = "lca-rank")]
#[command(about = "Compare metal production pathways by life-cycle metrics", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/lca-rank/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Output format (defaults to the config value, then table)
    #[arg(long, value_enum, global = true)]
    format: Option<OutputFormat>,

    /// Path to the history file (defaults to ~/.config/lca-rank/history.json)
    #[arg(long, global = true)]
    history_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

fn main() {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Stats);

    // Load config
    let config_path = cli.config.map(PathBuf::from);
    let config = match lca_rank::config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    if let Err(errors) = lca_rank::config::validate_config(&config) {
        eprintln!("Config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    lca_rank::logging::init(cli.verbose, config.log_level.as_deref());

    let format = cli.format.or(config.format).unwrap_or_default();
    let use_colors = config
        .colors
        .unwrap_or_else(lca_rank::output::should_use_colors);
    let history_path = cli
        .history_file
        .or_else(|| config.history_path())
        .unwrap_or_else(lca_rank::history::get_history_path);
    debug!(path = %history_path.display(), ?format, "resolved settings");

    // `new` never touches the history
    if let Commands::New { output } = &command {
        run_new(output.as_deref());
        std::process::exit(EXIT_SUCCESS);
    }

    let mut history = match lca_rank::history::load_history(&history_path) {
        Ok(h) => h,
        Err(e) => {
            eprintln!("History error: {:#}", e);
            std::process::exit(EXIT_IO);
        }
    };

    match command {
        Commands::Compare { indices, file } => {
            let records = match file {
                Some(path) => match read_records(&path) {
                    Ok(records) => records,
                    Err(e) => {
                        eprintln!("Input error: {:#}", e);
                        std::process::exit(EXIT_INPUT);
                    }
                },
                None => select_records(&history, &indices),
            };

            let result = match lca_rank::scoring::compare(&records) {
                Ok(r) => r,
                Err(e) => {
                    eprintln!("Input error: {}", e);
                    std::process::exit(EXIT_INPUT);
                }
            };

            match format {
                OutputFormat::Table => {
                    println!(
                        "{}",
                        lca_rank::output::format_comparison_table(&result, use_colors)
                    )
                }
                OutputFormat::Tsv => {
                    println!("{}", lca_rank::output::format_comparison_tsv(&result))
                }
                OutputFormat::Json => print_json(&result),
            }
        }
        Commands::Stats => {
            let stats = lca_rank::scoring::aggregate(&history);
            match format {
                OutputFormat::Json => print_json(&stats),
                _ => println!("{}", lca_rank::output::format_stats(&stats)),
            }
        }
        Commands::Add { file } => {
            let records = match read_records(&file) {
                Ok(records) => records,
                Err(e) => {
                    eprintln!("Input error: {:#}", e);
                    std::process::exit(EXIT_INPUT);
                }
            };
            let added = records.len();
            for record in records {
                if let Some(evicted) = history.push(record) {
                    eprintln!("History full; dropped {}", evicted.display_name());
                }
            }
            save_or_exit(&history_path, &history);
            info!(added, total = history.len(), "history updated");
            println!("Added {} assessment(s); {} in history", added, history.len());
        }
        Commands::History => match format {
            OutputFormat::Table => {
                println!(
                    "{}",
                    lca_rank::output::format_history_table(&history, use_colors)
                )
            }
            OutputFormat::Tsv => println!("{}", lca_rank::output::format_history_tsv(&history)),
            OutputFormat::Json => print_json(&history),
        },
        Commands::Show { index } => {
            let record = lookup(&history, index);
            match format {
                OutputFormat::Json => print_json(record),
                _ => println!(
                    "{}",
                    lca_rank::output::format_record_detail(record, use_colors)
                ),
            }
        }
        Commands::Clear => {
            let removed = history.len();
            history.clear();
            save_or_exit(&history_path, &history);
            println!("Removed {} assessment(s)", removed);
        }
        Commands::New { .. } => {}
    }

    std::process::exit(EXIT_SUCCESS);
}

/// Parse a JSON file holding either a single record or an array of records
fn read_records(path: &Path) -> anyhow::Result<Vec<AssessmentRecord>> {
    use anyhow::Context;

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let value: serde_json::Value = serde_json::from_str(&content)
        .with_context(|| format!("Invalid JSON in {}", path.display()))?;
    let records: Vec<AssessmentRecord> = if value.is_array() {
        serde_json::from_value(value)
    } else {
        serde_json::from_value(value).map(|record| vec![record])
    }
    .with_context(|| format!("Not an assessment record in {}", path.display()))?;
    Ok(records)
}

/// Resolve 1-based history indices, exiting on an out-of-range index
fn select_records(history: &History, indices: &[usize]) -> Vec<AssessmentRecord> {
    indices
        .iter()
        .map(|&index| lookup(history, index).clone())
        .collect()
}

fn lookup(history: &History, index: usize) -> &AssessmentRecord {
    // Convert 1-based user index to 0-based
    match index.checked_sub(1).and_then(|i| history.get(i)) {
        Some(record) => record,
        None => {
            eprintln!(
                "Invalid index {}. History has {} assessment(s).",
                index,
                history.len()
            );
            std::process::exit(EXIT_INPUT);
        }
    }
}

fn save_or_exit(path: &Path, history: &History) {
    if let Err(e) = lca_rank::history::save_history(path, history) {
        eprintln!("History error: {:#}", e);
        std::process::exit(EXIT_IO);
    }
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) {
    match lca_rank::output::format_json(value) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Output error: {:#}", e);
            std::process::exit(EXIT_IO);
        }
    }
}

fn run_new(output: Option<&Path>) {
    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    // Prompts go to stderr so stdout carries only the JSON
    let mut prompts = std::io::stderr();

    let assessment = match lca_rank::intake::run_intake(&mut input, &mut prompts) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("{:#}", e);
            std::process::exit(EXIT_INPUT);
        }
    };

    let json = match serde_json::to_string_pretty(&assessment) {
        Ok(json) => json,
        Err(e) => {
            eprintln!("Output error: {}", e);
            std::process::exit(EXIT_IO);
        }
    };

    match output {
        Some(path) => {
            if let Err(e) = std::fs::write(path, format!("{}\n", json)) {
                eprintln!("Failed to write {}: {}", path.display(), e);
                std::process::exit(EXIT_IO);
            }
            eprintln!("Saved to {}", path.display());
        }
        None => println!("{}", json),
    }
}
