use crate::output::OutputFormat;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Optional settings file.
///
/// Example YAML:
/// ```yaml
/// history_path: ~/lca/history.json
/// format: table
/// colors: true
/// log_level: info
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Where the assessment history is kept (default: ~/.config/lca-rank/history.json)
    #[serde(default)]
    pub history_path: Option<String>,

    /// Default output format when --format is not given
    #[serde(default)]
    pub format: Option<OutputFormat>,

    /// Force colors on or off (default: auto-detect TTY)
    #[serde(default)]
    pub colors: Option<bool>,

    /// One of error, warn, info, debug, trace (default: warn)
    #[serde(default)]
    pub log_level: Option<String>,
}

impl Config {
    /// Configured history path with a leading `~/` expanded
    pub fn history_path(&self) -> Option<PathBuf> {
        self.history_path.as_deref().map(expand_home)
    }
}

fn expand_home(path: &str) -> PathBuf {
    match (path.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}
