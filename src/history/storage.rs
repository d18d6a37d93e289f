use super::ring::{History, HISTORY_VERSION};
use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Get the default history file path (~/.config/lca-rank/history.json)
pub fn get_history_path() -> PathBuf {
    crate::config::get_config_dir().join("history.json")
}

/// Load history from a JSON file
///
/// If the file doesn't exist, returns an empty history.
/// If the file exists but has an unsupported version, returns an error.
/// Files holding more records than the capacity keep only the newest ones.
pub fn load_history(path: &Path) -> Result<History> {
    if !path.exists() {
        debug!(path = %path.display(), "no history file, starting empty");
        return Ok(History::new());
    }

    let file = File::open(path)
        .with_context(|| format!("Failed to open history file at {}", path.display()))?;

    let mut history: History = serde_json::from_reader(file)
        .with_context(|| format!("Failed to parse history file at {}", path.display()))?;

    if history.version != HISTORY_VERSION {
        anyhow::bail!("Unsupported history version: {}", history.version);
    }

    let dropped = history.truncate_to_capacity();
    if dropped > 0 {
        warn!(dropped, "history file exceeded capacity, oldest records dropped");
    }

    Ok(history)
}

/// Save history to a JSON file atomically
///
/// Creates the parent directory if it doesn't exist.
pub fn save_history(path: &Path, history: &History) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create history directory at {}", parent.display())
            })?;
        }
    }

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;

    serde_json::to_writer_pretty(&mut file, history).context("Failed to serialize history")?;

    file.commit().context("Failed to save history")?;

    debug!(path = %path.display(), records = history.len(), "history saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::{AssessmentInput, InputParameters, MetalType, ProductionRoute};
    use crate::history::HISTORY_CAPACITY;
    use std::collections::BTreeMap;

    fn record(name: &str) -> crate::assessment::AssessmentRecord {
        let input = AssessmentInput {
            name: Some(name.to_string()),
            metal_type: MetalType::Steel,
            production_route: ProductionRoute::Mixed,
            quantity: 250.0,
            parameters: InputParameters {
                recycled_content: Some(0.4),
                ..Default::default()
            },
        };
        let mut results = BTreeMap::new();
        results.insert("carbon_footprint".to_string(), 420.0);
        results.insert("sustainability_score".to_string(), 66.5);
        crate::assessment::AssessmentRecord::from_input(input, results)
    }

    #[test]
    fn test_load_missing_file_returns_empty() {
        let dir = tempfile::tempdir().unwrap();
        let history = load_history(&dir.path().join("history.json")).unwrap();
        assert_eq!(history.version, 1);
        assert!(history.is_empty());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("history.json");

        let mut history = History::new();
        history.push(record("older"));
        history.push(record("newer"));
        save_history(&path, &history).unwrap();

        let loaded = load_history(&path).unwrap();
        assert_eq!(loaded, history);
        assert_eq!(loaded.latest().unwrap().name.as_deref(), Some("newer"));
    }

    #[test]
    fn test_unsupported_version() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");
        fs::write(&path, r#"{"version": 7, "records": []}"#).unwrap();

        let err = load_history(&path).unwrap_err();
        assert!(err.to_string().contains("Unsupported history version"));
    }

    #[test]
    fn test_oversized_file_truncated() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");

        let records: Vec<_> = (0..HISTORY_CAPACITY + 2)
            .map(|i| record(&format!("r{}", i)))
            .collect();
        let json = serde_json::json!({ "version": 1, "records": records });
        fs::write(&path, json.to_string()).unwrap();

        let loaded = load_history(&path).unwrap();
        assert_eq!(loaded.len(), HISTORY_CAPACITY);
        assert_eq!(loaded.latest().unwrap().name.as_deref(), Some("r0"));
    }

    #[test]
    fn test_malformed_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");
        fs::write(&path, "not json").unwrap();
        assert!(load_history(&path).is_err());
    }
}
