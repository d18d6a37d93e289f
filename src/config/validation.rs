use super::schema::Config;
use tracing::Level;

/// Validate configuration at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_config(config: &Config) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if let Some(ref level) = config.log_level {
        if level.parse::<Level>().is_err() {
            errors.push(format!(
                "log_level: invalid '{}' - expected one of error, warn, info, debug, trace",
                level
            ));
        }
    }

    if let Some(ref path) = config.history_path {
        if path.trim().is_empty() {
            errors.push("history_path: must not be empty".to_string());
        } else if let Some(resolved) = config.history_path() {
            if resolved.is_dir() {
                errors.push(format!(
                    "history_path: '{}' is a directory, expected a file",
                    path
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
