use thiserror::Error;

/// Rejected comparison input. Returned to the caller as-is, never retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("comparison needs between {min} and {max} records, got {count}")]
    SelectionSize { count: usize, min: usize, max: usize },

    #[error("record {index} ({name}) has no results")]
    EmptyResults { index: usize, name: String },
}
