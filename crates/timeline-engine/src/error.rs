//! Error types for timeline-engine operations.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TimelineError {
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid time of day: {0}")]
    InvalidTime(String),

    #[error("Event '{event}' has invalid day count {total_days} (must be at least 1)")]
    InvalidTotalDays { event: String, total_days: i64 },

    #[error("Invalid grid configuration: {0}")]
    InvalidConfig(String),

    #[error("Malformed submission export: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, TimelineError>;
