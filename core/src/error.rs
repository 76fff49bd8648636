//! Error taxonomy for the analytics engine.
//!
//! RULE: a failed prediction is never replaced with a default value.
//! Rejected records are surfaced to the caller; batch processing logs
//! them and continues with the remaining records.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyticsError {
    /// Malformed or out-of-range input. Raised before any oracle call.
    #[error("invalid record '{id}': {reason}")]
    InvalidRecord { id: String, reason: String },

    /// The regression oracle failed for this record.
    #[error("prediction unavailable for record '{id}': {source}")]
    PredictionUnavailable {
        id: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type AnalyticsResult<T> = Result<T, AnalyticsError>;
