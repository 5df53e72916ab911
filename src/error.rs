//! Error types for configuration loading and event ingestion.
//!
//! Nothing here ever escapes a turn or event callback: the callbacks log and
//! degrade to doing nothing.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StrategyError {
    #[error("invalid strategy config: {0}")]
    Config(String),

    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
}

pub type StrategyResult<T> = Result<T, StrategyError>;
