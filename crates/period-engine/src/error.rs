//! Error types for period-engine operations.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PeriodError {
    #[error("Invalid granularity: {0}")]
    InvalidGranularity(String),

    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Invalid locale: {0}")]
    InvalidLocale(String),

    #[error("Invalid datetime: {0}")]
    InvalidDatetime(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<config::ConfigError> for PeriodError {
    fn from(err: config::ConfigError) -> Self {
        PeriodError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, PeriodError>;
