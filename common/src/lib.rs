use thiserror::Error;

pub mod config;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Identifier source unavailable for {category}: {reason}")]
    SourceUnavailable { category: String, reason: String },

    #[error("Report query unavailable: {0}")]
    QueryUnavailable(String),

    #[error("Failed to decode report response: {0}")]
    Decode(String),

    #[error("Invalid value {value:?} for metric {key}: {reason}")]
    Aggregation {
        key: String,
        value: String,
        reason: String,
    },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ::config::ConfigError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
