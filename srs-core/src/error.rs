use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("quality rating must be between 0 and 5, got {0}")]
    InvalidQuality(i64),
    #[error("timestamp must be a finite, non-negative number of epoch milliseconds, got {0}")]
    InvalidTimestamp(String),
    #[error("invalid item identifier {input:?}: {reason}")]
    InvalidItemId { input: String, reason: &'static str },
    #[error("invalid progress record for {id}: {reason}")]
    InvalidRecord { id: String, reason: String },
    #[error("invalid scheduler configuration: {0}")]
    InvalidConfig(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Failed to lock {0}")]
    Lock(&'static str),
}

pub type Result<T> = std::result::Result<T, Error>;
