//! Error types for Wisp

use crate::id::ObjectId;
use thiserror::Error;

/// The main error type for Wisp operations
#[derive(Debug, Error)]
pub enum WispError {
    #[error("Stale particle handle: slot {index} is no longer at generation {generation}")]
    StaleHandle { index: u32, generation: u32 },

    #[error("Unknown smoke object: {0}")]
    UnknownObject(ObjectId),

    #[error("Smoke object {0} was first seen without layer/interior data")]
    IncompleteCreate(ObjectId),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParseError(String),
}

/// Result type alias for Wisp operations
pub type Result<T> = std::result::Result<T, WispError>;

impl From<toml::de::Error> for WispError {
    fn from(err: toml::de::Error) -> Self {
        WispError::TomlParseError(err.to_string())
    }
}
