//! Error types for the HiLumi member network.
//!
//! Generation and the geo-queries are total; only the edges that parse
//! user input or touch the filesystem can fail.

use thiserror::Error;

/// Errors that can occur at the fallible edges of the library.
#[derive(Debug, Error)]
pub enum HilumiError {
    /// Angular sector could not be parsed or is out of range
    #[error("Invalid angular sector: {0}")]
    InvalidSector(String),

    /// H3 resolution outside 0..=15
    #[error("Invalid H3 resolution: {0}")]
    InvalidResolution(u8),

    /// Configuration value rejected
    #[error("Configuration error: {0}")]
    Config(String),

    /// Reading or writing a file failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding/decoding failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl HilumiError {
    /// Creates a sector error.
    pub fn sector(msg: impl Into<String>) -> Self {
        Self::InvalidSector(msg.into())
    }

    /// Creates a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
