//! Error types for the fallible edges of the crate.
//!
//! Placement, progression and the session itself are total; only loading
//! configuration and preparing share links can fail.

/// Error type for configuration loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Error type for the create-and-share flow
#[derive(Debug, thiserror::Error)]
pub enum ShareError {
    #[error("Recipient name is empty")]
    EmptyName,
    #[error("Not an image: {mime}")]
    NotAnImage { mime: String },
    #[error("Image too large: {size} bytes, limit {max}")]
    TooLarge { size: u64, max: u64 },
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),
    #[error("Unsupported URL scheme: {0}")]
    UnsupportedScheme(String),
}
