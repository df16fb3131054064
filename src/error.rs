// src/error.rs

//! Unified error handling for the pagefeed application.

use thiserror::Error;

/// Result type alias for pagefeed operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// Fetching failed outside the HTTP client layer
    #[error("fetch error for {address}: {message}")]
    Fetch { address: String, message: String },

    /// A rule pattern failed to compile
    #[error("rule compile error: {0}")]
    RuleCompile(#[from] regex::Error),

    /// A rule pattern has no capture group to extract with
    #[error("rule compile error: {field} pattern has no capture group")]
    MissingCaptureGroup { field: &'static str },

    /// The item pattern matched nothing in the document
    #[error("no item matches in document")]
    NoSegments,

    /// A field pattern matched zero or multiple times within a segment
    #[error("expected exactly one {field} match in segment {segment}, found {found}")]
    FieldMatch {
        field: &'static str,
        segment: usize,
        found: usize,
    },

    /// No source with the given identifier
    #[error("source {0} not found")]
    SourceNotFound(u64),

    /// Store read/write failure
    #[error("store error: {0}")]
    Store(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),
}

impl AppError {
    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a store error.
    pub fn store(message: impl Into<String>) -> Self {
        Self::Store(message.into())
    }

    /// Create a fetch error with the address as context.
    pub fn fetch(address: impl Into<String>, message: impl std::fmt::Display) -> Self {
        Self::Fetch {
            address: address.into(),
            message: message.to_string(),
        }
    }
}
