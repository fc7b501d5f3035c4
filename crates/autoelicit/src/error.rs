//! Error types for the autoelicit library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for elicitation operations.
#[derive(Debug, Error)]
pub enum ElicitError {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A data cell could not be read as a number.
    #[error("Parse error at row {row}, column {column}: {message}")]
    Parse {
        row: usize,
        column: usize,
        message: String,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Empty file or no data to load.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A prompt template could not be rendered.
    #[error("Template error: {0}")]
    Template(String),

    /// The LLM backend failed to produce a response.
    #[error("{provider} error: {message}")]
    Provider {
        provider: String,
        message: String,
        /// Whether repeating the request may succeed (rate limits, 5xx, timeouts).
        retryable: bool,
    },

    /// The LLM replied, but the reply could not be read as priors.
    #[error("Invalid response for prompt pair {pair}: {message}")]
    InvalidResponse { pair: usize, message: String },

    /// The reply omitted a feature the dataset requires.
    #[error("Response for prompt pair {pair} is missing feature '{feature}'")]
    MissingFeature { pair: usize, feature: String },

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Config file could not be deserialized.
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl ElicitError {
    /// Build a provider error.
    pub fn provider(
        provider: impl Into<String>,
        message: impl Into<String>,
        retryable: bool,
    ) -> Self {
        ElicitError::Provider {
            provider: provider.into(),
            message: message.into(),
            retryable,
        }
    }

    /// Whether the failed step is worth repeating.
    ///
    /// Malformed replies count as retryable: sampling again usually fixes them.
    pub fn is_retryable(&self) -> bool {
        match self {
            ElicitError::Provider { retryable, .. } => *retryable,
            ElicitError::InvalidResponse { .. } | ElicitError::MissingFeature { .. } => true,
            _ => false,
        }
    }
}

/// Result type alias for elicitation operations.
pub type Result<T> = std::result::Result<T, ElicitError>;
