//! Error types for provider operations

use thiserror::Error;

/// Provider-specific errors
#[derive(Debug, Error)]
pub enum ProviderError {
    /// API request failed or returned an unexpected payload
    #[error("API error: {0}")]
    Api(String),

    /// Rate limit exceeded for a provider
    #[error("rate limit exceeded for {provider}")]
    RateLimitExceeded { provider: String },

    /// The provider does not implement the requested capability
    #[error("{provider} does not support {capability}")]
    Unsupported {
        provider: &'static str,
        capability: &'static str,
    },

    /// Network or HTTP error
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Yahoo Finance API error
    #[error("Yahoo Finance error: {0}")]
    Yahoo(String),

    /// Configuration error (missing API key, bad parameter)
    #[error("configuration error: {0}")]
    Config(String),

    /// Malformed price payload
    #[error(transparent)]
    Core(#[from] marketlens_core::CoreError),
}

/// Result type alias for provider operations
pub type Result<T> = std::result::Result<T, ProviderError>;
