//! Error types for template and chat-endpoint operations

use thiserror::Error;

/// Narrative layer errors
///
/// These never escape the generator: [`crate::NarrativeGenerator`] maps them
/// to sentinel values. They are typed so the mapping can log precisely.
#[derive(Debug, Error)]
pub enum NarrativeError {
    /// Template has no variant for the requested language
    #[error("template '{name}' not available for language '{language}'")]
    TemplateNotFound { name: String, language: String },

    /// Template failed to parse at build time
    #[error("template '{name}' failed to parse ({language}): {detail}")]
    TemplateParseFailed {
        name: String,
        language: String,
        detail: String,
    },

    /// Template failed to render
    #[error("template '{name}' failed to render: {detail}")]
    RenderError { name: String, detail: String },

    /// Template was built without any language variants
    #[error("no templates provided for '{0}'")]
    NoTemplatesProvided(String),

    /// Chat endpoint returned a non-success status or malformed body
    #[error("chat API error: {0}")]
    Api(String),

    /// Network or HTTP error
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
}

/// Result type alias for narrative operations
pub type Result<T> = std::result::Result<T, NarrativeError>;
