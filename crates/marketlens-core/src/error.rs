//! Error types for the core pipeline

use thiserror::Error;

/// Errors raised by the move detector and the request model
#[derive(Debug, Error)]
pub enum CoreError {
    /// Price series is malformed (unsorted, duplicate dates, non-finite close)
    #[error("price data error: {0}")]
    Data(String),

    /// Move threshold is negative or not a number
    #[error("invalid move threshold: {0}")]
    Threshold(f64),

    /// Analysis request failed validation
    #[error("invalid request: {0}")]
    Request(String),
}

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CoreError::Data("duplicate date 2025-06-03".to_string());
        assert_eq!(err.to_string(), "price data error: duplicate date 2025-06-03");

        let err = CoreError::Threshold(-5.0);
        assert_eq!(err.to_string(), "invalid move threshold: -5");
    }
}
