//! Request-scoped analysis configuration
//!
//! Replaces the ambient session state of a dashboard with an explicit object
//! passed through the pipeline.

use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};

/// Analysis period selectable from the surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Period {
    /// Last 7 trading days
    SevenDays,
    /// Last month (30 calendar days of trading data)
    OneMonth,
}

impl Default for Period {
    fn default() -> Self {
        Self::OneMonth
    }
}

impl Period {
    pub fn days(self) -> u32 {
        match self {
            Self::SevenDays => 7,
            Self::OneMonth => 30,
        }
    }
}

/// One analysis run's configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisRequest {
    /// Ticker symbol, e.g. "TSLA"
    pub symbol: String,

    /// Price history period
    pub period: Period,

    /// Significant move threshold in percentage points
    pub move_threshold: f64,

    /// Minimum relevance score for associated news
    pub relevance_threshold: f64,

    /// News lookback window in days before each signal date (0 = signal day only)
    pub lookback_days: u32,

    /// ISO 639-1 language code for narrative and surface text
    pub language: String,
}

impl Default for AnalysisRequest {
    fn default() -> Self {
        Self {
            symbol: String::new(),
            period: Period::OneMonth,
            move_threshold: 5.0,
            relevance_threshold: 0.3,
            lookback_days: 0,
            language: "en".to_string(),
        }
    }
}

impl AnalysisRequest {
    /// Create a new request builder
    pub fn builder() -> AnalysisRequestBuilder {
        AnalysisRequestBuilder::default()
    }

    /// Validate the request
    pub fn validate(&self) -> Result<()> {
        if self.symbol.trim().is_empty() {
            return Err(CoreError::Request("symbol must not be empty".to_string()));
        }
        if !self.move_threshold.is_finite() || self.move_threshold < 0.0 {
            return Err(CoreError::Request(format!(
                "move threshold must be non-negative, got {}",
                self.move_threshold
            )));
        }
        if !(0.0..=1.0).contains(&self.relevance_threshold) {
            return Err(CoreError::Request(format!(
                "relevance threshold must be in [0, 1], got {}",
                self.relevance_threshold
            )));
        }
        Ok(())
    }
}

/// Builder for [`AnalysisRequest`]
#[derive(Debug, Default)]
pub struct AnalysisRequestBuilder {
    symbol: Option<String>,
    period: Option<Period>,
    move_threshold: Option<f64>,
    relevance_threshold: Option<f64>,
    lookback_days: Option<u32>,
    language: Option<String>,
}

impl AnalysisRequestBuilder {
    pub fn symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = Some(symbol.into());
        self
    }

    pub fn period(mut self, period: Period) -> Self {
        self.period = Some(period);
        self
    }

    pub fn move_threshold(mut self, threshold: f64) -> Self {
        self.move_threshold = Some(threshold);
        self
    }

    pub fn relevance_threshold(mut self, threshold: f64) -> Self {
        self.relevance_threshold = Some(threshold);
        self
    }

    pub fn lookback_days(mut self, days: u32) -> Self {
        self.lookback_days = Some(days);
        self
    }

    pub fn language(mut self, code: impl Into<String>) -> Self {
        self.language = Some(code.into());
        self
    }

    /// Build and validate the request
    pub fn build(self) -> Result<AnalysisRequest> {
        let defaults = AnalysisRequest::default();
        let request = AnalysisRequest {
            symbol: self.symbol.unwrap_or(defaults.symbol),
            period: self.period.unwrap_or(defaults.period),
            move_threshold: self.move_threshold.unwrap_or(defaults.move_threshold),
            relevance_threshold: self
                .relevance_threshold
                .unwrap_or(defaults.relevance_threshold),
            lookback_days: self.lookback_days.unwrap_or(defaults.lookback_days),
            language: self.language.unwrap_or(defaults.language),
        };
        request.validate()?;
        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_period_days() {
        assert_eq!(Period::SevenDays.days(), 7);
        assert_eq!(Period::OneMonth.days(), 30);
        assert_eq!(Period::default(), Period::OneMonth);
    }

    #[test]
    fn test_builder() {
        let request = AnalysisRequest::builder()
            .symbol("RKLB")
            .period(Period::SevenDays)
            .move_threshold(10.0)
            .language("zh")
            .build()
            .unwrap();

        assert_eq!(request.symbol, "RKLB");
        assert_eq!(request.period, Period::SevenDays);
        assert_eq!(request.move_threshold, 10.0);
        assert_eq!(request.relevance_threshold, 0.3);
        assert_eq!(request.lookback_days, 0);
        assert_eq!(request.language, "zh");
    }

    #[test]
    fn test_validation_empty_symbol() {
        assert!(AnalysisRequest::builder().build().is_err());
        assert!(AnalysisRequest::builder().symbol("  ").build().is_err());
    }

    #[test]
    fn test_validation_thresholds() {
        assert!(
            AnalysisRequest::builder()
                .symbol("TSLA")
                .move_threshold(-1.0)
                .build()
                .is_err()
        );
        assert!(
            AnalysisRequest::builder()
                .symbol("TSLA")
                .relevance_threshold(1.5)
                .build()
                .is_err()
        );
        assert!(
            AnalysisRequest::builder()
                .symbol("TSLA")
                .move_threshold(0.0)
                .relevance_threshold(0.0)
                .build()
                .is_ok()
        );
    }
}
