//! Domain model: price series, news records, associations

use crate::error::{CoreError, Result};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One trading day of OHLCV data, as produced by a price provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRecord {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

/// A price record plus the derived change columns
///
/// `prev_close` and `pct_change` are `None` until the move detector has run,
/// and always `None` on the first row of a series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRow {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
    pub prev_close: Option<f64>,
    pub pct_change: Option<f64>,
}

impl From<PriceRecord> for PriceRow {
    fn from(r: PriceRecord) -> Self {
        Self {
            date: r.date,
            open: r.open,
            high: r.high,
            low: r.low,
            close: r.close,
            volume: r.volume,
            prev_close: None,
            pct_change: None,
        }
    }
}

/// A validated, ascending-by-date daily price series
///
/// Construction enforces the invariants the move detector relies on: strictly
/// ascending dates (one record per trading day) and finite close values.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PriceSeries {
    rows: Vec<PriceRow>,
}

impl PriceSeries {
    /// Build a series from provider records, validating the ordering invariants
    pub fn from_records(records: Vec<PriceRecord>) -> Result<Self> {
        for record in &records {
            if !record.close.is_finite() {
                return Err(CoreError::Data(format!(
                    "non-numeric close on {}",
                    record.date
                )));
            }
        }

        for pair in records.windows(2) {
            if pair[1].date == pair[0].date {
                return Err(CoreError::Data(format!("duplicate date {}", pair[0].date)));
            }
            if pair[1].date < pair[0].date {
                return Err(CoreError::Data(format!(
                    "series not sorted ascending at {}",
                    pair[1].date
                )));
            }
        }

        Ok(Self {
            rows: records.into_iter().map(PriceRow::from).collect(),
        })
    }

    pub fn rows(&self) -> &[PriceRow] {
        &self.rows
    }

    pub(crate) fn rows_mut(&mut self) -> &mut [PriceRow] {
        &mut self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Look up the derived percentage change for a date
    ///
    /// Returns `None` for the first row, for dates outside the series, or
    /// before the detector has attached the derived columns.
    pub fn pct_change_on(&self, date: NaiveDate) -> Option<f64> {
        self.rows
            .iter()
            .find(|row| row.date == date)
            .and_then(|row| row.pct_change)
    }

    pub fn contains_date(&self, date: NaiveDate) -> bool {
        self.rows.iter().any(|row| row.date == date)
    }
}

/// Sentiment tag attached to a news item by a provider
///
/// Covers the Alpha Vantage label ladder; providers without sentiment data
/// default to `Neutral`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SentimentLabel {
    Bearish,
    SomewhatBearish,
    #[default]
    Neutral,
    SomewhatBullish,
    Bullish,
    Other(String),
}

impl SentimentLabel {
    /// Parse a provider label string ("Somewhat-Bullish", "Neutral", ...)
    pub fn from_provider(label: &str) -> Self {
        match label {
            "Bearish" => Self::Bearish,
            "Somewhat-Bearish" => Self::SomewhatBearish,
            "Neutral" => Self::Neutral,
            "Somewhat-Bullish" => Self::SomewhatBullish,
            "Bullish" => Self::Bullish,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Bearish => "Bearish",
            Self::SomewhatBearish => "Somewhat-Bearish",
            Self::Neutral => "Neutral",
            Self::SomewhatBullish => "Somewhat-Bullish",
            Self::Bullish => "Bullish",
            Self::Other(label) => label,
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A normalized news item
///
/// Providers without relevance or sentiment data fill in the documented
/// defaults: relevance 1.0, sentiment 0.0, label Neutral.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsRecord {
    pub published_at: DateTime<Utc>,
    pub title: String,
    pub summary: String,
    pub url: String,
    pub source: String,
    pub relevance_score: f64,
    pub sentiment_score: f64,
    pub sentiment_label: SentimentLabel,
}

/// Outcome of the narrative step for one signal date
///
/// The pipeline never aborts because a narrative failed; every failure mode
/// is a distinguishable sentinel the renderer resolves to locale text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Narrative {
    /// Model-produced explanation text
    Generated(String),
    /// No news met the window and relevance filters; no request was made
    NoNews,
    /// No language-model credential configured
    MissingCredential,
    /// Transport or response-format failure, with the error text
    Failed(String),
}

impl Narrative {
    pub fn is_generated(&self) -> bool {
        matches!(self, Self::Generated(_))
    }
}

/// The news and narrative associated with one signal date
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssociatedNews {
    pub news: Vec<NewsRecord>,
    pub narrative: Narrative,
}

/// Mapping from signal date to its associated news, in signal order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Association {
    entries: Vec<(NaiveDate, AssociatedNews)>,
}

impl Association {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry; signal dates arrive in ascending order from the detector
    pub fn insert(&mut self, date: NaiveDate, associated: AssociatedNews) {
        self.entries.push((date, associated));
    }

    pub fn get(&self, date: NaiveDate) -> Option<&AssociatedNews> {
        self.entries
            .iter()
            .find(|(d, _)| *d == date)
            .map(|(_, a)| a)
    }

    pub fn iter(&self) -> impl Iterator<Item = &(NaiveDate, AssociatedNews)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
