//! Core move-detection and news-association logic
//!
//! This crate holds the domain model and the two algorithms everything else
//! hangs off:
//!
//! - The move detector: computes day-over-day percentage changes on a daily
//!   price series and flags the dates whose absolute change meets a threshold.
//! - The news associator: selects, for a flagged date, the news items that
//!   fall inside a lookback window and meet a relevance threshold, in a
//!   deterministic order (relevance descending, then recency).
//!
//! Fetching, narrative generation and rendering live in sibling crates; this
//! crate has no I/O.
//!
//! # Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use marketlens_core::{PriceRecord, PriceSeries, detect_significant_moves};
//!
//! fn record(date: NaiveDate, close: f64) -> PriceRecord {
//!     PriceRecord { date, open: close, high: close, low: close, close, volume: 0 }
//! }
//!
//! let d = |day| NaiveDate::from_ymd_opt(2025, 6, day).unwrap();
//! let mut series = PriceSeries::from_records(vec![
//!     record(d(2), 100.0),
//!     record(d(3), 105.0),
//!     record(d(4), 95.0),
//! ]).unwrap();
//!
//! let signals = detect_significant_moves(&mut series, 4.0).unwrap();
//! assert_eq!(signals, vec![d(3), d(4)]);
//! ```

pub mod assoc;
pub mod error;
pub mod model;
pub mod moves;
pub mod request;

// Re-export main types for convenience
pub use assoc::{associate_news, association_window};
pub use error::{CoreError, Result};
pub use model::{
    AssociatedNews, Association, Narrative, NewsRecord, PriceRecord, PriceRow, PriceSeries,
    SentimentLabel,
};
pub use moves::detect_significant_moves;
pub use request::{AnalysisRequest, Period};
