//! Data provider adapters for the move/news correlation pipeline
//!
//! Each provider implements the [`MarketDataProvider`] capability trait with
//! two operations, `fetch_prices` and `fetch_news`, and normalizes its native
//! response shape into the core model:
//!
//! - Alpha Vantage: daily time series (nested JSON keyed by date string) and
//!   the news sentiment feed with per-ticker relevance/sentiment.
//! - Yahoo Finance: daily price history (prices only).
//! - NewsAPI: article search (news only, no relevance/sentiment data).
//!
//! Raw JSON responses go through a short-lived in-process TTL cache; the
//! keyed clients sit behind `governor` rate limiters matching free-tier
//! quotas.

pub mod alpha_vantage;
pub mod cache;
pub mod error;
pub mod newsapi;
pub mod provider;
pub mod yahoo;

// Re-export main types for convenience
pub use alpha_vantage::AlphaVantageProvider;
pub use cache::{CacheKey, CacheManager, ResponseCache};
pub use error::{ProviderError, Result};
pub use newsapi::NewsApiProvider;
pub use provider::{MarketDataProvider, NewsQuery, PriceFetch};
pub use yahoo::YahooProvider;
