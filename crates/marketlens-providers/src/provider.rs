//! The provider capability trait
//!
//! One strategy interface with two operations; providers return
//! `ProviderError::Unsupported` for capabilities they lack, and the caller
//! wires one provider per concern.

use crate::error::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use marketlens_core::{NewsRecord, Period, PriceSeries};

/// A fetched price history plus the company's display name
#[derive(Debug, Clone)]
pub struct PriceFetch {
    pub company_name: String,
    pub series: PriceSeries,
}

/// Parameters for a news fetch
///
/// Keyed providers search by ticker (`symbol`); full-text providers search by
/// `company_name`. The window bounds are calendar days, expanded to day
/// boundaries by each client.
#[derive(Debug, Clone)]
pub struct NewsQuery {
    pub symbol: String,
    pub company_name: String,
    pub from: NaiveDate,
    pub to: NaiveDate,
}

/// Capability interface implemented per data provider
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Short provider name for logs and error messages
    fn name(&self) -> &'static str;

    /// Fetch and normalize the daily price history for a symbol
    async fn fetch_prices(&self, symbol: &str, period: Period) -> Result<PriceFetch>;

    /// Fetch and normalize news for a query window
    async fn fetch_news(&self, query: &NewsQuery) -> Result<Vec<NewsRecord>>;
}
