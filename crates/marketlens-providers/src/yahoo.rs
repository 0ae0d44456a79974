//! Yahoo Finance provider (prices only, no API key required)

use crate::error::{ProviderError, Result};
use crate::provider::{MarketDataProvider, NewsQuery, PriceFetch};
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use marketlens_core::{NewsRecord, Period, PriceRecord, PriceSeries};
use time::OffsetDateTime;
use tracing::debug;
use yahoo_finance_api as yahoo;

/// Yahoo Finance client implementing the price capability
#[derive(Debug, Default, Clone)]
pub struct YahooProvider {}

impl YahooProvider {
    pub fn new() -> Self {
        Self {}
    }

    fn connector() -> Result<yahoo::YahooConnector> {
        yahoo::YahooConnector::new().map_err(|e| ProviderError::Yahoo(e.to_string()))
    }

    /// Fetch daily quotes between two instants and map them to price records
    async fn history(
        &self,
        symbol: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<PriceRecord>> {
        let provider = Self::connector()?;

        let start_odt = OffsetDateTime::from_unix_timestamp(start.timestamp())
            .map_err(|e| ProviderError::Yahoo(format!("invalid start timestamp: {e}")))?;
        let end_odt = OffsetDateTime::from_unix_timestamp(end.timestamp())
            .map_err(|e| ProviderError::Yahoo(format!("invalid end timestamp: {e}")))?;

        let response = provider
            .get_quote_history(symbol, start_odt, end_odt)
            .await
            .map_err(|e| ProviderError::Yahoo(e.to_string()))?;

        let quotes = response
            .quotes()
            .map_err(|e| ProviderError::Yahoo(e.to_string()))?;

        let mut records: Vec<PriceRecord> = quotes
            .iter()
            .filter_map(|q| {
                DateTime::from_timestamp(q.timestamp as i64, 0).map(|ts| PriceRecord {
                    date: ts.date_naive(),
                    open: q.open,
                    high: q.high,
                    low: q.low,
                    close: q.close,
                    volume: q.volume,
                })
            })
            .collect();

        records.sort_by_key(|r| r.date);
        records.dedup_by_key(|r| r.date);
        Ok(records)
    }

    /// Look up the company display name via ticker search
    ///
    /// Cosmetic; falls back to the symbol on any failure.
    async fn company_name(&self, symbol: &str) -> String {
        let Ok(provider) = Self::connector() else {
            return symbol.to_string();
        };

        match provider.search_ticker(symbol).await {
            Ok(result) => result
                .quotes
                .iter()
                .find(|q| q.symbol == symbol)
                .map(|q| {
                    if q.long_name.is_empty() {
                        q.short_name.clone()
                    } else {
                        q.long_name.clone()
                    }
                })
                .filter(|name| !name.is_empty())
                .unwrap_or_else(|| symbol.to_string()),
            Err(err) => {
                debug!(symbol, %err, "ticker search failed");
                symbol.to_string()
            }
        }
    }
}

#[async_trait]
impl MarketDataProvider for YahooProvider {
    fn name(&self) -> &'static str {
        "yahoo"
    }

    async fn fetch_prices(&self, symbol: &str, period: Period) -> Result<PriceFetch> {
        // Always fetch a month; the 7-day period is the tail of that history
        let end = Utc::now();
        let start = end - Duration::days(i64::from(Period::OneMonth.days()));

        let mut records = self.history(symbol, start, end).await?;
        if period == Period::SevenDays {
            let keep = Period::SevenDays.days() as usize;
            if records.len() > keep {
                records.drain(..records.len() - keep);
            }
        }

        let series = PriceSeries::from_records(records)?;
        let company_name = self.company_name(symbol).await;

        Ok(PriceFetch {
            company_name,
            series,
        })
    }

    async fn fetch_news(&self, _query: &NewsQuery) -> Result<Vec<NewsRecord>> {
        Err(ProviderError::Unsupported {
            provider: "yahoo",
            capability: "fetch_news",
        })
    }
}
