//! Alpha Vantage provider (prices and news sentiment)

use crate::cache::{CacheKey, CacheManager, ResponseCache};
use crate::error::{ProviderError, Result};
use crate::provider::{MarketDataProvider, NewsQuery, PriceFetch};
use async_trait::async_trait;
use chrono::{Duration, NaiveDate, NaiveDateTime, Utc};
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use marketlens_core::{NewsRecord, Period, PriceRecord, PriceSeries, SentimentLabel};
use reqwest::Client;
use std::collections::{BTreeMap, HashMap};
use std::num::NonZeroU32;
use std::sync::Arc;
use tracing::debug;

const BASE_URL: &str = "https://www.alphavantage.co/query";
const TIME_PUBLISHED_FORMAT: &str = "%Y%m%dT%H%M%S";

type SharedRateLimiter = Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>;

/// Alpha Vantage client implementing both provider capabilities
#[derive(Clone)]
pub struct AlphaVantageProvider {
    client: Client,
    api_key: String,
    rate_limiter: SharedRateLimiter,
    cache: CacheManager,
}

impl AlphaVantageProvider {
    /// Create a new provider with API key and per-minute rate limit
    ///
    /// The free tier allows 5 requests per minute.
    pub fn new(api_key: impl Into<String>, rate_limit: u32, cache: CacheManager) -> Self {
        let quota =
            Quota::per_minute(NonZeroU32::new(rate_limit).unwrap_or(NonZeroU32::MIN));
        let rate_limiter = Arc::new(RateLimiter::direct(quota));

        Self {
            client: Client::new(),
            api_key: api_key.into(),
            rate_limiter,
            cache,
        }
    }

    /// Create from the ALPHA_VANTAGE_API_KEY environment variable
    pub fn from_env(cache: CacheManager) -> Result<Self> {
        let api_key = std::env::var("ALPHA_VANTAGE_API_KEY").map_err(|_| {
            ProviderError::Config(
                "ALPHA_VANTAGE_API_KEY environment variable not set".to_string(),
            )
        })?;
        Ok(Self::new(api_key, 5, cache))
    }

    /// Execute a query through the cache tier, checking the payload for API errors
    async fn query(
        &self,
        tier: &ResponseCache,
        subject: &str,
        mut params: HashMap<&'static str, String>,
    ) -> Result<serde_json::Value> {
        let function = params
            .get("function")
            .cloned()
            .unwrap_or_else(|| "UNKNOWN".to_string());
        // BTreeMap gives a stable serialization order for the key
        let key_params: BTreeMap<&str, &String> =
            params.iter().map(|(k, v)| (*k, v)).collect();
        let key = CacheKey::new(subject, function, &key_params);
        params.insert("apikey", self.api_key.clone());

        tier.get_or_fetch(key, || async {
            self.rate_limiter.until_ready().await;

            let response = self.client.get(BASE_URL).query(&params).send().await?;

            if !response.status().is_success() {
                return Err(ProviderError::Api(format!(
                    "Alpha Vantage HTTP error: {}",
                    response.status()
                )));
            }

            let data: serde_json::Value = response.json().await?;

            if let Some(error) = data.get("Error Message") {
                return Err(ProviderError::Api(format!("Alpha Vantage: {error}")));
            }
            if data.get("Note").is_some() {
                return Err(ProviderError::RateLimitExceeded {
                    provider: "Alpha Vantage".to_string(),
                });
            }

            Ok(data)
        })
        .await
    }

    /// Look up the company display name via the OVERVIEW endpoint
    ///
    /// Falls back to the symbol when the lookup fails; the display name is
    /// cosmetic and must not abort a price fetch.
    async fn company_name(&self, symbol: &str) -> String {
        let mut params = HashMap::new();
        params.insert("function", "OVERVIEW".to_string());
        params.insert("symbol", symbol.to_string());

        match self.query(&self.cache.prices, symbol, params).await {
            Ok(data) => data
                .get("Name")
                .and_then(|v| v.as_str())
                .map_or_else(|| symbol.to_string(), ToString::to_string),
            Err(err) => {
                debug!(symbol, %err, "company overview lookup failed");
                symbol.to_string()
            }
        }
    }
}

#[async_trait]
impl MarketDataProvider for AlphaVantageProvider {
    fn name(&self) -> &'static str {
        "alpha_vantage"
    }

    async fn fetch_prices(&self, symbol: &str, period: Period) -> Result<PriceFetch> {
        let mut params = HashMap::new();
        params.insert("function", "TIME_SERIES_DAILY".to_string());
        params.insert("symbol", symbol.to_string());
        params.insert("outputsize", "compact".to_string());
        params.insert("datatype", "json".to_string());

        let data = self.query(&self.cache.prices, symbol, params).await?;

        let series_obj = data.get("Time Series (Daily)").ok_or_else(|| {
            ProviderError::Api(format!("unexpected Alpha Vantage response: {data}"))
        })?;

        let records = trim_to_period(parse_daily_series(series_obj)?, period);
        let series = PriceSeries::from_records(records)?;
        let company_name = self.company_name(symbol).await;

        Ok(PriceFetch {
            company_name,
            series,
        })
    }

    async fn fetch_news(&self, query: &NewsQuery) -> Result<Vec<NewsRecord>> {
        let mut params = HashMap::new();
        params.insert("function", "NEWS_SENTIMENT".to_string());
        params.insert("tickers", query.symbol.clone());
        params.insert(
            "time_from",
            format!("{}T0000", query.from.format("%Y%m%d")),
        );
        params.insert("time_to", format!("{}T2359", query.to.format("%Y%m%d")));
        params.insert("limit", "1000".to_string());
        params.insert("sort", "LATEST".to_string());

        let data = self.query(&self.cache.news, &query.symbol, params).await?;

        let feed = data
            .get("feed")
            .and_then(|v| v.as_array())
            .ok_or_else(|| {
                ProviderError::Api(format!("unexpected Alpha Vantage news response: {data}"))
            })?;

        Ok(parse_news_feed(feed, &query.symbol))
    }
}

/// Parse the nested `"Time Series (Daily)"` object into records
///
/// Values arrive as strings; any missing or non-numeric field is a hard error
/// because partial price data is not acceptable.
pub fn parse_daily_series(series: &serde_json::Value) -> Result<Vec<PriceRecord>> {
    let obj = series.as_object().ok_or_else(|| {
        ProviderError::Api("daily time series is not an object".to_string())
    })?;

    let mut records = Vec::with_capacity(obj.len());
    for (date_str, values) in obj {
        let date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d").map_err(|_| {
            ProviderError::Api(format!("malformed series date: {date_str}"))
        })?;

        records.push(PriceRecord {
            date,
            open: numeric_field(values, "1. open", date_str)?,
            high: numeric_field(values, "2. high", date_str)?,
            low: numeric_field(values, "3. low", date_str)?,
            close: numeric_field(values, "4. close", date_str)?,
            volume: numeric_field(values, "5. volume", date_str)? as u64,
        });
    }

    records.sort_by_key(|r| r.date);
    Ok(records)
}

fn numeric_field(values: &serde_json::Value, field: &str, date: &str) -> Result<f64> {
    values
        .get(field)
        .and_then(|v| v.as_str())
        .and_then(|s| s.parse::<f64>().ok())
        .ok_or_else(|| {
            ProviderError::Api(format!("missing or non-numeric \"{field}\" on {date}"))
        })
}

/// Trim a full history to the requested period
///
/// One month keeps the last 30 calendar days; seven days keeps the last 7
/// trading rows of that month, matching the one-month-then-tail behavior of
/// the price surface.
fn trim_to_period(records: Vec<PriceRecord>, period: Period) -> Vec<PriceRecord> {
    let cutoff = Utc::now().date_naive() - Duration::days(i64::from(Period::OneMonth.days()));
    let mut month: Vec<PriceRecord> = records.into_iter().filter(|r| r.date >= cutoff).collect();

    if period == Period::SevenDays {
        let keep = Period::SevenDays.days() as usize;
        if month.len() > keep {
            month.drain(..month.len() - keep);
        }
    }
    month
}

/// Normalize the news sentiment feed into records
///
/// Items with a malformed publish timestamp are skipped. Relevance and
/// sentiment come from the nested per-ticker entry matching `target_ticker`;
/// missing or malformed values fall back to relevance 1.0, sentiment 0.0,
/// label Neutral.
pub fn parse_news_feed(feed: &[serde_json::Value], target_ticker: &str) -> Vec<NewsRecord> {
    let mut records = Vec::with_capacity(feed.len());

    for entry in feed {
        let Some(published_at) = entry
            .get("time_published")
            .and_then(|v| v.as_str())
            .and_then(|s| NaiveDateTime::parse_from_str(s, TIME_PUBLISHED_FORMAT).ok())
            .map(|dt| dt.and_utc())
        else {
            debug!(?entry, "skipping news item with malformed timestamp");
            continue;
        };

        let sentiment = entry
            .get("ticker_sentiment")
            .and_then(|v| v.as_array())
            .and_then(|tickers| {
                tickers.iter().find(|ts| {
                    ts.get("ticker").and_then(|t| t.as_str()) == Some(target_ticker)
                })
            });

        let relevance_score = sentiment
            .and_then(|ts| numeric_or_none(ts.get("relevance_score")))
            .unwrap_or(1.0);
        let sentiment_score = sentiment
            .and_then(|ts| numeric_or_none(ts.get("ticker_sentiment_score")))
            .unwrap_or(0.0);
        let sentiment_label = sentiment
            .and_then(|ts| ts.get("ticker_sentiment_label"))
            .and_then(|v| v.as_str())
            .map_or(SentimentLabel::Neutral, SentimentLabel::from_provider);

        records.push(NewsRecord {
            published_at,
            title: string_field(entry, "title"),
            summary: string_field(entry, "summary"),
            url: string_field(entry, "url"),
            source: string_field(entry, "source"),
            relevance_score,
            sentiment_score,
            sentiment_label,
        });
    }

    records.sort_by_key(|r| r.published_at);
    records
}

fn numeric_or_none(value: Option<&serde_json::Value>) -> Option<f64> {
    match value? {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.parse::<f64>().ok(),
        _ => None,
    }
}

fn string_field(entry: &serde_json::Value, field: &str) -> String {
    entry
        .get(field)
        .and_then(|v| v.as_str())
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_series() -> serde_json::Value {
        json!({
            "2025-06-24": {
                "1. open": "340.0000",
                "2. high": "345.0000",
                "3. low": "335.0000",
                "4. close": "342.0000",
                "5. volume": "98000000"
            },
            "2025-06-25": {
                "1. open": "342.7100",
                "2. high": "342.8600",
                "3. low": "320.4000",
                "4. close": "327.5500",
                "5. volume": "119283781"
            }
        })
    }

    fn sample_feed() -> Vec<serde_json::Value> {
        vec![
            json!({
                "title": "Tesla Celebrates 1 Million Powerwall Milestone",
                "url": "https://www.benzinga.com/test-article",
                "time_published": "20250603T204801",
                "summary": "Tesla has produced one million Powerwalls in 10 years.",
                "source": "Benzinga",
                "ticker_sentiment": [{
                    "ticker": "TSLA",
                    "relevance_score": "0.950184",
                    "ticker_sentiment_score": "0.576245",
                    "ticker_sentiment_label": "Bullish"
                }]
            }),
            json!({
                "title": "Why Shares of Tesla Are Sinking Today",
                "url": "https://www.motleyfool.com/test-article",
                "time_published": "20250604T162431",
                "summary": "Tesla shares are down on delivery concerns.",
                "source": "Motley Fool",
                "ticker_sentiment": [{
                    "ticker": "TSLA",
                    "relevance_score": "0.680000",
                    "ticker_sentiment_score": "-0.206000",
                    "ticker_sentiment_label": "Somewhat-Bearish"
                }]
            }),
        ]
    }

    #[test]
    fn test_parse_daily_series() {
        let records = parse_daily_series(&sample_series()).unwrap();
        assert_eq!(records.len(), 2);
        // Sorted ascending by date regardless of object ordering
        assert!(records[0].date < records[1].date);
        assert_eq!(records[1].close, 327.55);
        assert_eq!(records[1].volume, 119_283_781);
    }

    #[test]
    fn test_parse_daily_series_non_numeric_close_fails() {
        let series = json!({
            "2025-06-25": {
                "1. open": "342.7100",
                "2. high": "342.8600",
                "3. low": "320.4000",
                "4. close": "n/a",
                "5. volume": "119283781"
            }
        });
        let err = parse_daily_series(&series).unwrap_err();
        assert!(err.to_string().contains("4. close"));
    }

    #[test]
    fn test_parse_daily_series_missing_field_fails() {
        let series = json!({
            "2025-06-25": {
                "1. open": "342.7100",
                "4. close": "327.5500"
            }
        });
        assert!(parse_daily_series(&series).is_err());
    }

    #[test]
    fn test_parse_news_feed() {
        let records = parse_news_feed(&sample_feed(), "TSLA");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].source, "Benzinga");
        assert!((records[0].relevance_score - 0.950_184).abs() < 1e-9);
        assert_eq!(records[0].sentiment_label, SentimentLabel::Bullish);
        assert_eq!(records[1].sentiment_label, SentimentLabel::SomewhatBearish);
        assert!(records[0].published_at < records[1].published_at);
    }

    #[test]
    fn test_malformed_timestamp_skipped() {
        let mut feed = sample_feed();
        feed.push(json!({
            "title": "Broken",
            "time_published": "not-a-timestamp",
            "summary": "",
            "url": "",
            "source": ""
        }));
        feed.push(json!({
            "title": "Missing timestamp",
            "summary": "",
            "url": "",
            "source": ""
        }));

        let records = parse_news_feed(&feed, "TSLA");
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_non_numeric_relevance_defaults() {
        let feed = vec![json!({
            "title": "Odd relevance",
            "time_published": "20250604T120000",
            "summary": "",
            "url": "",
            "source": "Wire",
            "ticker_sentiment": [{
                "ticker": "TSLA",
                "relevance_score": "not_a_number",
                "ticker_sentiment_score": "bad",
                "ticker_sentiment_label": "Bullish"
            }]
        })];

        let records = parse_news_feed(&feed, "TSLA");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].relevance_score, 1.0);
        assert_eq!(records[0].sentiment_score, 0.0);
        assert_eq!(records[0].sentiment_label, SentimentLabel::Bullish);
    }

    #[test]
    fn test_missing_ticker_sentiment_defaults() {
        let feed = vec![
            json!({
                "title": "No sentiment block",
                "time_published": "20250604T120000",
                "summary": "",
                "url": "",
                "source": "Wire"
            }),
            json!({
                "title": "Other ticker only",
                "time_published": "20250604T130000",
                "summary": "",
                "url": "",
                "source": "Wire",
                "ticker_sentiment": [{
                    "ticker": "AAPL",
                    "relevance_score": "0.2",
                    "ticker_sentiment_score": "0.1",
                    "ticker_sentiment_label": "Bullish"
                }]
            }),
        ];

        let records = parse_news_feed(&feed, "TSLA");
        assert_eq!(records.len(), 2);
        for record in &records {
            assert_eq!(record.relevance_score, 1.0);
            assert_eq!(record.sentiment_score, 0.0);
            assert_eq!(record.sentiment_label, SentimentLabel::Neutral);
        }
    }

    #[test]
    fn test_trim_to_period_seven_days() {
        let today = Utc::now().date_naive();
        let records: Vec<PriceRecord> = (0..20)
            .map(|i| PriceRecord {
                date: today - Duration::days(i),
                open: 1.0,
                high: 1.0,
                low: 1.0,
                close: 1.0,
                volume: 0,
            })
            .rev()
            .collect();

        let month = trim_to_period(records.clone(), Period::OneMonth);
        assert_eq!(month.len(), 20);

        let week = trim_to_period(records, Period::SevenDays);
        assert_eq!(week.len(), 7);
        assert_eq!(week.last().map(|r| r.date), Some(today));
    }

    #[test]
    fn test_provider_creation() {
        let provider =
            AlphaVantageProvider::new("test_key", 5, CacheManager::default_config());
        assert_eq!(provider.name(), "alpha_vantage");
        assert_eq!(provider.api_key, "test_key");
    }
}
