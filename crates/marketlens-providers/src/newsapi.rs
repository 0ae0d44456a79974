//! NewsAPI provider (news only)
//!
//! NewsAPI articles carry no relevance or sentiment data, so every record
//! gets the documented defaults: relevance 1.0, sentiment 0.0, Neutral.

use crate::cache::{CacheKey, CacheManager};
use crate::error::{ProviderError, Result};
use crate::provider::{MarketDataProvider, NewsQuery, PriceFetch};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use marketlens_core::{NewsRecord, Period, SentimentLabel};
use reqwest::Client;
use std::collections::{BTreeMap, HashMap};
use std::num::NonZeroU32;
use std::sync::Arc;
use tracing::debug;

const BASE_URL: &str = "https://newsapi.org/v2/everything";

type SharedRateLimiter = Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>;

/// NewsAPI client implementing the news capability
#[derive(Clone)]
pub struct NewsApiProvider {
    client: Client,
    api_key: String,
    rate_limiter: SharedRateLimiter,
    cache: CacheManager,
}

impl NewsApiProvider {
    /// Create a new provider with API key and per-minute rate limit
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

    /// Create from the NEWSAPI_API_KEY environment variable
    pub fn from_env(cache: CacheManager) -> Result<Self> {
        let api_key = std::env::var("NEWSAPI_API_KEY").map_err(|_| {
            ProviderError::Config("NEWSAPI_API_KEY environment variable not set".to_string())
        })?;
        Ok(Self::new(api_key, 60, cache))
    }
}

#[async_trait]
impl MarketDataProvider for NewsApiProvider {
    fn name(&self) -> &'static str {
        "newsapi"
    }

    async fn fetch_prices(&self, _symbol: &str, _period: Period) -> Result<PriceFetch> {
        Err(ProviderError::Unsupported {
            provider: "newsapi",
            capability: "fetch_prices",
        })
    }

    async fn fetch_news(&self, query: &NewsQuery) -> Result<Vec<NewsRecord>> {
        let mut params = HashMap::new();
        params.insert("language", "en".to_string());
        params.insert("q", query.company_name.clone());
        params.insert("from", format!("{}T00:00:00", query.from));
        params.insert("to", format!("{}T23:59:59", query.to));
        params.insert("sortBy", "relevancy".to_string());

        // BTreeMap gives a stable serialization order for the key
        let key_params: BTreeMap<&str, &String> =
            params.iter().map(|(k, v)| (*k, v)).collect();
        let key = CacheKey::new(&query.company_name, "everything", &key_params);
        params.insert("apiKey", self.api_key.clone());

        let data = self
            .cache
            .news
            .get_or_fetch(key, || async {
                self.rate_limiter.until_ready().await;

                let response = self.client.get(BASE_URL).query(&params).send().await?;

                if !response.status().is_success() {
                    let status = response.status();
                    let body = response.text().await.unwrap_or_default();
                    return Err(ProviderError::Api(format!(
                        "NewsAPI error {status}: {body}"
                    )));
                }

                Ok(response.json::<serde_json::Value>().await?)
            })
            .await?;

        let articles = data
            .get("articles")
            .and_then(|v| v.as_array())
            .ok_or_else(|| {
                ProviderError::Api(format!("unexpected NewsAPI response: {data}"))
            })?;

        Ok(parse_articles(articles))
    }
}

/// Normalize NewsAPI articles into records
///
/// Articles with a malformed or missing `publishedAt` are skipped.
pub fn parse_articles(articles: &[serde_json::Value]) -> Vec<NewsRecord> {
    let mut records = Vec::with_capacity(articles.len());

    for entry in articles {
        let Some(published_at) = entry
            .get("publishedAt")
            .and_then(|v| v.as_str())
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|dt| dt.with_timezone(&Utc))
        else {
            debug!(?entry, "skipping article with malformed timestamp");
            continue;
        };

        records.push(NewsRecord {
            published_at,
            title: string_field(entry, "title"),
            summary: string_field(entry, "description"),
            url: string_field(entry, "url"),
            source: entry
                .get("source")
                .and_then(|s| s.get("name"))
                .and_then(|v| v.as_str())
                .unwrap_or_default()
                .to_string(),
            relevance_score: 1.0,
            sentiment_score: 0.0,
            sentiment_label: SentimentLabel::Neutral,
        });
    }

    records
}

fn string_field(entry: &serde_json::Value, field: &str) -> String {
    entry
        .get(field)
        .and_then(|v| v.as_str())
        .unwrap_or_default()
        .to_string()
}
