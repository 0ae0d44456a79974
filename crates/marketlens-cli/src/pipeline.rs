//! The end-to-end analysis pipeline
//!
//! Sequential flow: fetch prices, detect significant moves, and for each
//! flagged date fetch news, associate it, and generate a narrative. Price and
//! news fetch failures abort the run; narrative failures become sentinel
//! values and the run continues.

use crate::render::Renderer;
use anyhow::{Context, Result};
use chrono::{Duration, NaiveDate};
use marketlens_core::{
    AnalysisRequest, AssociatedNews, Association, PriceSeries, associate_news,
    detect_significant_moves,
};
use marketlens_narrative::{Language, NarrativeGenerator, locale_for};
use marketlens_providers::{MarketDataProvider, NewsQuery};
use std::sync::Arc;
use tracing::{debug, info};

/// The full result of one analysis run
#[derive(Debug)]
pub struct Analysis {
    pub symbol: String,
    pub company_name: String,
    pub series: PriceSeries,
    pub signals: Vec<NaiveDate>,
    pub association: Association,
}

/// Wires providers, detector, associator and generator into one run
pub struct Pipeline {
    price_provider: Arc<dyn MarketDataProvider>,
    news_provider: Arc<dyn MarketDataProvider>,
    generator: NarrativeGenerator,
}

impl Pipeline {
    pub fn new(
        price_provider: Arc<dyn MarketDataProvider>,
        news_provider: Arc<dyn MarketDataProvider>,
        generator: NarrativeGenerator,
    ) -> Self {
        Self {
            price_provider,
            news_provider,
            generator,
        }
    }

    /// Run one analysis, rendering output progressively
    pub async fn run(&self, request: &AnalysisRequest, renderer: &dyn Renderer) -> Result<Analysis> {
        request.validate()?;
        let language = Language::from_code(&request.language);
        let locale = locale_for(&language);

        info!(
            symbol = %request.symbol,
            provider = self.price_provider.name(),
            period_days = request.period.days(),
            "fetching price history"
        );
        let fetch = self
            .price_provider
            .fetch_prices(&request.symbol, request.period)
            .await
            .with_context(|| format!("price fetch failed for {}", request.symbol))?;

        let mut series = fetch.series;
        let signals = detect_significant_moves(&mut series, request.move_threshold)?;
        info!(
            symbol = %request.symbol,
            rows = series.len(),
            signals = signals.len(),
            threshold = request.move_threshold,
            "move detection complete"
        );

        renderer.price_table(&request.symbol, &fetch.company_name, &series, &signals, locale);

        if signals.is_empty() {
            renderer.no_signals(locale);
            return Ok(Analysis {
                symbol: request.symbol.clone(),
                company_name: fetch.company_name,
                series,
                signals,
                association: Association::new(),
            });
        }

        renderer.eta_notice(signals.len(), locale);

        let mut association = Association::new();
        for &date in &signals {
            let from = date - Duration::days(i64::from(request.lookback_days));
            let query = NewsQuery {
                symbol: request.symbol.clone(),
                company_name: fetch.company_name.clone(),
                from,
                to: date,
            };
            debug!(
                symbol = %request.symbol,
                provider = self.news_provider.name(),
                %date,
                "fetching news for signal date"
            );
            let news = self
                .news_provider
                .fetch_news(&query)
                .await
                .with_context(|| format!("news fetch failed for {} on {}", request.symbol, date))?;

            let selected = associate_news(
                &news,
                date,
                request.lookback_days,
                request.relevance_threshold,
            );
            let pct_change = series.pct_change_on(date).unwrap_or(0.0);
            let narrative = self
                .generator
                .explain(&selected, date, pct_change, &request.symbol)
                .await;

            let associated = AssociatedNews {
                news: selected,
                narrative,
            };
            renderer.date_analysis(date, pct_change, &associated, locale);
            association.insert(date, associated);
        }

        Ok(Analysis {
            symbol: request.symbol.clone(),
            company_name: fetch.company_name,
            series,
            signals,
            association,
        })
    }
}
