//! Command-line interface for marketlens

use anyhow::Result;
use clap::{Parser, ValueEnum};
use marketlens_cli::{Pipeline, TerminalRenderer};
use marketlens_core::{AnalysisRequest, Period};
use marketlens_narrative::{Language, NarrativeGenerator};
use marketlens_providers::{
    AlphaVantageProvider, CacheManager, MarketDataProvider, NewsApiProvider, YahooProvider,
};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PeriodArg {
    /// Last 7 trading days
    #[value(name = "7d")]
    SevenDays,
    /// Last month
    #[value(name = "1mo")]
    OneMonth,
}

impl From<PeriodArg> for Period {
    fn from(arg: PeriodArg) -> Self {
        match arg {
            PeriodArg::SevenDays => Period::SevenDays,
            PeriodArg::OneMonth => Period::OneMonth,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PriceSource {
    Yahoo,
    AlphaVantage,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum NewsSource {
    Newsapi,
    AlphaVantage,
}

#[derive(Parser, Debug)]
#[command(name = "marketlens")]
#[command(about = "Correlate significant stock price moves with news", long_about = None)]
struct Args {
    /// Ticker symbol, e.g. TSLA
    symbol: String,

    /// Price history period
    #[arg(long, value_enum, default_value = "1mo")]
    period: PeriodArg,

    /// Significant move threshold in percentage points
    #[arg(long, default_value_t = 5.0)]
    threshold: f64,

    /// Minimum relevance score for associated news (0.0 - 1.0)
    #[arg(long, default_value_t = 0.3)]
    relevance_threshold: f64,

    /// Days of news to include before each signal date (0 = signal day only)
    #[arg(long, default_value_t = 0)]
    lookback_days: u32,

    /// Output and narrative language
    #[arg(long, default_value = "en")]
    language: String,

    /// Price data source
    #[arg(long, value_enum, default_value = "yahoo")]
    price_source: PriceSource,

    /// News data source
    #[arg(long, value_enum, default_value = "newsapi")]
    news_source: NewsSource,
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let args = Args::parse();
    let cache = CacheManager::default_config();

    let price_provider: Arc<dyn MarketDataProvider> = match args.price_source {
        PriceSource::Yahoo => Arc::new(YahooProvider::new()),
        PriceSource::AlphaVantage => Arc::new(AlphaVantageProvider::from_env(cache.clone())?),
    };
    let news_provider: Arc<dyn MarketDataProvider> = match args.news_source {
        NewsSource::Newsapi => Arc::new(NewsApiProvider::from_env(cache.clone())?),
        NewsSource::AlphaVantage => Arc::new(AlphaVantageProvider::from_env(cache)?),
    };

    let language = Language::from_code(&args.language);
    let generator = NarrativeGenerator::from_env(language)?;

    let request = AnalysisRequest::builder()
        .symbol(args.symbol)
        .period(args.period.into())
        .move_threshold(args.threshold)
        .relevance_threshold(args.relevance_threshold)
        .lookback_days(args.lookback_days)
        .language(args.language)
        .build()?;

    info!(
        symbol = %request.symbol,
        prices = price_provider.name(),
        news = news_provider.name(),
        "starting analysis"
    );

    let pipeline = Pipeline::new(price_provider, news_provider, generator);
    pipeline.run(&request, &TerminalRenderer::new()).await?;

    Ok(())
}
