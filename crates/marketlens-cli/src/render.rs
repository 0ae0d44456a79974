//! Terminal rendering for analysis output

use chrono::NaiveDate;
use comfy_table::{Cell, Color, Table, modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL};
use marketlens_core::{AssociatedNews, Narrative, PriceSeries};
use marketlens_narrative::Locale;

/// Progressive output sink for a pipeline run
pub trait Renderer: Send + Sync {
    /// Price history overview with signal markers
    fn price_table(
        &self,
        symbol: &str,
        company_name: &str,
        series: &PriceSeries,
        signals: &[NaiveDate],
        locale: &Locale,
    );

    /// No dates met the move threshold
    fn no_signals(&self, locale: &Locale);

    /// Progress notice before the per-date narrative loop
    fn eta_notice(&self, signal_count: usize, locale: &Locale);

    /// One signal date's narrative and news details
    fn date_analysis(
        &self,
        date: NaiveDate,
        pct_change: f64,
        associated: &AssociatedNews,
        locale: &Locale,
    );
}

/// Resolve a narrative outcome to display text for a locale
pub fn narrative_text(narrative: &Narrative, locale: &Locale) -> String {
    match narrative {
        Narrative::Generated(text) => text.clone(),
        Narrative::NoNews => locale.no_news.to_string(),
        Narrative::MissingCredential => locale.no_api_key.to_string(),
        Narrative::Failed(detail) => format!("{}: {}", locale.error_prefix, detail),
    }
}

/// Renders to stdout with `comfy-table`
#[derive(Debug, Default)]
pub struct TerminalRenderer;

impl TerminalRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for TerminalRenderer {
    fn price_table(
        &self,
        symbol: &str,
        company_name: &str,
        series: &PriceSeries,
        signals: &[NaiveDate],
        locale: &Locale,
    ) {
        println!("\n{} ({symbol}) - {}", company_name, locale.chart_title);

        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .apply_modifier(UTF8_ROUND_CORNERS)
            .set_header(vec![
                Cell::new(locale.date).fg(Color::Cyan),
                Cell::new(locale.close_price).fg(Color::Cyan),
                Cell::new(locale.price_change).fg(Color::Cyan),
                Cell::new(locale.signal).fg(Color::Cyan),
            ]);

        for row in series.rows() {
            let change = match row.pct_change {
                Some(pct) => format!("{pct:+.2}%"),
                None => "-".to_string(),
            };
            let change_cell = match row.pct_change {
                Some(pct) if pct >= 0.0 => Cell::new(change).fg(Color::Green),
                Some(_) => Cell::new(change).fg(Color::Red),
                None => Cell::new(change),
            };
            let marker = if signals.contains(&row.date) {
                match row.pct_change {
                    Some(pct) if pct >= 0.0 => Cell::new("▲").fg(Color::Green),
                    _ => Cell::new("▼").fg(Color::Red),
                }
            } else {
                Cell::new("")
            };
            table.add_row(vec![
                Cell::new(row.date.to_string()),
                Cell::new(format!("{:.2}", row.close)),
                change_cell,
                marker,
            ]);
        }

        println!("{table}");
    }

    fn no_signals(&self, locale: &Locale) {
        println!("\n{}", locale.no_signals);
        println!("{}", locale.try_lower_threshold);
    }

    fn eta_notice(&self, signal_count: usize, locale: &Locale) {
        println!("\n{}", locale.eta_notice(signal_count));
        println!("\n== {} ==", locale.analysis_title);
    }

    fn date_analysis(
        &self,
        date: NaiveDate,
        pct_change: f64,
        associated: &AssociatedNews,
        locale: &Locale,
    ) {
        let date_str = date.format(locale.date_format).to_string();
        let change_str = format!("{pct_change:+.2}%");
        println!("\n--- {} ---", locale.analysis_heading(&date_str, &change_str));
        println!("{}", narrative_text(&associated.narrative, locale));

        println!("\n{}:", locale.news_details_title);
        if associated.news.is_empty() {
            println!("  {}", locale.no_news_threshold);
            return;
        }
        for item in &associated.news {
            println!(
                "  [{}] {} ({})",
                item.published_at.format("%Y-%m-%d %H:%M"),
                item.title,
                item.source,
            );
            println!(
                "    {}: {}  {}: {:.2}",
                locale.sentiment, item.sentiment_label, locale.relevance, item.relevance_score,
            );
            if item.url.is_empty() {
                println!("    {}", locale.no_url_available);
            } else {
                println!("    {}: {}", locale.read_full_article, item.url);
            }
        }
    }
}

/// Discards all output; used by pipeline tests
#[derive(Debug, Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn price_table(
        &self,
        _symbol: &str,
        _company_name: &str,
        _series: &PriceSeries,
        _signals: &[NaiveDate],
        _locale: &Locale,
    ) {
    }

    fn no_signals(&self, _locale: &Locale) {}

    fn eta_notice(&self, _signal_count: usize, _locale: &Locale) {}

    fn date_analysis(
        &self,
        _date: NaiveDate,
        _pct_change: f64,
        _associated: &AssociatedNews,
        _locale: &Locale,
    ) {
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use marketlens_narrative::{Language, locale_for};

    #[test]
    fn test_narrative_text_generated() {
        let locale = locale_for(&Language::English);
        let text = narrative_text(&Narrative::Generated("Explanation.".to_string()), locale);
        assert_eq!(text, "Explanation.");
    }

    #[test]
    fn test_narrative_text_sentinels() {
        let en = locale_for(&Language::English);
        assert_eq!(narrative_text(&Narrative::NoNews, en), en.no_news);
        assert_eq!(
            narrative_text(&Narrative::MissingCredential, en),
            en.no_api_key
        );
        let failed = narrative_text(&Narrative::Failed("timeout".to_string()), en);
        assert!(failed.starts_with(en.error_prefix));
        assert!(failed.contains("timeout"));
    }

    #[test]
    fn test_narrative_text_localized() {
        let zh = locale_for(&Language::Chinese);
        assert_eq!(narrative_text(&Narrative::NoNews, zh), zh.no_news);
    }

    #[test]
    fn test_date_analysis_renders_empty_news() {
        // The details section falls back to the threshold notice
        let renderer = TerminalRenderer::new();
        let associated = AssociatedNews {
            news: vec![],
            narrative: Narrative::NoNews,
        };
        let date = chrono::NaiveDate::from_ymd_opt(2025, 6, 4).unwrap();
        renderer.date_analysis(date, -9.52, &associated, locale_for(&Language::English));
    }
}
