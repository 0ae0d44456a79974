//! News association for signal dates
//!
//! Selects the news items relevant to one flagged date: published inside the
//! lookback window and scoring at or above the relevance threshold, ordered
//! by relevance descending and then by publish time descending.

use crate::model::NewsRecord;
use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use std::cmp::Ordering;

/// The inclusive UTC window for a signal date's news
///
/// Spans `[start_of_day(signal_date - days_before), end_of_day(signal_date)]`.
pub fn association_window(
    signal_date: NaiveDate,
    days_before: u32,
) -> (DateTime<Utc>, DateTime<Utc>) {
    let start_date = signal_date - Duration::days(i64::from(days_before));
    let end_of_day = NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(NaiveTime::MIN);
    (
        start_date.and_time(NaiveTime::MIN).and_utc(),
        signal_date.and_time(end_of_day).and_utc(),
    )
}

/// Select and order the news relevant to one signal date
///
/// An item is included iff its publish timestamp falls inside the window
/// (bounds inclusive) and `relevance_score >= relevance_threshold`. The result
/// is sorted most relevant first, ties broken by most recent first. An empty
/// result is valid; the caller decides how to surface "no relevant news".
pub fn associate_news(
    news: &[NewsRecord],
    signal_date: NaiveDate,
    days_before: u32,
    relevance_threshold: f64,
) -> Vec<NewsRecord> {
    let (start, end) = association_window(signal_date, days_before);

    let mut selected: Vec<NewsRecord> = news
        .iter()
        .filter(|item| {
            item.published_at >= start
                && item.published_at <= end
                && item.relevance_score >= relevance_threshold
        })
        .cloned()
        .collect();

    selected.sort_by(|a, b| {
        b.relevance_score
            .partial_cmp(&a.relevance_score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| b.published_at.cmp(&a.published_at))
    });

    selected
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SentimentLabel;
    use chrono::TimeZone;

    fn item(published_at: DateTime<Utc>, relevance: f64, title: &str) -> NewsRecord {
        NewsRecord {
            published_at,
            title: title.to_string(),
            summary: String::new(),
            url: String::new(),
            source: String::new(),
            relevance_score: relevance,
            sentiment_score: 0.0,
            sentiment_label: SentimentLabel::Neutral,
        }
    }

    fn ts(day: u32, hour: u32, min: u32, sec: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, day, hour, min, sec).unwrap()
    }

    fn signal_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 4).unwrap()
    }

    #[test]
    fn test_window_bounds() {
        let (start, end) = association_window(signal_date(), 2);
        assert_eq!(start, ts(2, 0, 0, 0));
        assert_eq!(end, ts(4, 23, 59, 59));
    }

    #[test]
    fn test_boundary_timestamps_included() {
        let (start, end) = association_window(signal_date(), 1);
        let news = vec![
            item(start, 1.0, "at start"),
            item(end, 1.0, "at end"),
            item(start - Duration::seconds(1), 1.0, "before start"),
            item(end + Duration::seconds(1), 1.0, "after end"),
        ];
        let selected = associate_news(&news, signal_date(), 1, 0.0);
        let titles: Vec<&str> = selected.iter().map(|n| n.title.as_str()).collect();
        assert_eq!(titles, vec!["at end", "at start"]);
    }

    #[test]
    fn test_relevance_filter() {
        let news = vec![
            item(ts(4, 10, 0, 0), 0.29, "below"),
            item(ts(4, 11, 0, 0), 0.3, "at threshold"),
            item(ts(4, 12, 0, 0), 0.8, "above"),
        ];
        let selected = associate_news(&news, signal_date(), 0, 0.3);
        let titles: Vec<&str> = selected.iter().map(|n| n.title.as_str()).collect();
        assert_eq!(titles, vec!["above", "at threshold"]);
    }

    #[test]
    fn test_order_relevance_then_recency() {
        // Two same-day items at 0.9 and 0.5, plus a tie broken by recency
        let news = vec![
            item(ts(4, 9, 0, 0), 0.5, "less relevant"),
            item(ts(4, 8, 0, 0), 0.9, "more relevant"),
            item(ts(4, 15, 0, 0), 0.9, "more relevant, later"),
        ];
        let selected = associate_news(&news, signal_date(), 0, 0.0);
        let titles: Vec<&str> = selected.iter().map(|n| n.title.as_str()).collect();
        assert_eq!(
            titles,
            vec!["more relevant, later", "more relevant", "less relevant"]
        );
    }

    #[test]
    fn test_empty_result_is_valid() {
        let news = vec![item(ts(1, 10, 0, 0), 1.0, "too old")];
        let selected = associate_news(&news, signal_date(), 0, 0.0);
        assert!(selected.is_empty());

        let selected = associate_news(&[], signal_date(), 3, 0.5);
        assert!(selected.is_empty());
    }

    #[test]
    fn test_zero_lookback_is_single_day() {
        let news = vec![
            item(ts(3, 23, 59, 59), 1.0, "day before"),
            item(ts(4, 0, 0, 0), 1.0, "signal day start"),
        ];
        let selected = associate_news(&news, signal_date(), 0, 0.0);
        let titles: Vec<&str> = selected.iter().map(|n| n.title.as_str()).collect();
        assert_eq!(titles, vec!["signal day start"]);
    }
}
