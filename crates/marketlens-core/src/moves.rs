//! Significant move detection
//!
//! Computes day-over-day percentage changes on a price series and flags the
//! dates whose absolute change meets a caller-supplied threshold.

use crate::error::{CoreError, Result};
use crate::model::PriceSeries;
use chrono::NaiveDate;
use tracing::debug;

/// Flag the dates whose absolute day-over-day change meets `threshold_pct`
///
/// `threshold_pct` is in percentage points (5.0 means 5%). The derived
/// `prev_close`/`pct_change` columns are attached to the series so downstream
/// consumers (chart, narrative prompt) read the same figures without
/// recomputation. The first row has no prior close and is never flagged.
///
/// Returns the qualifying dates in ascending date order. Running the detector
/// twice on the same series yields identical results.
///
/// # Errors
///
/// `CoreError::Threshold` if `threshold_pct` is negative or not a number.
pub fn detect_significant_moves(
    series: &mut PriceSeries,
    threshold_pct: f64,
) -> Result<Vec<NaiveDate>> {
    if !threshold_pct.is_finite() || threshold_pct < 0.0 {
        return Err(CoreError::Threshold(threshold_pct));
    }

    let mut prev_close: Option<f64> = None;
    for row in series.rows_mut() {
        row.prev_close = prev_close;
        row.pct_change = prev_close.map(|prev| (row.close / prev - 1.0) * 100.0);
        prev_close = Some(row.close);
    }

    let signals: Vec<NaiveDate> = series
        .rows()
        .iter()
        .filter(|row| row.pct_change.is_some_and(|pct| pct.abs() >= threshold_pct))
        .map(|row| row.date)
        .collect();

    debug!(
        threshold_pct,
        rows = series.len(),
        signals = signals.len(),
        "move detection complete"
    );

    Ok(signals)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PriceRecord;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, day).unwrap()
    }

    fn record(day: u32, close: f64) -> PriceRecord {
        PriceRecord {
            date: date(day),
            open: close,
            high: close,
            low: close,
            close,
            volume: 1000,
        }
    }

    fn series(closes: &[(u32, f64)]) -> PriceSeries {
        PriceSeries::from_records(closes.iter().map(|&(d, c)| record(d, c)).collect())
            .unwrap()
    }

    #[test]
    fn test_pct_change_columns() {
        let mut s = series(&[(2, 100.0), (3, 105.0), (4, 95.0)]);
        detect_significant_moves(&mut s, 100.0).unwrap();

        let rows = s.rows();
        assert_eq!(rows[0].prev_close, None);
        assert_eq!(rows[0].pct_change, None);
        assert_eq!(rows[1].prev_close, Some(100.0));
        assert!((rows[1].pct_change.unwrap() - 5.0).abs() < 1e-9);
        assert_eq!(rows[2].prev_close, Some(105.0));
        assert!((rows[2].pct_change.unwrap() - (-9.523_809_523_809_52)).abs() < 1e-9);
    }

    #[test]
    fn test_three_day_series_threshold_four() {
        // 100 -> 105 is +5%, 105 -> 95 is -9.52%
        let mut s = series(&[(2, 100.0), (3, 105.0), (4, 95.0)]);
        let signals = detect_significant_moves(&mut s, 4.0).unwrap();
        assert_eq!(signals, vec![date(3), date(4)]);
    }

    #[test]
    fn test_three_day_series_threshold_ten() {
        let mut s = series(&[(2, 100.0), (3, 105.0), (4, 95.0)]);
        let signals = detect_significant_moves(&mut s, 10.0).unwrap();
        assert_eq!(signals, Vec::<NaiveDate>::new());

        // 105 -> 94 is -10.48%, past the threshold
        let mut s = series(&[(2, 100.0), (3, 105.0), (4, 94.0)]);
        let signals = detect_significant_moves(&mut s, 10.0).unwrap();
        assert_eq!(signals, vec![date(4)]);
    }

    #[test]
    fn test_empty_series() {
        let mut s = series(&[]);
        let signals = detect_significant_moves(&mut s, 5.0).unwrap();
        assert!(signals.is_empty());
    }

    #[test]
    fn test_single_row_never_flagged() {
        let mut s = series(&[(2, 100.0)]);
        let signals = detect_significant_moves(&mut s, 0.0).unwrap();
        assert!(signals.is_empty());
    }

    #[test]
    fn test_zero_threshold_flags_all_but_first() {
        let mut s = series(&[(2, 100.0), (3, 100.0), (4, 101.0)]);
        let signals = detect_significant_moves(&mut s, 0.0).unwrap();
        assert_eq!(signals, vec![date(3), date(4)]);
    }

    #[test]
    fn test_negative_threshold_rejected() {
        let mut s = series(&[(2, 100.0), (3, 105.0)]);
        assert!(detect_significant_moves(&mut s, -1.0).is_err());
        assert!(detect_significant_moves(&mut s, f64::NAN).is_err());
    }

    #[test]
    fn test_monotonicity() {
        let mut s = series(&[(2, 100.0), (3, 105.0), (4, 95.0), (5, 96.0), (6, 110.0)]);
        let loose = detect_significant_moves(&mut s, 1.0).unwrap();
        let tight = detect_significant_moves(&mut s, 9.0).unwrap();
        assert!(tight.iter().all(|d| loose.contains(d)));
    }

    #[test]
    fn test_idempotence() {
        let mut s = series(&[(2, 100.0), (3, 105.0), (4, 95.0)]);
        let first = detect_significant_moves(&mut s, 4.0).unwrap();
        let rows_after_first = s.rows().to_vec();
        let second = detect_significant_moves(&mut s, 4.0).unwrap();
        assert_eq!(first, second);
        assert_eq!(s.rows(), rows_after_first.as_slice());
    }

    #[test]
    fn test_signals_are_series_members() {
        let mut s = series(&[(2, 100.0), (3, 105.0), (4, 95.0)]);
        let signals = detect_significant_moves(&mut s, 4.0).unwrap();
        assert!(signals.iter().all(|d| s.contains_date(*d)));
    }
}
