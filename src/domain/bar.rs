//! OHLCV bar representation.

use chrono::NaiveDate;

/// One time step of market data for a single ticker.
///
/// Dates are expected to be unique and strictly increasing within a series;
/// close must be positive (it is used as a divisor downstream).
#[derive(Debug, Clone)]
pub struct Bar {
    pub ticker: String,
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: i64,
}

/// Check that a bar series is chronological with positive closes.
/// Returns the index of the first offending bar, if any.
pub fn first_invalid_bar(bars: &[Bar]) -> Option<usize> {
    for (i, bar) in bars.iter().enumerate() {
        if bar.close <= 0.0 || bar.volume < 0 {
            return Some(i);
        }
        if i > 0 && bar.date <= bars[i - 1].date {
            return Some(i);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_bar() -> Bar {
        Bar {
            ticker: "RELIANCE".into(),
            date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            open: 100.0,
            high: 110.0,
            low: 90.0,
            close: 105.0,
            volume: 50_000,
        }
    }

    #[test]
    fn valid_series_passes() {
        let mut second = sample_bar();
        second.date = NaiveDate::from_ymd_opt(2024, 1, 16).unwrap();
        assert_eq!(first_invalid_bar(&[sample_bar(), second]), None);
    }

    #[test]
    fn duplicate_date_rejected() {
        let bars = vec![sample_bar(), sample_bar()];
        assert_eq!(first_invalid_bar(&bars), Some(1));
    }

    #[test]
    fn non_positive_close_rejected() {
        let mut bar = sample_bar();
        bar.close = 0.0;
        assert_eq!(first_invalid_bar(&[bar]), Some(0));
    }

    #[test]
    fn negative_volume_rejected() {
        let mut bar = sample_bar();
        bar.volume = -1;
        assert_eq!(first_invalid_bar(&[bar]), Some(0));
    }
}
