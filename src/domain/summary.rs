//! Per-ticker performance summary, computed once the ledger is complete.

use chrono::NaiveDate;

use super::backtest::BacktestResult;
use super::signal::SignalRow;

#[derive(Debug, Clone)]
pub struct PerformanceSummary {
    pub ticker: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub initial_capital: f64,
    pub final_value: f64,
    pub return_pct: f64,
    pub win_rate: f64,
    pub trade_count: usize,
}

/// Fold a finished backtest into its summary. `None` for an empty series.
pub fn build_summary(
    ticker: &str,
    signals: &[SignalRow],
    result: &BacktestResult,
) -> Option<PerformanceSummary> {
    let first = signals.first()?;
    let last = signals.last()?;

    Some(PerformanceSummary {
        ticker: ticker.to_string(),
        start_date: first.row.bar.date,
        end_date: last.row.bar.date,
        initial_capital: result.initial_capital,
        final_value: result.final_value,
        return_pct: result.total_return * 100.0,
        win_rate: result.win_rate,
        trade_count: result.trade_count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::backtest::run_backtest;
    use crate::domain::bar::Bar;
    use crate::domain::indicators::IndicatorRow;
    use crate::domain::signal::{Position, Signal};

    fn make_signal_row(day: u32, close: f64, signal: Signal) -> SignalRow {
        SignalRow {
            row: IndicatorRow {
                bar: Bar {
                    ticker: "TEST".into(),
                    date: NaiveDate::from_ymd_opt(2024, 6, day).unwrap(),
                    open: close,
                    high: close,
                    low: close,
                    close,
                    volume: 1_000,
                },
                rsi: 50.0,
                ma_short: close,
                ma_long: Some(close),
                macd: 0.0,
                macd_signal: 0.0,
                macd_histogram: 0.0,
                volume_ma: Some(1_000.0),
                volume_ratio: Some(1.0),
                bb_upper: Some(close),
                bb_middle: Some(close),
                bb_lower: Some(close),
            },
            signal,
            position: Position::Flat,
        }
    }

    #[test]
    fn empty_series_has_no_summary() {
        let result = run_backtest(&[], 100_000.0);
        assert!(build_summary("TEST", &[], &result).is_none());
    }

    #[test]
    fn summary_covers_the_full_range() {
        let signals = vec![
            make_signal_row(1, 250.0, Signal::Buy),
            make_signal_row(15, 275.0, Signal::Hold),
            make_signal_row(30, 300.0, Signal::Sell),
        ];
        let result = run_backtest(&signals, 100_000.0);
        let summary = build_summary("TCS", &signals, &result).unwrap();

        assert_eq!(summary.ticker, "TCS");
        assert_eq!(summary.start_date, NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
        assert_eq!(summary.end_date, NaiveDate::from_ymd_opt(2024, 6, 30).unwrap());
        assert!((summary.return_pct - 20.0).abs() < 1e-9);
        assert_eq!(summary.trade_count, 1);
        assert!((summary.win_rate - 1.0).abs() < f64::EPSILON);
    }
}
