//! Backtest engine: replays signal rows against a single-position book.
//!
//! One forward pass with no lookahead. All-in sizing on entry, full exit on
//! sell, and a forced flush at the final bar so every run ends flat. Pure
//! computation with no I/O, so replaying the same input gives the same
//! ledger.

use chrono::NaiveDate;

use super::signal::{Position, Signal, SignalRow};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TradeSide {
    Buy,
    Sell,
}

impl std::fmt::Display for TradeSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TradeSide::Buy => write!(f, "BUY"),
            TradeSide::Sell => write!(f, "SELL"),
        }
    }
}

/// One ledger entry. The indicator context rides along for the trade log;
/// pnl is only present on the closing side.
#[derive(Debug, Clone)]
pub struct Trade {
    pub date: NaiveDate,
    pub side: TradeSide,
    pub price: f64,
    pub quantity: i64,
    pub pnl: Option<f64>,
    pub rsi: f64,
    pub ma_short: f64,
    pub ma_long: Option<f64>,
    pub macd: f64,
    pub volume_ratio: Option<f64>,
}

/// Ledger and headline metrics for one ticker's run.
#[derive(Debug, Clone)]
pub struct BacktestResult {
    pub trades: Vec<Trade>,
    pub initial_capital: f64,
    pub final_value: f64,
    pub total_return: f64,
    pub trade_count: usize,
    pub win_count: usize,
    pub win_rate: f64,
}

fn trade_from_row(row: &SignalRow, side: TradeSide, quantity: i64, pnl: Option<f64>) -> Trade {
    Trade {
        date: row.row.bar.date,
        side,
        price: row.row.bar.close,
        quantity,
        pnl,
        rsi: row.row.rsi,
        ma_short: row.row.ma_short,
        ma_long: row.row.ma_long,
        macd: row.row.macd,
        volume_ratio: row.row.volume_ratio,
    }
}

/// Replay `signals` starting from `initial_capital`.
///
/// A buy while flat commits floor(capital / close) shares; when that rounds
/// to zero the signal is a silent no-op. A position still open after the
/// last row is closed at the final close with the same accounting as a
/// signalled sell.
pub fn run_backtest(signals: &[SignalRow], initial_capital: f64) -> BacktestResult {
    let mut capital = initial_capital;
    let mut position_size: i64 = 0;
    let mut entry_price = 0.0;
    let mut trades: Vec<Trade> = Vec::new();
    let mut trade_count = 0usize;
    let mut win_count = 0usize;

    for signal_row in signals {
        let close = signal_row.row.bar.close;
        match signal_row.signal {
            Signal::Buy if position_size == 0 => {
                let quantity = (capital / close).floor() as i64;
                if quantity > 0 {
                    capital -= quantity as f64 * close;
                    position_size = quantity;
                    entry_price = close;
                    trades.push(trade_from_row(signal_row, TradeSide::Buy, quantity, None));
                }
            }
            Signal::Sell if position_size > 0 => {
                let pnl = (close - entry_price) * position_size as f64;
                capital += position_size as f64 * close;
                trades.push(trade_from_row(
                    signal_row,
                    TradeSide::Sell,
                    position_size,
                    Some(pnl),
                ));
                trade_count += 1;
                if pnl > 0.0 {
                    win_count += 1;
                }
                position_size = 0;
                entry_price = 0.0;
            }
            _ => {}
        }
    }

    // Flush: force-close anything still open at the last bar.
    if position_size > 0 {
        if let Some(last) = signals.last() {
            let close = last.row.bar.close;
            let pnl = (close - entry_price) * position_size as f64;
            capital += position_size as f64 * close;
            trades.push(trade_from_row(last, TradeSide::Sell, position_size, Some(pnl)));
            trade_count += 1;
            if pnl > 0.0 {
                win_count += 1;
            }
        }
    }

    let final_value = capital;
    let total_return = if initial_capital > 0.0 {
        (final_value - initial_capital) / initial_capital
    } else {
        0.0
    };
    let win_rate = if trade_count > 0 {
        win_count as f64 / trade_count as f64
    } else {
        0.0
    };

    BacktestResult {
        trades,
        initial_capital,
        final_value,
        total_return,
        trade_count,
        win_count,
        win_rate,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::bar::Bar;
    use crate::domain::indicators::IndicatorRow;

    fn make_signal_row(day: u32, close: f64, signal: Signal, position: Position) -> SignalRow {
        SignalRow {
            row: IndicatorRow {
                bar: Bar {
                    ticker: "TEST".into(),
                    date: chrono::NaiveDate::from_ymd_opt(2024, 6, day).unwrap(),
                    open: close,
                    high: close + 1.0,
                    low: close - 1.0,
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
                bb_upper: Some(close + 2.0),
                bb_middle: Some(close),
                bb_lower: Some(close - 2.0),
            },
            signal,
            position,
        }
    }

    #[test]
    fn empty_input_is_a_flat_run() {
        let result = run_backtest(&[], 100_000.0);
        assert!(result.trades.is_empty());
        assert_eq!(result.trade_count, 0);
        assert!((result.final_value - 100_000.0).abs() < f64::EPSILON);
        assert!(result.win_rate.abs() < f64::EPSILON);
    }

    #[test]
    fn round_trip_accounting() {
        // 100000 at 250 buys 400 shares and zeroes the cash; selling at 300
        // books a 20000 win.
        let signals = vec![
            make_signal_row(1, 250.0, Signal::Buy, Position::Long),
            make_signal_row(2, 300.0, Signal::Sell, Position::Flat),
        ];
        let result = run_backtest(&signals, 100_000.0);

        assert_eq!(result.trades.len(), 2);
        assert_eq!(result.trades[0].quantity, 400);
        assert_eq!(result.trades[0].pnl, None);
        assert_eq!(result.trades[1].quantity, 400);
        assert!((result.trades[1].pnl.unwrap() - 20_000.0).abs() < 1e-9);
        assert!((result.final_value - 120_000.0).abs() < 1e-9);
        assert!((result.total_return - 0.2).abs() < 1e-12);
        assert_eq!(result.trade_count, 1);
        assert!((result.win_rate - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn buy_price_above_capital_is_a_no_op() {
        let signals = vec![make_signal_row(1, 150_000.0, Signal::Buy, Position::Long)];
        let result = run_backtest(&signals, 100_000.0);
        assert!(result.trades.is_empty());
        assert!((result.final_value - 100_000.0).abs() < f64::EPSILON);
    }

    #[test]
    fn capital_never_negative_after_buy() {
        let signals = vec![make_signal_row(1, 333.0, Signal::Buy, Position::Long)];
        let result = run_backtest(&signals, 1_000.0);
        // 3 shares at 333, 1 left in cash.
        assert_eq!(result.trades[0].quantity, 3);
        assert!((result.final_value - 1_000.0).abs() < 1e-9);
    }

    #[test]
    fn open_position_flushes_at_final_bar() {
        let signals = vec![
            make_signal_row(1, 100.0, Signal::Buy, Position::Long),
            make_signal_row(2, 90.0, Signal::Hold, Position::Long),
            make_signal_row(3, 110.0, Signal::Hold, Position::Long),
        ];
        let result = run_backtest(&signals, 100_000.0);

        let flush = result.trades.last().unwrap();
        assert_eq!(flush.side, TradeSide::Sell);
        assert_eq!(flush.date, signals[2].row.bar.date);
        assert!((flush.price - 110.0).abs() < f64::EPSILON);
        assert_eq!(result.trade_count, 1);
        assert_eq!(result.win_count, 1);
    }

    #[test]
    fn buy_and_sell_counts_balance() {
        let signals = vec![
            make_signal_row(1, 100.0, Signal::Buy, Position::Long),
            make_signal_row(2, 105.0, Signal::Sell, Position::Flat),
            make_signal_row(3, 95.0, Signal::Buy, Position::Long),
            make_signal_row(4, 102.0, Signal::Hold, Position::Long),
        ];
        let result = run_backtest(&signals, 100_000.0);

        let buys = result
            .trades
            .iter()
            .filter(|t| t.side == TradeSide::Buy)
            .count();
        let sells = result
            .trades
            .iter()
            .filter(|t| t.side == TradeSide::Sell)
            .count();
        assert_eq!(buys, sells);
        assert_eq!(result.trade_count, 2);
    }

    #[test]
    fn sell_while_flat_is_ignored() {
        let signals = vec![make_signal_row(1, 100.0, Signal::Sell, Position::Flat)];
        let result = run_backtest(&signals, 100_000.0);
        assert!(result.trades.is_empty());
    }

    #[test]
    fn losing_trade_counts_against_win_rate() {
        let signals = vec![
            make_signal_row(1, 100.0, Signal::Buy, Position::Long),
            make_signal_row(2, 90.0, Signal::Sell, Position::Flat),
            make_signal_row(3, 90.0, Signal::Buy, Position::Long),
            make_signal_row(4, 99.0, Signal::Sell, Position::Flat),
        ];
        let result = run_backtest(&signals, 100_000.0);
        assert_eq!(result.trade_count, 2);
        assert_eq!(result.win_count, 1);
        assert!((result.win_rate - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn deterministic_over_same_input() {
        let signals = vec![
            make_signal_row(1, 100.0, Signal::Buy, Position::Long),
            make_signal_row(2, 110.0, Signal::Sell, Position::Flat),
        ];
        let a = run_backtest(&signals, 50_000.0);
        let b = run_backtest(&signals, 50_000.0);
        assert!((a.final_value - b.final_value).abs() < f64::EPSILON);
        assert_eq!(a.trades.len(), b.trades.len());
    }
}
