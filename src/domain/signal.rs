//! Signal engine: a single-pass state machine over indicator rows.
//!
//! Walks the series once, carrying the position forward. Each row fires at
//! most one signal; BUY rules are evaluated first and, when one fires, the
//! SELL rules are skipped for that row. There is no lookahead and no
//! revisiting, so a same-bar reversal cannot happen.

use super::config::SignalConfig;
use super::indicators::IndicatorRow;

/// Trading signal for one row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    Sell,
    Hold,
    Buy,
}

impl Signal {
    /// Conventional -1 / 0 / +1 encoding.
    pub fn as_i8(self) -> i8 {
        match self {
            Signal::Sell => -1,
            Signal::Hold => 0,
            Signal::Buy => 1,
        }
    }
}

/// Position carried between rows. The machine only knows flat or long;
/// shorting is not modelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    Flat,
    Long,
}

/// An indicator row plus the machine's decision for it.
#[derive(Debug, Clone)]
pub struct SignalRow {
    pub row: IndicatorRow,
    pub signal: Signal,
    pub position: Position,
}

/// Where ma_long is still in warmup, comparisons fall back to ma_short so
/// that every rule stays well-defined.
fn effective_ma_long(row: &IndicatorRow) -> f64 {
    row.ma_long.unwrap_or(row.ma_short)
}

/// Run the state machine over `rows`.
///
/// Row 0 is always Hold/Flat; it only seeds the cross detection. A series
/// without any defined ma_long (too short for the long window) switches
/// cross detection to close-versus-ma_short.
pub fn generate_signals(rows: &[IndicatorRow], config: &SignalConfig) -> Vec<SignalRow> {
    let has_long_ma = rows.iter().any(|row| row.ma_long.is_some());
    let mut out: Vec<SignalRow> = Vec::with_capacity(rows.len());

    for (i, row) in rows.iter().enumerate() {
        if i == 0 {
            out.push(SignalRow {
                row: row.clone(),
                signal: Signal::Hold,
                position: Position::Flat,
            });
            continue;
        }

        let prev = &rows[i - 1];
        let current_position = out[i - 1].position;
        let ma_long = effective_ma_long(row);

        let (golden_cross, death_cross) = if has_long_ma {
            let prev_long = effective_ma_long(prev);
            (
                prev.ma_short <= prev_long && row.ma_short > ma_long,
                prev.ma_short >= prev_long && row.ma_short < ma_long,
            )
        } else {
            (
                prev.bar.close <= prev.ma_short && row.bar.close > row.ma_short,
                prev.bar.close >= prev.ma_short && row.bar.close < row.ma_short,
            )
        };

        let buy = current_position == Position::Flat
            && ((row.rsi < config.rsi_strong_buy && row.ma_short > ma_long)
                || (golden_cross && row.rsi < config.rsi_momentum_buy)
                || (row.rsi < config.rsi_buy
                    && row.ma_short > ma_long
                    && row.bar.close > row.ma_short));

        let (signal, position) = if buy {
            (Signal::Buy, Position::Long)
        } else {
            let long = current_position == Position::Long;
            let sell = row.rsi > config.rsi_strong_sell
                || (death_cross && long)
                || (row.rsi > config.rsi_sell && row.ma_short < ma_long && long)
                || (row.bar.close < row.ma_short && row.ma_short < ma_long && long);

            if sell {
                (Signal::Sell, Position::Flat)
            } else {
                (Signal::Hold, current_position)
            }
        };

        out.push(SignalRow {
            row: row.clone(),
            signal,
            position,
        });
    }

    out
}

/// Heuristic 0-100 score for how strongly the indicators back a signal.
///
/// Starts at a neutral 50 and shifts on oversold/overbought RSI, the moving
/// average alignment, and price versus the short average. The alert sink
/// scales this to 0-1 and reports it as confidence.
pub fn signal_strength(row: &IndicatorRow) -> f64 {
    let mut score: f64 = 50.0;

    if row.rsi < 30.0 {
        score += 15.0;
    } else if row.rsi > 70.0 {
        score -= 15.0;
    }

    if row.ma_short > effective_ma_long(row) {
        score += 20.0;
    } else {
        score -= 20.0;
    }

    if row.bar.close > row.ma_short {
        score += 15.0;
    } else {
        score -= 15.0;
    }

    score.clamp(0.0, 100.0)
}
