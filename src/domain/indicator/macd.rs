//! MACD (Moving Average Convergence Divergence).
//!
//! - MACD line: EMA(fast) - EMA(slow), defaults 12/26
//! - Signal line: EMA(signal) of the MACD line, default 9
//! - Histogram: MACD - signal
//!
//! Built on the seeded EMA, so every row is defined from the first bar.

use super::ema::calculate_ema;

/// The three MACD output columns, each the length of the input.
#[derive(Debug, Clone)]
pub struct MacdColumns {
    pub macd: Vec<f64>,
    pub signal: Vec<f64>,
    pub histogram: Vec<f64>,
}

pub fn calculate_macd(
    closes: &[f64],
    fast_period: usize,
    slow_period: usize,
    signal_period: usize,
) -> MacdColumns {
    let fast = calculate_ema(closes, fast_period);
    let slow = calculate_ema(closes, slow_period);

    let macd: Vec<f64> = fast.iter().zip(&slow).map(|(f, s)| f - s).collect();
    let signal = calculate_ema(&macd, signal_period);
    let histogram: Vec<f64> = macd.iter().zip(&signal).map(|(m, s)| m - s).collect();

    MacdColumns {
        macd,
        signal,
        histogram,
    }
}
