//! Indicator engine: derives the full indicator table for one bar series.
//!
//! Runs every column calculation from [`super::indicator`], discards the
//! warmup rows where RSI or the short moving average is still undefined,
//! then forward-fills the remaining optional columns. After the trim a row
//! always has rsi, ma_short and the MACD family; ma_long (and the volume and
//! Bollinger columns on unusual window choices) stay `None` until their own
//! warmup completes.

use super::bar::Bar;
use super::config::IndicatorConfig;
use super::error::BasketraderError;
use super::indicator::{
    calculate_bollinger, calculate_macd, calculate_rsi, calculate_sma, calculate_volume_ratio,
};

/// One bar joined with every indicator column.
#[derive(Debug, Clone)]
pub struct IndicatorRow {
    pub bar: Bar,
    pub rsi: f64,
    pub ma_short: f64,
    pub ma_long: Option<f64>,
    pub macd: f64,
    pub macd_signal: f64,
    pub macd_histogram: f64,
    pub volume_ma: Option<f64>,
    pub volume_ratio: Option<f64>,
    pub bb_upper: Option<f64>,
    pub bb_middle: Option<f64>,
    pub bb_lower: Option<f64>,
}

/// Compute the indicator table for `bars`.
///
/// Returns `InsufficientData` when the series is too short to produce a
/// single post-warmup row. The caller is expected to skip the ticker and
/// carry on with the rest of the basket.
pub fn compute_indicators(
    ticker: &str,
    bars: &[Bar],
    config: &IndicatorConfig,
) -> Result<Vec<IndicatorRow>, BasketraderError> {
    // RSI needs rsi_window changes, the short SMA needs short_window closes.
    let minimum = (config.rsi_window + 1).max(config.short_window);
    if bars.len() < minimum {
        return Err(BasketraderError::InsufficientData {
            ticker: ticker.to_string(),
            bars: bars.len(),
            minimum,
        });
    }

    let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
    let volumes: Vec<i64> = bars.iter().map(|b| b.volume).collect();

    let rsi = calculate_rsi(&closes, config.rsi_window);
    let ma_short = calculate_sma(&closes, config.short_window);
    let ma_long = calculate_sma(&closes, config.long_window);
    let macd = calculate_macd(&closes, 12, 26, 9);
    let volume_f64: Vec<f64> = volumes.iter().map(|v| *v as f64).collect();
    let volume_ma = calculate_sma(&volume_f64, config.volume_window);
    let volume_ratio = calculate_volume_ratio(&volumes, config.volume_window);
    let bollinger = calculate_bollinger(&closes, config.bollinger_window, config.bollinger_mult);

    let start = (0..bars.len())
        .find(|&i| rsi[i].is_some() && ma_short[i].is_some())
        .ok_or_else(|| BasketraderError::InsufficientData {
            ticker: ticker.to_string(),
            bars: bars.len(),
            minimum,
        })?;

    let mut rows = Vec::with_capacity(bars.len() - start);
    for i in start..bars.len() {
        rows.push(IndicatorRow {
            bar: bars[i].clone(),
            rsi: rsi[i].unwrap_or(0.0),
            ma_short: ma_short[i].unwrap_or(0.0),
            ma_long: ma_long[i],
            macd: macd.macd[i],
            macd_signal: macd.signal[i],
            macd_histogram: macd.histogram[i],
            volume_ma: volume_ma[i],
            volume_ratio: volume_ratio[i],
            bb_upper: bollinger.upper[i],
            bb_middle: bollinger.middle[i],
            bb_lower: bollinger.lower[i],
        });
    }

    forward_fill(&mut rows);
    Ok(rows)
}

/// Carry each optional column's last seen value forward. Columns stay `None`
/// only ahead of their first defined value.
fn forward_fill(rows: &mut [IndicatorRow]) {
    let mut ma_long = None;
    let mut volume_ma = None;
    let mut volume_ratio = None;
    let mut bb_upper = None;
    let mut bb_middle = None;
    let mut bb_lower = None;

    for row in rows.iter_mut() {
        fill(&mut row.ma_long, &mut ma_long);
        fill(&mut row.volume_ma, &mut volume_ma);
        fill(&mut row.volume_ratio, &mut volume_ratio);
        fill(&mut row.bb_upper, &mut bb_upper);
        fill(&mut row.bb_middle, &mut bb_middle);
        fill(&mut row.bb_lower, &mut bb_lower);
    }
}

fn fill(cell: &mut Option<f64>, last: &mut Option<f64>) {
    match *cell {
        Some(value) => *last = Some(value),
        None => *cell = *last,
    }
}
