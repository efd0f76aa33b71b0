//! Per-indicator column calculations.
//!
//! Each function takes a close (or volume) slice and returns a column the
//! same length as its input. Windowed indicators use `Option<f64>` with
//! `None` during warmup; the exponential family (EMA, MACD) is defined from
//! the first bar and returns plain `f64`.

pub mod bollinger;
pub mod ema;
pub mod macd;
pub mod rsi;
pub mod sma;
pub mod volume;

pub use bollinger::{calculate_bollinger, BollingerColumns};
pub use ema::calculate_ema;
pub use macd::{calculate_macd, MacdColumns};
pub use rsi::calculate_rsi;
pub use sma::calculate_sma;
pub use volume::calculate_volume_ratio;
