//! Exponential Moving Average.
//!
//! Recursive form seeded from the first observation:
//! - y[0] = x[0]
//! - y[i] = (1 - a) * y[i-1] + a * x[i], where a = 2 / (period + 1)
//!
//! Defined from the first bar, so there is no warmup and the output is a
//! plain `f64` column.

/// EMA of `values` with multiplier 2 / (period + 1).
pub fn calculate_ema(values: &[f64], period: usize) -> Vec<f64> {
    let alpha = 2.0 / (period as f64 + 1.0);
    let mut out = Vec::with_capacity(values.len());
    let mut prev = 0.0;

    for (i, value) in values.iter().enumerate() {
        prev = if i == 0 {
            *value
        } else {
            (1.0 - alpha) * prev + alpha * value
        };
        out.push(prev);
    }

    out
}
