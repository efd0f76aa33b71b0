//! Simple Moving Average.
//!
//! Arithmetic mean of the trailing window. Warmup: the first (period-1)
//! rows are `None`.

/// SMA of `values` over `period`. Output length equals input length.
pub fn calculate_sma(values: &[f64], period: usize) -> Vec<Option<f64>> {
    if period == 0 {
        return vec![None; values.len()];
    }

    let mut out = Vec::with_capacity(values.len());
    let mut running = 0.0;

    for (i, value) in values.iter().enumerate() {
        running += value;
        if i >= period {
            running -= values[i - period];
        }
        if i + 1 >= period {
            out.push(Some(running / period as f64));
        } else {
            out.push(None);
        }
    }

    out
}
