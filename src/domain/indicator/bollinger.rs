//! Bollinger Bands.
//!
//! - Middle: SMA over n periods
//! - Upper: middle + (multiplier * stddev)
//! - Lower: middle - (multiplier * stddev)
//!
//! StdDev is population standard deviation (divides by N, not N-1).
//! Warmup: first (period-1) rows are `None`.

/// Upper/middle/lower band columns, each the length of the input.
#[derive(Debug, Clone)]
pub struct BollingerColumns {
    pub upper: Vec<Option<f64>>,
    pub middle: Vec<Option<f64>>,
    pub lower: Vec<Option<f64>>,
}

pub fn calculate_bollinger(closes: &[f64], period: usize, multiplier: f64) -> BollingerColumns {
    let mut columns = BollingerColumns {
        upper: Vec::with_capacity(closes.len()),
        middle: Vec::with_capacity(closes.len()),
        lower: Vec::with_capacity(closes.len()),
    };

    for i in 0..closes.len() {
        if period == 0 || i + 1 < period {
            columns.upper.push(None);
            columns.middle.push(None);
            columns.lower.push(None);
            continue;
        }

        let window = &closes[i + 1 - period..=i];
        let mean = window.iter().sum::<f64>() / period as f64;
        let variance = window
            .iter()
            .map(|close| {
                let diff = close - mean;
                diff * diff
            })
            .sum::<f64>()
            / period as f64;
        let stddev = variance.sqrt();

        columns.upper.push(Some(mean + multiplier * stddev));
        columns.middle.push(Some(mean));
        columns.lower.push(Some(mean - multiplier * stddev));
    }

    columns
}
