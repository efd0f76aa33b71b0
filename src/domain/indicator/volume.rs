//! Volume ratio: current volume over its trailing average.
//!
//! Ratio of each bar's volume to the SMA of volume over the window. When the
//! average volume is zero the ratio is 1.0, a neutral sentinel so thinly
//! traded stretches never divide by zero or fabricate a spike.
//! Warmup: first (period-1) rows are `None`.

use super::sma::calculate_sma;

pub fn calculate_volume_ratio(volumes: &[i64], period: usize) -> Vec<Option<f64>> {
    let as_f64: Vec<f64> = volumes.iter().map(|v| *v as f64).collect();
    let averages = calculate_sma(&as_f64, period);

    as_f64
        .iter()
        .zip(averages)
        .map(|(volume, average)| {
            average.map(|avg| if avg == 0.0 { 1.0 } else { volume / avg })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn warmup_rows() {
        let values = calculate_volume_ratio(&[100, 100, 100], 3);
        assert_eq!(values[0], None);
        assert_eq!(values[1], None);
        assert!(values[2].is_some());
    }

    #[test]
    fn steady_volume_is_ratio_one() {
        let values = calculate_volume_ratio(&[500, 500, 500, 500], 3);
        assert!((values[3].unwrap() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn spike_shows_above_one() {
        let values = calculate_volume_ratio(&[100, 100, 100, 400], 3);
        // 400 / mean(100, 100, 400) = 2.0
        assert!((values[3].unwrap() - 2.0).abs() < 1e-9);
    }

    #[test]
    fn zero_average_volume_is_neutral() {
        let values = calculate_volume_ratio(&[0, 0, 0], 3);
        assert!((values[2].unwrap() - 1.0).abs() < f64::EPSILON);
    }
}
