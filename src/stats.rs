//! Summary statistics over edge weights.

use crate::error::{RankError, Result};

/// Degrees of freedom removed from the sample variance divisor (Bessel's
/// correction).
pub const BESSEL_CORRECTION: usize = 1;

/// Computes the arithmetic mean of a slice of values. Returns 0.0 for empty input.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation given a pre-computed mean, dividing by
/// `n - BESSEL_CORRECTION`.
///
/// # Errors
///
/// Returns [`RankError::InsufficientData`] when fewer than two values are
/// given.
pub fn sample_stddev(values: &[f64], mean: f64) -> Result<f64> {
    if values.len() <= BESSEL_CORRECTION {
        return Err(RankError::InsufficientData(format!(
            "sample standard deviation needs at least 2 values, got {}",
            values.len()
        )));
    }
    let divisor = (values.len() - BESSEL_CORRECTION) as f64;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / divisor;

    Ok(variance.sqrt())
}
