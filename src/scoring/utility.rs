//! Weighted utility over several factors.

use super::error::ScoringError;
use tracing::trace;

/// Weighted mean of `factors`, normalized by the total weight.
///
/// A total weight of zero yields `0.0`, the minimum utility.
///
/// # Example
///
/// ```rust
/// use tickmind::scoring::weighted_utility;
///
/// let score = weighted_utility(&[1.0, 0.0], &[3.0, 1.0]).unwrap();
/// assert_eq!(score, 0.75);
/// ```
pub fn weighted_utility(factors: &[f32], weights: &[f32]) -> Result<f32, ScoringError> {
    if factors.len() != weights.len() {
        return Err(ScoringError::LengthMismatch {
            factors: factors.len(),
            weights: weights.len(),
        });
    }

    let (weighted_sum, weight_total) = factors
        .iter()
        .zip(weights)
        .fold((0.0_f32, 0.0_f32), |(sum, total), (factor, weight)| {
            (sum + factor * weight, total + weight)
        });

    if weight_total == 0.0 {
        trace!(factors = factors.len(), "total weight is zero, utility is 0");
        return Ok(0.0);
    }
    Ok(weighted_sum / weight_total)
}
