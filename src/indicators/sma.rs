// =============================================================================
// Simple Moving Average (SMA)
// =============================================================================
//
// The unweighted mean of the trailing `period` closes. The value at index `i`
// is defined iff `i >= period - 1`; earlier indices hold `None` because the
// look-back window is not yet fully available.
//
// Accumulation is plain f64 summation per window. At daily-chart lengths (a
// few thousand points) precision loss is negligible and no compensated
// summation is attempted.
// =============================================================================

use crate::error::EngineError;

/// Compute the SMA series for the given `closes` slice and look-back `period`.
///
/// The result always has the same length as `closes`. A `period` longer than
/// the series is legal and yields an all-`None` result.
///
/// # Errors
/// - `period == 0` => [`EngineError::NonPositivePeriod`]
pub fn calculate_sma(closes: &[f64], period: usize) -> Result<Vec<Option<f64>>, EngineError> {
    if period == 0 {
        return Err(EngineError::NonPositivePeriod);
    }

    let mut result = Vec::with_capacity(closes.len());
    for i in 0..closes.len() {
        if i + 1 < period {
            result.push(None);
        } else {
            let window = &closes[i + 1 - period..=i];
            let sum: f64 = window.iter().sum();
            result.push(Some(sum / period as f64));
        }
    }

    Ok(result)
}
