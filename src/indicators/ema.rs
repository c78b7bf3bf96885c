// =============================================================================
// Exponential Moving Average (EMA)
// =============================================================================
//
// EMA gives more weight to recent prices, making it more responsive to new
// information than the Simple Moving Average (SMA).
//
// Formula:
//   alpha  = 2 / (period + 1)
//   EMA_0  = close_0
//   EMA_t  = close_t * alpha + EMA_{t-1} * (1 - alpha)
//
// Seeding with the first close means the series is defined at every index,
// with no warm-up gap. Early values are biased toward the seed until roughly
// `period` bars have passed.
// =============================================================================

use crate::error::EngineError;

/// Compute the EMA series for the given `closes` slice and look-back `period`.
///
/// The result has the same length as `closes` and is defined at every index,
/// with `ema[0] == closes[0]`.
///
/// # Errors
/// - `period == 0` => [`EngineError::NonPositivePeriod`]
pub fn calculate_ema(closes: &[f64], period: usize) -> Result<Vec<f64>, EngineError> {
    if period == 0 {
        return Err(EngineError::NonPositivePeriod);
    }

    let alpha = 2.0 / (period + 1) as f64;

    let mut result = Vec::with_capacity(closes.len());
    let mut prev: Option<f64> = None;
    for &close in closes {
        let ema = match prev {
            None => close,
            Some(p) => close * alpha + p * (1.0 - alpha),
        };
        result.push(ema);
        prev = Some(ema);
    }

    Ok(result)
}
