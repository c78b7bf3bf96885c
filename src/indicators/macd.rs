// =============================================================================
// Moving Average Convergence Divergence (MACD)
// =============================================================================
//
// Trend-following momentum indicator built from three EMAs:
//
//   macd      = EMA(close, fast) - EMA(close, slow)
//   signal    = EMA(macd, signal_period)
//   histogram = macd - signal
//
// Because this engine's EMA is seeded with the first value (see ema.rs), all
// three lines are defined at every index.
// =============================================================================

use crate::error::EngineError;
use crate::indicators::ema::calculate_ema;

/// One bar's MACD values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MacdPoint {
    pub macd: f64,
    pub signal: f64,
    pub histogram: f64,
}

/// Compute the MACD series for the given `closes` and the three periods.
///
/// The result has the same length as `closes` and is defined at every index.
///
/// # Errors
/// - any period `== 0` => [`EngineError::NonPositivePeriod`]
/// - `fast >= slow` => [`EngineError::PeriodOrder`] (the fast EMA must react
///   quicker than the slow one for the difference to be meaningful)
pub fn calculate_macd(
    closes: &[f64],
    fast: usize,
    slow: usize,
    signal_period: usize,
) -> Result<Vec<MacdPoint>, EngineError> {
    if fast == 0 || slow == 0 || signal_period == 0 {
        return Err(EngineError::NonPositivePeriod);
    }
    if fast >= slow {
        return Err(EngineError::PeriodOrder { fast, slow });
    }

    let fast_ema = calculate_ema(closes, fast)?;
    let slow_ema = calculate_ema(closes, slow)?;

    let macd_line: Vec<f64> = fast_ema
        .iter()
        .zip(slow_ema.iter())
        .map(|(f, s)| f - s)
        .collect();

    let signal_line = calculate_ema(&macd_line, signal_period)?;

    let result = macd_line
        .iter()
        .zip(signal_line.iter())
        .map(|(&macd, &signal)| MacdPoint {
            macd,
            signal,
            histogram: macd - signal,
        })
        .collect();

    Ok(result)
}
