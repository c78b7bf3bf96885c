// =============================================================================
// Bollinger Bands
// =============================================================================
//
// Bollinger Bands consist of a middle band (SMA), an upper band (SMA + k*σ),
// and a lower band (SMA - k*σ), where σ is the *population* standard
// deviation of the closes over the same trailing window.
//
// The bands share the SMA's warm-up: undefined until `i >= period - 1`.
// =============================================================================

use crate::error::EngineError;
use crate::indicators::sma::calculate_sma;

/// One bar's Bollinger Band values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BollingerBands {
    pub upper: f64,
    pub middle: f64,
    pub lower: f64,
}

/// Compute the Bollinger Band series for the given `closes`, look-back
/// `period`, and band width `num_std` (the `k` in SMA ± k·σ).
///
/// The result has the same length as `closes`; indices inside the warm-up
/// window hold `None`, in lockstep with the SMA.
///
/// # Errors
/// - `period == 0` => [`EngineError::NonPositivePeriod`]
pub fn calculate_bollinger(
    closes: &[f64],
    period: usize,
    num_std: f64,
) -> Result<Vec<Option<BollingerBands>>, EngineError> {
    let sma = calculate_sma(closes, period)?;

    let result = sma
        .iter()
        .enumerate()
        .map(|(i, middle)| {
            middle.map(|middle| {
                let window = &closes[i + 1 - period..=i];
                let variance =
                    window.iter().map(|x| (x - middle).powi(2)).sum::<f64>() / period as f64;
                let std_dev = variance.sqrt();

                BollingerBands {
                    upper: middle + num_std * std_dev,
                    middle,
                    lower: middle - num_std * std_dev,
                }
            })
        })
        .collect();

    Ok(result)
}
