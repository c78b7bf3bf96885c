// =============================================================================
// Relative Strength Index (RSI) — Wilder's Smoothing
// =============================================================================
//
// RSI measures the speed and magnitude of recent price changes to evaluate
// whether an asset is overbought or oversold.
//
// Step 1 — Compute price changes (deltas) from consecutive closes.
// Step 2 — Seed average gain / average loss with the SMA of the first `period`
//          gains / losses.
// Step 3 — Apply Wilder's exponential smoothing:
//            avg_gain = (prev_avg_gain * (period - 1) + current_gain) / period
//            avg_loss = (prev_avg_loss * (period - 1) + current_loss) / period
// Step 4 — RS  = avg_gain / avg_loss
//          RSI = 100 - 100 / (1 + RS)
//
// When the average loss is zero (no down moves in the window) RSI is pinned
// to 100. The first defined value sits at index `period`: the preceding
// closes only provide the `period` deltas needed to seed the averages.
// =============================================================================

use crate::error::EngineError;

/// Compute the RSI series for the given `closes` slice and look-back `period`.
///
/// The result has the same length as `closes`; indices `< period` hold `None`.
/// A series shorter than `period + 1` closes yields an all-`None` result.
///
/// # Errors
/// - `period == 0` => [`EngineError::NonPositivePeriod`]
pub fn calculate_rsi(closes: &[f64], period: usize) -> Result<Vec<Option<f64>>, EngineError> {
    if period == 0 {
        return Err(EngineError::NonPositivePeriod);
    }

    let mut result = vec![None; closes.len()];
    if closes.len() < period + 1 {
        return Ok(result);
    }

    let deltas: Vec<f64> = closes.windows(2).map(|w| w[1] - w[0]).collect();

    // Seed averages with the SMA of the first `period` deltas.
    let (sum_gain, sum_loss) = deltas[..period]
        .iter()
        .fold((0.0_f64, 0.0_f64), |(g, l), &d| {
            if d > 0.0 {
                (g + d, l)
            } else {
                (g, l + d.abs())
            }
        });

    let period_f = period as f64;
    let mut avg_gain = sum_gain / period_f;
    let mut avg_loss = sum_loss / period_f;

    result[period] = Some(rsi_from_averages(avg_gain, avg_loss));

    // Wilder's smoothing for subsequent values.
    for (j, &d) in deltas.iter().enumerate().skip(period) {
        let (gain, loss) = if d > 0.0 { (d, 0.0) } else { (0.0, d.abs()) };
        avg_gain = (avg_gain * (period_f - 1.0) + gain) / period_f;
        avg_loss = (avg_loss * (period_f - 1.0) + loss) / period_f;
        result[j + 1] = Some(rsi_from_averages(avg_gain, avg_loss));
    }

    Ok(result)
}

/// RSI from smoothed averages, pinned to 100 when there are no losses.
fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        return 100.0;
    }
    let rs = avg_gain / avg_loss;
    100.0 - 100.0 / (1.0 + rs)
}

// =============================================================================
// Unit Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_period() {
        assert_eq!(
            calculate_rsi(&[1.0, 2.0], 0),
            Err(EngineError::NonPositivePeriod)
        );
    }

    #[test]
    fn too_short_series_is_all_none() {
        let rsi = calculate_rsi(&[1.0, 2.0, 3.0], 14).unwrap();
        assert_eq!(rsi, vec![None, None, None]);
    }

    #[test]
    fn first_value_sits_at_index_period() {
        let closes: Vec<f64> = (1..=20).map(|x| x as f64).collect();
        let rsi = calculate_rsi(&closes, 14).unwrap();
        assert_eq!(rsi.len(), closes.len());
        for (i, v) in rsi.iter().enumerate() {
            assert_eq!(v.is_some(), i >= 14);
        }
    }

    #[test]
    fn all_gains_pins_to_100() {
        let closes: Vec<f64> = (1..=30).map(|x| x as f64).collect();
        let rsi = calculate_rsi(&closes, 14).unwrap();
        assert_eq!(rsi[14], Some(100.0));
        assert_eq!(*rsi.last().unwrap(), Some(100.0));
    }

    #[test]
    fn all_losses_drives_toward_zero() {
        let closes: Vec<f64> = (1..=30).rev().map(|x| x as f64).collect();
        let rsi = calculate_rsi(&closes, 14).unwrap();
        let last = rsi.last().unwrap().unwrap();
        assert!(last < 1.0, "expected near-zero RSI, got {last}");
    }

    #[test]
    fn alternating_series_stays_in_midrange() {
        let closes: Vec<f64> = (0..40)
            .map(|i| if i % 2 == 0 { 100.0 } else { 101.0 })
            .collect();
        let rsi = calculate_rsi(&closes, 14).unwrap();
        let last = rsi.last().unwrap().unwrap();
        assert!(last > 30.0 && last < 70.0, "got {last}");
    }

    #[test]
    fn values_are_bounded() {
        let closes = [5.0, 9.0, 2.0, 7.0, 1.0, 8.0, 3.0, 6.0, 4.0, 10.0];
        let rsi = calculate_rsi(&closes, 3).unwrap();
        for v in rsi.iter().flatten() {
            assert!((0.0..=100.0).contains(v));
        }
    }
}
