// =============================================================================
// Synthetic Market Data — seeded random-walk OHLCV series
// =============================================================================
//
// There is no real data feed. Chart data is fabricated: a uniform random walk
// on the close with open/high/low wicks hung off it and a uniform volume.
// The walk is fully deterministic: the RNG is seeded from a base seed and
// the symbol, so the same request always produces the same series and
// different symbols get different but reproducible walks.
//
// Output is always a valid engine input: one point per calendar day,
// strictly ascending, `days + 1` points ending on the anchor date.
// =============================================================================

use std::hash::{Hash, Hasher};

use chrono::{Days, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::runtime_config::SyntheticConfig;
use crate::types::PricePoint;

/// Derive a per-symbol seed from the base seed.
///
/// `DefaultHasher::new()` uses fixed keys, so derivation is stable across
/// process runs and independent of request order.
fn symbol_seed(base_seed: u64, symbol: &str) -> u64 {
    let mut hasher = std::collections::hash_map::DefaultHasher::new();
    base_seed.hash(&mut hasher);
    symbol.hash(&mut hasher);
    hasher.finish()
}

/// Generate a daily OHLCV series for `symbol`: `days + 1` points, one per
/// calendar day, ending on `end_date`.
pub fn generate_series(
    config: &SyntheticConfig,
    symbol: &str,
    base_seed: u64,
    days: u32,
    end_date: NaiveDate,
) -> Vec<PricePoint> {
    let mut rng = StdRng::seed_from_u64(symbol_seed(base_seed, symbol));

    let mut price = config.start_price;
    let mut series = Vec::with_capacity(days as usize + 1);

    for offset in (0..=days).rev() {
        let date = end_date - Days::new(u64::from(offset));

        let change = (rng.gen::<f64>() - 0.5) * config.daily_move;
        price += change;

        // Unit draws scaled by the configured ranges; a zero range is legal
        // and simply collapses the wick or pins the volume to its floor.
        let close = price;
        let open = close - rng.gen::<f64>() * config.wick_range;
        let high = open.max(close) + rng.gen::<f64>() * config.wick_range;
        let low = open.min(close) - rng.gen::<f64>() * config.wick_range;
        let volume = config.volume_floor + (rng.gen::<f64>() * config.volume_span as f64) as u64;

        series.push(PricePoint {
            date,
            open,
            high,
            low,
            close,
            volume,
        });
    }

    series
}

// =============================================================================
// Unit Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::validate_series;

    fn anchor() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 28).unwrap()
    }

    #[test]
    fn produces_days_plus_one_points() {
        let series = generate_series(&SyntheticConfig::default(), "AAPL", 42, 90, anchor());
        assert_eq!(series.len(), 91);
    }

    #[test]
    fn dates_are_consecutive_and_end_on_anchor() {
        let series = generate_series(&SyntheticConfig::default(), "AAPL", 42, 30, anchor());
        assert_eq!(series.last().unwrap().date, anchor());
        for w in series.windows(2) {
            assert_eq!(w[1].date, w[0].date + Days::new(1));
        }
    }

    #[test]
    fn is_a_valid_engine_input() {
        let series = generate_series(&SyntheticConfig::default(), "TSLA", 42, 365, anchor());
        assert_eq!(validate_series(&series), Ok(()));
    }

    #[test]
    fn bars_are_internally_consistent() {
        let series = generate_series(&SyntheticConfig::default(), "MSFT", 42, 200, anchor());
        for p in &series {
            assert!(p.high >= p.open && p.high >= p.close);
            assert!(p.low <= p.open && p.low <= p.close);
            assert!(p.volume >= 5_000_000 && p.volume < 15_000_000);
        }
    }

    #[test]
    fn same_inputs_reproduce_the_same_walk() {
        let cfg = SyntheticConfig::default();
        let a = generate_series(&cfg, "AAPL", 42, 60, anchor());
        let b = generate_series(&cfg, "AAPL", 42, 60, anchor());
        assert_eq!(a, b);
    }

    #[test]
    fn different_symbols_walk_differently() {
        let cfg = SyntheticConfig::default();
        let aapl = generate_series(&cfg, "AAPL", 42, 60, anchor());
        let msft = generate_series(&cfg, "MSFT", 42, 60, anchor());
        assert_ne!(aapl, msft);
    }

    #[test]
    fn different_seeds_walk_differently() {
        let cfg = SyntheticConfig::default();
        let a = generate_series(&cfg, "AAPL", 42, 60, anchor());
        let b = generate_series(&cfg, "AAPL", 43, 60, anchor());
        assert_ne!(a, b);
    }

    #[test]
    fn zero_days_yields_a_single_point() {
        let series = generate_series(&SyntheticConfig::default(), "AAPL", 42, 0, anchor());
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].date, anchor());
    }
}
