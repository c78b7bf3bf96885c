// =============================================================================
// Indicator Engine — validated dispatch over a price series
// =============================================================================
//
// Ties the catalog and the indicator math together: a request names an
// indicator and supplies raw parameter values; the engine checks the series
// preconditions, validates the parameters against the spec, runs the
// computation, and returns named columns aligned one-to-one with the input
// dates. Warm-up positions are `None` and serialise as JSON null.
//
// Every operation is a pure, stateless transform. Nothing is cached between
// calls; concurrent callers need no coordination.
// =============================================================================

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use serde::Serialize;
use serde_json::Value;

use crate::catalog;
use crate::error::EngineError;
use crate::indicators::bollinger::calculate_bollinger;
use crate::indicators::ema::calculate_ema;
use crate::indicators::macd::calculate_macd;
use crate::indicators::rsi::calculate_rsi;
use crate::indicators::sma::calculate_sma;
use crate::types::PricePoint;

// =============================================================================
// Output type
// =============================================================================

/// One indicator's derived series: named columns keyed to the input dates.
///
/// Every column has exactly `dates.len()` entries; positions inside a warm-up
/// window hold `None`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorSeries {
    pub indicator: String,
    pub dates: Vec<NaiveDate>,
    pub columns: BTreeMap<String, Vec<Option<f64>>>,
}

// =============================================================================
// Series preconditions
// =============================================================================

/// Check the invariants every engine input must satisfy: strictly ascending
/// dates (which also rules out duplicates) and finite OHLC prices.
pub fn validate_series(series: &[PricePoint]) -> Result<(), EngineError> {
    for (i, point) in series.iter().enumerate() {
        let finite = point.open.is_finite()
            && point.high.is_finite()
            && point.low.is_finite()
            && point.close.is_finite();
        if !finite {
            return Err(EngineError::NonFinitePrice { index: i });
        }
        if i > 0 && series[i - 1].date >= point.date {
            return Err(EngineError::SeriesNotAscending { index: i });
        }
    }
    Ok(())
}

// =============================================================================
// Dispatch
// =============================================================================

/// Compute the indicator `id` over `series` with the caller's raw parameters.
///
/// Parameters the caller omits take their catalog defaults. Validation
/// failures (malformed series, unknown id, bad parameter) are reported
/// before computation starts.
pub fn compute(
    series: &[PricePoint],
    id: &str,
    raw_params: &HashMap<String, Value>,
) -> Result<IndicatorSeries, EngineError> {
    validate_series(series)?;

    let spec = catalog::find(id)?;
    let params = catalog::validate_params(&spec, raw_params)?;

    let closes: Vec<f64> = series.iter().map(|p| p.close).collect();
    let dates: Vec<NaiveDate> = series.iter().map(|p| p.date).collect();

    let mut columns = BTreeMap::new();
    match spec.id {
        "sma" => {
            let period = params.integer("period")? as usize;
            columns.insert("sma".to_string(), calculate_sma(&closes, period)?);
        }
        "ema" => {
            let period = params.integer("period")? as usize;
            let ema = calculate_ema(&closes, period)?;
            columns.insert("ema".to_string(), ema.into_iter().map(Some).collect());
        }
        "bb" => {
            let period = params.integer("period")? as usize;
            let num_std = params.number("stdDev")?;
            let bands = calculate_bollinger(&closes, period, num_std)?;
            columns.insert(
                "upperBB".to_string(),
                bands.iter().map(|b| b.map(|b| b.upper)).collect(),
            );
            columns.insert(
                "middleBB".to_string(),
                bands.iter().map(|b| b.map(|b| b.middle)).collect(),
            );
            columns.insert(
                "lowerBB".to_string(),
                bands.iter().map(|b| b.map(|b| b.lower)).collect(),
            );
        }
        "rsi" => {
            let period = params.integer("period")? as usize;
            columns.insert("rsi".to_string(), calculate_rsi(&closes, period)?);
        }
        "macd" => {
            let fast = params.integer("fastPeriod")? as usize;
            let slow = params.integer("slowPeriod")? as usize;
            let signal = params.integer("signalPeriod")? as usize;
            let macd = calculate_macd(&closes, fast, slow, signal)?;
            columns.insert(
                "macd".to_string(),
                macd.iter().map(|p| Some(p.macd)).collect(),
            );
            columns.insert(
                "signal".to_string(),
                macd.iter().map(|p| Some(p.signal)).collect(),
            );
            columns.insert(
                "histogram".to_string(),
                macd.iter().map(|p| Some(p.histogram)).collect(),
            );
        }
        other => {
            return Err(EngineError::UnknownIndicator {
                id: other.to_string(),
            });
        }
    }

    Ok(IndicatorSeries {
        indicator: spec.id.to_string(),
        dates,
        columns,
    })
}
