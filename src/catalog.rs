// =============================================================================
// Indicator Catalog — declarative specs + parameter validation
// =============================================================================
//
// Each indicator the API exposes is described by an `IndicatorSpec`: its
// parameters, their kinds, defaults, and bounds. The dashboard renders its
// configuration panel straight from this catalog, and every user-supplied
// parameter value is validated against it before any computation runs.
//
// Out-of-range values are rejected with a typed error naming the offending
// parameter; nothing is ever clamped into range.
// =============================================================================

use std::collections::HashMap;

use serde::Serialize;
use serde_json::Value;

use crate::error::EngineError;

// =============================================================================
// Spec types
// =============================================================================

/// Kind, default, and bounds of a single indicator parameter.
///
/// Periods are `Integer` (fractional look-backs are meaningless and get
/// rejected); the Bollinger band width is `Number`; `Select` covers
/// enumerated choices validated by option membership.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ParameterKind {
    Integer { default: i64, min: i64, max: i64 },
    Number { default: f64, min: f64, max: f64 },
    Select { default: String, options: Vec<String> },
}

/// A single parameter of an indicator.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParameterSpec {
    pub id: &'static str,
    pub name: &'static str,
    #[serde(flatten)]
    pub kind: ParameterKind,
}

/// Everything the API needs to describe one indicator.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorSpec {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub parameters: Vec<ParameterSpec>,
    #[serde(rename = "defaultVisible")]
    pub default_visible: bool,
}

// =============================================================================
// The catalog
// =============================================================================

/// All indicators the engine computes, in display order.
pub fn all() -> Vec<IndicatorSpec> {
    vec![
        IndicatorSpec {
            id: "sma",
            name: "Simple Moving Average",
            description: "Average price over a specified number of periods",
            parameters: vec![ParameterSpec {
                id: "period",
                name: "Period",
                kind: ParameterKind::Integer {
                    default: 20,
                    min: 2,
                    max: 200,
                },
            }],
            default_visible: true,
        },
        IndicatorSpec {
            id: "ema",
            name: "Exponential Moving Average",
            description: "Weighted average with more focus on recent prices",
            parameters: vec![ParameterSpec {
                id: "period",
                name: "Period",
                kind: ParameterKind::Integer {
                    default: 20,
                    min: 2,
                    max: 200,
                },
            }],
            default_visible: false,
        },
        IndicatorSpec {
            id: "bb",
            name: "Bollinger Bands",
            description: "Volatility bands placed above and below a moving average",
            parameters: vec![
                ParameterSpec {
                    id: "period",
                    name: "Period",
                    kind: ParameterKind::Integer {
                        default: 20,
                        min: 2,
                        max: 100,
                    },
                },
                ParameterSpec {
                    id: "stdDev",
                    name: "Standard Deviations",
                    kind: ParameterKind::Number {
                        default: 2.0,
                        min: 1.0,
                        max: 4.0,
                    },
                },
            ],
            default_visible: false,
        },
        IndicatorSpec {
            id: "rsi",
            name: "Relative Strength Index",
            description: "Momentum oscillator measuring speed and change of price movements",
            parameters: vec![ParameterSpec {
                id: "period",
                name: "Period",
                kind: ParameterKind::Integer {
                    default: 14,
                    min: 2,
                    max: 50,
                },
            }],
            default_visible: false,
        },
        IndicatorSpec {
            id: "macd",
            name: "MACD",
            description: "Trend-following momentum indicator showing relationship between two moving averages",
            parameters: vec![
                ParameterSpec {
                    id: "fastPeriod",
                    name: "Fast Period",
                    kind: ParameterKind::Integer {
                        default: 12,
                        min: 2,
                        max: 50,
                    },
                },
                ParameterSpec {
                    id: "slowPeriod",
                    name: "Slow Period",
                    kind: ParameterKind::Integer {
                        default: 26,
                        min: 2,
                        max: 100,
                    },
                },
                ParameterSpec {
                    id: "signalPeriod",
                    name: "Signal Period",
                    kind: ParameterKind::Integer {
                        default: 9,
                        min: 2,
                        max: 50,
                    },
                },
            ],
            default_visible: false,
        },
    ]
}

/// Look up a spec by indicator id.
pub fn find(id: &str) -> Result<IndicatorSpec, EngineError> {
    all()
        .into_iter()
        .find(|spec| spec.id == id)
        .ok_or_else(|| EngineError::UnknownIndicator { id: id.to_string() })
}

// =============================================================================
// Validated parameter values
// =============================================================================

/// A parameter value that has passed validation against its spec.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Integer(i64),
    Number(f64),
    Choice(String),
}

/// Parameter map with every value validated and every default filled in.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedParams {
    values: HashMap<String, ParamValue>,
}

impl ValidatedParams {
    /// Fetch an integer parameter (periods).
    pub fn integer(&self, id: &str) -> Result<i64, EngineError> {
        match self.values.get(id) {
            Some(ParamValue::Integer(v)) => Ok(*v),
            _ => Err(EngineError::ParameterType {
                param: id.to_string(),
                expected: "a whole number",
            }),
        }
    }

    /// Fetch a numeric parameter; integers widen to f64.
    pub fn number(&self, id: &str) -> Result<f64, EngineError> {
        match self.values.get(id) {
            Some(ParamValue::Number(v)) => Ok(*v),
            Some(ParamValue::Integer(v)) => Ok(*v as f64),
            _ => Err(EngineError::ParameterType {
                param: id.to_string(),
                expected: "a number",
            }),
        }
    }
}

// =============================================================================
// Validation
// =============================================================================

/// Validate a single raw parameter value against the spec that declares it.
///
/// Returns the accepted, typed value or a rejection naming the exact problem.
/// Values are never clamped into range.
pub fn validate_parameter(
    spec: &IndicatorSpec,
    param_id: &str,
    value: &Value,
) -> Result<ParamValue, EngineError> {
    let param = spec
        .parameters
        .iter()
        .find(|p| p.id == param_id)
        .ok_or_else(|| EngineError::UnknownParameter {
            indicator: spec.id.to_string(),
            param: param_id.to_string(),
        })?;

    match &param.kind {
        ParameterKind::Integer { min, max, .. } => {
            let number = value.as_f64().ok_or_else(|| EngineError::ParameterType {
                param: param_id.to_string(),
                expected: "a number",
            })?;
            if number.fract() != 0.0 {
                return Err(EngineError::ParameterNotInteger {
                    param: param_id.to_string(),
                    value: number,
                });
            }
            let int = number as i64;
            if int < *min || int > *max {
                return Err(EngineError::ParameterOutOfBounds {
                    param: param_id.to_string(),
                    value: number,
                    min: *min as f64,
                    max: *max as f64,
                });
            }
            Ok(ParamValue::Integer(int))
        }
        ParameterKind::Number { min, max, .. } => {
            let number = value.as_f64().ok_or_else(|| EngineError::ParameterType {
                param: param_id.to_string(),
                expected: "a number",
            })?;
            if number < *min || number > *max {
                return Err(EngineError::ParameterOutOfBounds {
                    param: param_id.to_string(),
                    value: number,
                    min: *min,
                    max: *max,
                });
            }
            Ok(ParamValue::Number(number))
        }
        ParameterKind::Select { options, .. } => {
            let choice = value.as_str().ok_or_else(|| EngineError::ParameterType {
                param: param_id.to_string(),
                expected: "a string",
            })?;
            if !options.iter().any(|o| o == choice) {
                return Err(EngineError::ParameterNotAnOption {
                    param: param_id.to_string(),
                    value: choice.to_string(),
                    options: options.join(", "),
                });
            }
            Ok(ParamValue::Choice(choice.to_string()))
        }
    }
}

/// Validate a full raw parameter map for `spec`.
///
/// Supplied values are validated individually; parameters the caller omitted
/// take their declared defaults; keys the spec does not declare are rejected.
pub fn validate_params(
    spec: &IndicatorSpec,
    raw: &HashMap<String, Value>,
) -> Result<ValidatedParams, EngineError> {
    for key in raw.keys() {
        if !spec.parameters.iter().any(|p| p.id == key) {
            return Err(EngineError::UnknownParameter {
                indicator: spec.id.to_string(),
                param: key.clone(),
            });
        }
    }

    let mut values = HashMap::new();
    for param in &spec.parameters {
        let value = match raw.get(param.id) {
            Some(supplied) => validate_parameter(spec, param.id, supplied)?,
            None => match &param.kind {
                ParameterKind::Integer { default, .. } => ParamValue::Integer(*default),
                ParameterKind::Number { default, .. } => ParamValue::Number(*default),
                ParameterKind::Select { default, .. } => ParamValue::Choice(default.clone()),
            },
        };
        values.insert(param.id.to_string(), value);
    }

    Ok(ValidatedParams { values })
}
