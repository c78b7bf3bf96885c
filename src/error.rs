// =============================================================================
// Engine Error Taxonomy
// =============================================================================
//
// Two failure classes exist: invalid caller input (bad parameter values,
// malformed series, unknown ids) and computation preconditions (degenerate
// periods). Everything is local and synchronous; nothing is retried and no
// error is fatal to the process. The REST layer maps both classes to 400.

use thiserror::Error;

/// Errors produced by the indicator engine and its parameter validation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error("unknown indicator: '{id}'")]
    UnknownIndicator { id: String },

    #[error("indicator '{indicator}' has no parameter '{param}'")]
    UnknownParameter { indicator: String, param: String },

    #[error("parameter '{param}' must be {expected}")]
    ParameterType { param: String, expected: &'static str },

    #[error("parameter '{param}' must be a whole number, got {value}")]
    ParameterNotInteger { param: String, value: f64 },

    #[error("parameter '{param}' must be between {min} and {max}, got {value}")]
    ParameterOutOfBounds {
        param: String,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("parameter '{param}' must be one of [{options}], got '{value}'")]
    ParameterNotAnOption {
        param: String,
        value: String,
        options: String,
    },

    #[error("series dates must be strictly ascending (violation at index {index})")]
    SeriesNotAscending { index: usize },

    #[error("series contains a non-finite price at index {index}")]
    NonFinitePrice { index: usize },

    #[error("period must be at least 1")]
    NonPositivePeriod,

    #[error("fast period ({fast}) must be shorter than slow period ({slow})")]
    PeriodOrder { fast: usize, slow: usize },
}

/// The two failure classes of the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// Caller-supplied input failed validation.
    Validation,
    /// A computation precondition does not hold.
    Precondition,
}

impl EngineError {
    /// Classify this error as input validation vs computation precondition.
    pub fn class(&self) -> ErrorClass {
        match self {
            Self::NonPositivePeriod | Self::PeriodOrder { .. } => ErrorClass::Precondition,
            _ => ErrorClass::Validation,
        }
    }
}
