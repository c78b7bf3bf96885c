// =============================================================================
// Technical Indicators Module
// =============================================================================
//
// Pure, side-effect-free implementations of the overlay indicators served by
// the charting API. Every function returns a series with exactly the same
// length as its input; positions inside the warm-up window hold `None` so
// callers can never confuse "not yet computable" with an actual value.

pub mod bollinger;
pub mod ema;
pub mod macd;
pub mod rsi;
pub mod sma;
