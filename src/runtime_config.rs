// =============================================================================
// Runtime Configuration — service settings loaded from JSON
// =============================================================================
//
// Central configuration for the Strategy Lab backend. All fields carry
// `#[serde(default)]` so that adding new fields never breaks loading an older
// config file; a missing file falls back to defaults with a warning at the
// call site.
// =============================================================================

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

// =============================================================================
// Default-value helpers (required by serde `default = "..."` attribute)
// =============================================================================

fn default_bind_addr() -> String {
    "0.0.0.0:5000".to_string()
}

fn default_symbols() -> Vec<String> {
    vec![
        "AAPL".to_string(),
        "MSFT".to_string(),
        "GOOGL".to_string(),
        "AMZN".to_string(),
        "TSLA".to_string(),
    ]
}

fn default_chart_days() -> u32 {
    90
}

fn default_base_seed() -> u64 {
    42
}

fn default_start_price() -> f64 {
    150.0
}

fn default_daily_move() -> f64 {
    5.0
}

fn default_wick_range() -> f64 {
    2.0
}

fn default_volume_floor() -> u64 {
    5_000_000
}

fn default_volume_span() -> u64 {
    10_000_000
}

// =============================================================================
// SyntheticConfig
// =============================================================================

/// Tunables for the synthetic random-walk price generator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyntheticConfig {
    /// Price level the walk starts from.
    #[serde(default = "default_start_price")]
    pub start_price: f64,

    /// Width of the uniform daily move: each day shifts the price by a draw
    /// from `[-daily_move/2, +daily_move/2)`.
    #[serde(default = "default_daily_move")]
    pub daily_move: f64,

    /// Maximum distance of open/high/low from the close, drawn uniformly.
    #[serde(default = "default_wick_range")]
    pub wick_range: f64,

    /// Minimum daily volume.
    #[serde(default = "default_volume_floor")]
    pub volume_floor: u64,

    /// Width of the uniform volume range above the floor.
    #[serde(default = "default_volume_span")]
    pub volume_span: u64,
}

impl Default for SyntheticConfig {
    fn default() -> Self {
        Self {
            start_price: default_start_price(),
            daily_move: default_daily_move(),
            wick_range: default_wick_range(),
            volume_floor: default_volume_floor(),
            volume_span: default_volume_span(),
        }
    }
}

// =============================================================================
// RuntimeConfig
// =============================================================================

/// Top-level runtime configuration for the Strategy Lab backend.
///
/// Every field has a serde default so that older JSON files missing new
/// fields will still deserialise correctly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuntimeConfig {
    /// Address the HTTP server binds to. The `PORT` environment variable
    /// overrides the port part at startup.
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Watchlist symbols chart data can be requested for.
    #[serde(default = "default_symbols")]
    pub symbols: Vec<String>,

    /// Chart window served when a request does not specify `days`.
    #[serde(default = "default_chart_days")]
    pub default_chart_days: u32,

    /// Base seed for the synthetic generator; per-symbol seeds derive from it.
    #[serde(default = "default_base_seed")]
    pub base_seed: u64,

    /// Random-walk tunables.
    #[serde(default)]
    pub synthetic: SyntheticConfig,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            symbols: default_symbols(),
            default_chart_days: default_chart_days(),
            base_seed: default_base_seed(),
            synthetic: SyntheticConfig::default(),
        }
    }
}

impl RuntimeConfig {
    /// Load configuration from a JSON file at `path`.
    ///
    /// If the file does not exist, returns an error so the caller can fall
    /// back to defaults with a warning.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read runtime config from {}", path.display()))?;

        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse runtime config from {}", path.display()))?;

        info!(
            path = %path.display(),
            bind_addr = %config.bind_addr,
            symbols = ?config.symbols,
            "runtime config loaded"
        );

        Ok(config)
    }
}
