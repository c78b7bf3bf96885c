// =============================================================================
// Central Application State — Strategy Lab backend
// =============================================================================
//
// Shared across all request handlers via `Arc<AppState>`. The indicator
// engine itself is pure and owns no state; the only mutable pieces are the
// strategy store and a version counter. The health endpoint reports the
// version so dashboards can detect change without refetching payloads.
// =============================================================================

use std::sync::atomic::{AtomicU64, Ordering};

use crate::runtime_config::RuntimeConfig;
use crate::strategy_store::StrategyStore;

/// Central application state shared across all handlers.
pub struct AppState {
    /// Monotonically increasing version counter, incremented on every
    /// meaningful state mutation.
    pub state_version: AtomicU64,

    /// Immutable-at-runtime service configuration.
    pub runtime_config: RuntimeConfig,

    /// In-memory strategy list.
    pub strategy_store: StrategyStore,
}

impl AppState {
    /// Construct a new `AppState` from the given runtime configuration.
    /// The returned value is typically wrapped in `Arc` immediately.
    pub fn new(config: RuntimeConfig) -> Self {
        Self {
            state_version: AtomicU64::new(1),
            runtime_config: config,
            strategy_store: StrategyStore::with_defaults(),
        }
    }

    /// Atomically increment the state version. Call this after every
    /// meaningful mutation.
    pub fn increment_version(&self) -> u64 {
        self.state_version.fetch_add(1, Ordering::SeqCst)
    }

    /// Read the current state version without modifying it.
    pub fn current_state_version(&self) -> u64 {
        self.state_version.load(Ordering::SeqCst)
    }
}
