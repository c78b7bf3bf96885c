// =============================================================================
// Strategy Store — in-memory strategy list
// =============================================================================
//
// Holds the named strategy descriptors served by the REST API. Nothing is
// persisted: the store lives for the process lifetime and restarts empty
// (apart from the seeded examples).
//
// Ids come from a monotonic counter rather than `len() + 1`, so they stay
// unique under concurrent appends and would survive record removal if that
// is ever added.
// =============================================================================

use std::sync::atomic::{AtomicU32, Ordering};

use parking_lot::RwLock;

use crate::types::Strategy;

/// Thread-safe in-memory store behind `list()` / `append()`.
pub struct StrategyStore {
    strategies: RwLock<Vec<Strategy>>,
    next_id: AtomicU32,
}

impl StrategyStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            strategies: RwLock::new(Vec::new()),
            next_id: AtomicU32::new(1),
        }
    }

    /// Create a store seeded with the example strategies the dashboard ships.
    pub fn with_defaults() -> Self {
        let store = Self::new();
        store.append("Momentum Breakout", "Buy high, sell higher.");
        store.append("Mean Reversion", "Buy low, sell high.");
        store
    }

    /// Snapshot of all strategies in insertion order.
    pub fn list(&self) -> Vec<Strategy> {
        self.strategies.read().clone()
    }

    /// Append a new strategy and return the created record with its id.
    pub fn append(&self, name: &str, description: &str) -> Strategy {
        let strategy = Strategy {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            name: name.to_string(),
            description: description.to_string(),
        };
        self.strategies.write().push(strategy.clone());
        strategy
    }
}

impl Default for StrategyStore {
    fn default() -> Self {
        Self::with_defaults()
    }
}
