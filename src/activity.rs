//! Aggregate fetch activity
//!
//! [`ActivityMonitor`] answers one question about a store: is anything
//! loading right now? It derives the answer from live entry state rather than
//! keeping its own counter, so it cannot drift when entries are evicted
//! mid-flight. Endpoint families can be excluded so that background lookups
//! (the genre catalog, say) do not light up a global busy indicator.

use std::collections::HashSet;
use std::sync::Arc;

use tokio::sync::watch;

use crate::api::EndpointKind;
use crate::cache::QueryStore;

/// Derived store-wide loading signal
pub struct ActivityMonitor {
    store: Arc<QueryStore>,
    excluded: HashSet<EndpointKind>,
    change_rx: watch::Receiver<u64>,
}

impl ActivityMonitor {
    /// Monitors every endpoint family in `store`.
    pub fn new(store: &Arc<QueryStore>) -> Self {
        Self::with_exclusions(store, HashSet::new())
    }

    /// Monitors `store`, ignoring entries whose endpoint family is excluded.
    pub fn with_exclusions(store: &Arc<QueryStore>, excluded: HashSet<EndpointKind>) -> Self {
        Self {
            store: Arc::clone(store),
            excluded,
            change_rx: store.change_rx(),
        }
    }

    /// True iff at least one non-excluded entry is currently Loading.
    pub fn is_active(&self) -> bool {
        self.store.is_any_loading(&self.excluded)
    }

    /// Waits for the next entry state change anywhere in the store.
    /// Returns `false` when the store is gone and no change can arrive.
    pub async fn changed(&mut self) -> bool {
        self.change_rx.changed().await.is_ok()
    }

    /// Waits until no non-excluded entry is Loading.
    pub async fn wait_idle(&mut self) {
        while self.is_active() {
            if !self.changed().await {
                return;
            }
        }
    }
}
