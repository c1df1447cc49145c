//! Per-call-site query lifecycle
//!
//! A [`QueryHandle`] is the one object a call site holds for "the data behind
//! this request". It tracks a current request (or none, when the call site is
//! not ready to ask yet), swaps its cache subscription when the request
//! changes and exposes the entry snapshot plus a manual refetch.
//!
//! Two handles pointed at the same request share one cache entry and one
//! fetch; the handle adds nothing but the subscription bookkeeping.

use std::sync::Arc;

use crate::api::Endpoint;
use crate::cache::{CacheKey, EntrySnapshot, QueryStore, QuerySubscription};

/// A call site's live attachment to the request cache
pub struct QueryHandle {
    store: Arc<QueryStore>,
    request: Option<Endpoint>,
    subscription: QuerySubscription,
}

impl QueryHandle {
    /// Creates a handle with no request: it reports Idle until
    /// [`set_request`](Self::set_request) gives it one.
    pub fn detached(store: &Arc<QueryStore>) -> Self {
        Self {
            store: Arc::clone(store),
            request: None,
            subscription: store.idle_subscription(),
        }
    }

    /// Creates a handle already attached to `endpoint`.
    pub fn new(store: &Arc<QueryStore>, endpoint: Endpoint) -> Self {
        let subscription = store.acquire(&endpoint, false);
        Self {
            store: Arc::clone(store),
            request: Some(endpoint),
            subscription,
        }
    }

    /// Points the handle at a new request, or at nothing (`None`).
    ///
    /// Setting the request it already has is a no-op: the subscription is
    /// kept, no fetch is issued and no entry is disturbed. Otherwise the old
    /// subscription is dropped (possibly evicting its entry) and a new one is
    /// acquired.
    pub fn set_request(&mut self, request: Option<Endpoint>) {
        if self.request == request {
            return;
        }
        self.subscription = match &request {
            Some(endpoint) => self.store.acquire(endpoint, false),
            None => self.store.idle_subscription(),
        };
        self.request = request;
    }

    /// The request the handle currently tracks
    pub fn request(&self) -> Option<&Endpoint> {
        self.request.as_ref()
    }

    /// The cache key of the current request, `None` while detached
    pub fn key(&self) -> Option<&CacheKey> {
        self.subscription.key()
    }

    /// Current snapshot of the tracked entry
    pub fn snapshot(&self) -> EntrySnapshot {
        self.subscription.snapshot()
    }

    /// Forces a refetch of the current request. Does nothing while detached.
    pub fn refetch(&self) {
        if let Some(key) = self.subscription.key() {
            self.store.refetch(key);
        }
    }

    /// Waits for the next snapshot change; `false` means no more changes.
    pub async fn changed(&mut self) -> bool {
        self.subscription.changed().await
    }

    /// Waits until the tracked entry is not Loading. A detached handle
    /// returns its Idle snapshot immediately.
    pub async fn settled(&mut self) -> EntrySnapshot {
        self.subscription.settled().await
    }
}
