//! Request cache and lifecycle store
//!
//! [`QueryStore`] keeps one [`CacheEntry`]-equivalent record per distinct
//! cache key and guarantees the central correctness property of the layer:
//! **at most one fetch in flight per key**. Call sites attach through
//! [`QueryStore::acquire`], observe state through watch-channel snapshots and
//! detach by dropping their [`QuerySubscription`]. Entries whose subscriber
//! count reaches zero are evicted immediately; a later completion for an
//! evicted key is discarded.
//!
//! Every fetch attempt carries a generation number unique across the store. A
//! completion is applied only when its generation is still the entry's current
//! one, so a stale attempt cannot clobber a newer result, whether it was
//! superseded by a refetch or orphaned by eviction and a re-acquire of the
//! same key.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde_json::Value;
use tokio::sync::watch;

use crate::api::transport::{Transport, TransportOutcome};
use crate::api::{Endpoint, EndpointKind};
use crate::cache::key::{derive_key, CacheKey};
use crate::diagnostics::{DiagnosticSink, LogSink};
use crate::error::{classify, ApiErrorBody, ClassifiedError, TransportFailure};
use crate::schema::{validate, ApiPayload};

/// Lifecycle state of a cache entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryStatus {
    Idle,
    Loading,
    Success,
    Error,
}

/// Point-in-time view of a cache entry, published to subscribers
#[derive(Debug, Clone)]
pub struct EntrySnapshot {
    pub status: QueryStatus,
    /// Validated payload; retained through a refetch (stale-while-revalidating)
    pub data: Option<ApiPayload>,
    /// Classified error, present iff `status` is `Error`
    pub error: Option<ClassifiedError>,
    /// When the entry last completed successfully
    pub last_fetched_at: Option<DateTime<Utc>>,
}

impl EntrySnapshot {
    pub(crate) fn idle() -> Self {
        Self {
            status: QueryStatus::Idle,
            data: None,
            error: None,
            last_fetched_at: None,
        }
    }

    /// A fetch is currently in flight for this entry.
    pub fn is_fetching(&self) -> bool {
        self.status == QueryStatus::Loading
    }

    /// A fetch is in flight and there is no data to show yet at all.
    pub fn is_loading(&self) -> bool {
        self.is_fetching() && self.data.is_none()
    }

    /// The entry has settled (nothing in flight).
    pub fn is_settled(&self) -> bool {
        !self.is_fetching()
    }
}

/// Store configuration
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Time budget for a single fetch attempt; exceeding it is a Network error
    pub fetch_timeout: Duration,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            fetch_timeout: Duration::from_secs(10),
        }
    }
}

/// One record per distinct cache key
struct Entry {
    endpoint: Endpoint,
    status: QueryStatus,
    data: Option<ApiPayload>,
    error: Option<ClassifiedError>,
    subscribers: usize,
    /// Store-wide generation of the most recently issued fetch for this entry
    generation: u64,
    last_fetched_at: Option<DateTime<Utc>>,
    tx: watch::Sender<EntrySnapshot>,
}

impl Entry {
    fn snapshot(&self) -> EntrySnapshot {
        EntrySnapshot {
            status: self.status,
            data: self.data.clone(),
            error: self.error.clone(),
            last_fetched_at: self.last_fetched_at,
        }
    }
}

/// Keyed cache of in-flight and completed requests.
///
/// Explicitly constructed and shared (`Arc`) by everything that issues
/// queries; there is no process-wide instance.
pub struct QueryStore {
    entries: DashMap<CacheKey, Entry>,
    transport: Arc<dyn Transport>,
    diagnostics: Arc<dyn DiagnosticSink>,
    config: StoreConfig,
    /// Source of fetch generations, unique across all keys and entry lifetimes
    fetch_seq: AtomicU64,
    /// Bumped on every entry status change; the activity monitor watches it
    change_tx: watch::Sender<u64>,
}

impl QueryStore {
    /// Creates a store over the given transport with default configuration
    /// and log-based diagnostics.
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self::with_parts(transport, Arc::new(LogSink), StoreConfig::default())
    }

    /// Creates a store with an explicit diagnostic sink and configuration.
    pub fn with_parts(
        transport: Arc<dyn Transport>,
        diagnostics: Arc<dyn DiagnosticSink>,
        config: StoreConfig,
    ) -> Self {
        let (change_tx, _) = watch::channel(0);
        Self {
            entries: DashMap::new(),
            transport,
            diagnostics,
            config,
            fetch_seq: AtomicU64::new(0),
            change_tx,
        }
    }

    /// Subscribes to the entry for `endpoint`, creating it (and issuing the
    /// fetch) when absent.
    ///
    /// With `skip` set, the store is not touched at all and the returned
    /// subscription permanently reports Idle. When the entry already exists,
    /// the caller is attached as an additional subscriber; in particular a
    /// Loading entry gets no second fetch.
    pub fn acquire(self: &Arc<Self>, endpoint: &Endpoint, skip: bool) -> QuerySubscription {
        if skip {
            return self.idle_subscription();
        }

        let key = derive_key(endpoint);
        let mut issue_fetch = None;

        let rx = match self.entries.entry(key.clone()) {
            dashmap::mapref::entry::Entry::Occupied(mut occupied) => {
                let entry = occupied.get_mut();
                entry.subscribers += 1;
                entry.tx.subscribe()
            }
            dashmap::mapref::entry::Entry::Vacant(vacant) => {
                let generation = self.next_generation();
                let entry = Entry {
                    endpoint: endpoint.clone(),
                    status: QueryStatus::Loading,
                    data: None,
                    error: None,
                    subscribers: 1,
                    generation,
                    last_fetched_at: None,
                    tx: watch::channel(EntrySnapshot::idle()).0,
                };
                // send_replace updates the value even before anyone listens.
                entry.tx.send_replace(entry.snapshot());
                let rx = entry.tx.subscribe();
                issue_fetch = Some((endpoint.clone(), generation));
                vacant.insert(entry);
                rx
            }
        };

        if let Some((endpoint, generation)) = issue_fetch {
            self.notify_change();
            self.spawn_fetch(key.clone(), endpoint, generation);
        }

        QuerySubscription {
            store: Arc::clone(self),
            key: Some(key),
            rx,
            _idle_tx: None,
        }
    }

    /// A detached subscription that reports Idle forever (the skip case).
    pub fn idle_subscription(self: &Arc<Self>) -> QuerySubscription {
        let (tx, rx) = watch::channel(EntrySnapshot::idle());
        QuerySubscription {
            store: Arc::clone(self),
            key: None,
            rx,
            _idle_tx: Some(tx),
        }
    }

    /// Current snapshot for a key, without subscribing.
    pub fn peek(&self, key: &CacheKey) -> Option<EntrySnapshot> {
        self.entries.get(key).map(|entry| entry.snapshot())
    }

    /// Forces the entry for `key` back to Loading and re-runs its fetch.
    ///
    /// Existing data stays visible to subscribers while the refetch is in
    /// flight. Calling this while a fetch is already running supersedes that
    /// fetch: its result will arrive with a stale generation and be dropped.
    pub fn refetch(self: &Arc<Self>, key: &CacheKey) {
        let mut issue_fetch = None;

        if let Some(mut entry) = self.entries.get_mut(key) {
            entry.generation = self.next_generation();
            entry.status = QueryStatus::Loading;
            entry.error = None;
            entry.tx.send_replace(entry.snapshot());
            issue_fetch = Some((entry.endpoint.clone(), entry.generation));
        }

        if let Some((endpoint, generation)) = issue_fetch {
            self.notify_change();
            self.spawn_fetch(key.clone(), endpoint, generation);
        }
    }

    /// True iff any entry outside `excluded` is currently Loading.
    pub fn is_any_loading(&self, excluded: &std::collections::HashSet<EndpointKind>) -> bool {
        self.entries.iter().any(|entry| {
            entry.status == QueryStatus::Loading && !excluded.contains(&entry.key().kind())
        })
    }

    /// Number of live entries, mostly useful for tests and introspection.
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Watch channel that ticks on every entry status change.
    pub fn change_rx(&self) -> watch::Receiver<u64> {
        self.change_tx.subscribe()
    }

    fn next_generation(&self) -> u64 {
        self.fetch_seq.fetch_add(1, Ordering::Relaxed) + 1
    }

    fn notify_change(&self) {
        self.change_tx.send_modify(|version| *version += 1);
    }

    /// Detaches one subscriber; evicts the entry when none remain.
    fn release(&self, key: &CacheKey) {
        let mut evict = false;
        if let Some(mut entry) = self.entries.get_mut(key) {
            entry.subscribers = entry.subscribers.saturating_sub(1);
            evict = entry.subscribers == 0;
        }
        if evict {
            // Re-checked under the map lock: a concurrent acquire wins.
            self.entries
                .remove_if(key, |_, entry| entry.subscribers == 0);
            self.notify_change();
        }
    }

    fn spawn_fetch(self: &Arc<Self>, key: CacheKey, endpoint: Endpoint, generation: u64) {
        let store = Arc::clone(self);
        tokio::spawn(async move {
            let fetch = store.transport.fetch(&endpoint);
            let result = match tokio::time::timeout(store.config.fetch_timeout, fetch).await {
                Ok(outcome) => store.resolve(&endpoint, outcome),
                Err(_) => Err(store.report(endpoint.kind(), &TransportFailure::Timeout)),
            };
            store.complete(&key, generation, result);
        });
    }

    /// Turns a transport outcome into a validated payload or classified error.
    /// Synchronous: validation and classification never suspend.
    fn resolve(
        &self,
        endpoint: &Endpoint,
        outcome: TransportOutcome,
    ) -> Result<ApiPayload, ClassifiedError> {
        let kind = endpoint.kind();
        let (status, body) = match outcome {
            TransportOutcome::ConnectionFailed(reason) => {
                return Err(self.report(kind, &TransportFailure::Connection(reason)));
            }
            TransportOutcome::Response { status, body } => (status, body),
        };

        if !(200..300).contains(&status) {
            let body: Option<ApiErrorBody> = serde_json::from_str(&body).ok();
            return Err(self.report(kind, &TransportFailure::Http { status, body }));
        }

        let raw: Value = match serde_json::from_str(&body) {
            Ok(raw) => raw,
            Err(e) => {
                return Err(self.report(kind, &TransportFailure::Decode(e.to_string())));
            }
        };

        match validate(endpoint.schema(), &raw) {
            Ok(payload) => Ok(payload),
            Err(failure) => {
                self.diagnostics.validation_failed(kind, &failure, &raw);
                Err(ClassifiedError::from(&failure))
            }
        }
    }

    fn report(&self, kind: EndpointKind, failure: &TransportFailure) -> ClassifiedError {
        let error = classify(failure);
        self.diagnostics.error_classified(kind, &error);
        error
    }

    /// Applies a fetch result, unless the entry is gone or the attempt is no
    /// longer the current generation.
    fn complete(&self, key: &CacheKey, generation: u64, result: Result<ApiPayload, ClassifiedError>) {
        let mut changed = false;
        if let Some(mut entry) = self.entries.get_mut(key) {
            if entry.generation != generation {
                return;
            }
            match result {
                Ok(payload) => {
                    entry.status = QueryStatus::Success;
                    entry.data = Some(payload);
                    entry.error = None;
                    entry.last_fetched_at = Some(Utc::now());
                }
                Err(error) => {
                    entry.status = QueryStatus::Error;
                    entry.data = None;
                    entry.error = Some(error);
                }
            }
            entry.tx.send_replace(entry.snapshot());
            changed = true;
        }
        if changed {
            self.notify_change();
        }
    }
}

/// A live attachment to one cache entry (or to nothing, in the skip case).
///
/// Dropping the subscription detaches the subscriber; the entry is evicted
/// when its last subscriber detaches.
pub struct QuerySubscription {
    store: Arc<QueryStore>,
    key: Option<CacheKey>,
    rx: watch::Receiver<EntrySnapshot>,
    /// Keeps the skip channel open so `changed` pends instead of erroring
    _idle_tx: Option<watch::Sender<EntrySnapshot>>,
}

impl QuerySubscription {
    /// The key this subscription is attached to, `None` when skipped.
    pub fn key(&self) -> Option<&CacheKey> {
        self.key.as_ref()
    }

    /// Current snapshot of the entry.
    pub fn snapshot(&self) -> EntrySnapshot {
        self.rx.borrow().clone()
    }

    /// Waits for the next snapshot change. Returns `false` when no further
    /// changes can arrive.
    pub async fn changed(&mut self) -> bool {
        self.rx.changed().await.is_ok()
    }

    /// Waits until the entry is not Loading and returns that snapshot.
    pub async fn settled(&mut self) -> EntrySnapshot {
        loop {
            let snapshot = self.snapshot();
            if snapshot.is_settled() {
                return snapshot;
            }
            if !self.changed().await {
                return self.snapshot();
            }
        }
    }
}

impl Drop for QuerySubscription {
    fn drop(&mut self) {
        if let Some(key) = self.key.take() {
            self.store.release(&key);
        }
    }
}
