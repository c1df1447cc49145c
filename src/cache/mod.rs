//! Request caching
//!
//! Split in two: [`key`] derives the deterministic cache key for an endpoint,
//! [`store`] owns the keyed entries and their fetch lifecycle.

pub mod key;
pub mod store;

pub use key::{derive_key, CacheKey};
pub use store::{EntrySnapshot, QueryStatus, QueryStore, QuerySubscription, StoreConfig};
