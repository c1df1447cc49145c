//! Cache-key derivation
//!
//! A [`CacheKey`] deterministically identifies one logical request: the same
//! endpoint with the same parameter values always derives the same key, no
//! matter how the parameter value was built. Derivation is pure and total;
//! there is no parameter combination that fails to produce a key.

use std::fmt;

use crate::api::{Endpoint, EndpointKind};

/// Deterministic identifier for a unique (endpoint, parameters) request
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    kind: EndpointKind,
    canonical: String,
}

impl CacheKey {
    /// The endpoint family this key belongs to
    pub fn kind(&self) -> EndpointKind {
        self.kind
    }

    /// The canonical string form, e.g. `discover?page=1&sort_by=popularity.desc`
    pub fn as_str(&self) -> &str {
        &self.canonical
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical)
    }
}

/// Derives the cache key for an endpoint.
///
/// The canonical form is the endpoint name followed by its query pairs sorted
/// by parameter name. Endpoint paths that embed parameters (movie id) fold
/// them in through the path segment. Unordered parameter sets (the discover
/// genre set) are already canonicalized by [`Endpoint::query_pairs`].
pub fn derive_key(endpoint: &Endpoint) -> CacheKey {
    let mut pairs = endpoint.query_pairs();
    pairs.sort();

    let mut canonical = format!("{}{}", endpoint.kind(), endpoint.path());
    for (index, (name, value)) in pairs.iter().enumerate() {
        canonical.push(if index == 0 { '?' } else { '&' });
        canonical.push_str(name);
        canonical.push('=');
        canonical.push_str(value);
    }

    CacheKey {
        kind: endpoint.kind(),
        canonical,
    }
}
