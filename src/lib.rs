//! cinecache - a cached movie catalog client for the TMDB API
//!
//! The crate is organized around a subscription-based request cache: call
//! sites hold a [`query::QueryHandle`] for the request they care about, the
//! [`cache::QueryStore`] guarantees at most one fetch in flight per distinct
//! request, and every response is schema-validated ([`schema`]) and every
//! failure classified ([`error`]) before anything reaches a caller.

pub mod activity;
pub mod api;
pub mod cache;
pub mod cli;
pub mod data;
pub mod diagnostics;
pub mod error;
pub mod favorites;
pub mod query;
pub mod schema;
