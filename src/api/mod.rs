//! TMDB endpoint catalog
//!
//! This module defines the fixed set of upstream endpoints the application
//! knows how to call, as a typed [`Endpoint`] enum. An endpoint value carries
//! every parameter that distinguishes one request from another, and is the
//! sole input to cache-key derivation, URL construction and schema selection.

pub mod transport;

use std::collections::BTreeSet;
use std::fmt;

use chrono::NaiveDate;

use crate::schema::SchemaId;

/// Default page for list endpoints when the caller does not specify one
pub const DEFAULT_PAGE: u32 = 1;

/// Default sort order for the discover endpoint
pub const DEFAULT_SORT: &str = "popularity.desc";

/// Filter parameters for the discover endpoint
///
/// The genre set is a `BTreeSet` so that two filter sets naming the same
/// genres in a different order produce identical query strings and cache keys.
#[derive(Debug, Clone, PartialEq)]
pub struct DiscoverParams {
    /// Sort key, e.g. `popularity.desc` or `vote_average.desc`
    pub sort_by: String,
    /// Genres the results must carry
    pub with_genres: BTreeSet<u64>,
    /// Minimum average rating, inclusive
    pub vote_average_gte: Option<f64>,
    /// Maximum average rating, inclusive
    pub vote_average_lte: Option<f64>,
    /// Earliest primary release date, inclusive
    pub release_date_gte: Option<NaiveDate>,
    /// Latest primary release date, inclusive
    pub release_date_lte: Option<NaiveDate>,
    /// Whether adult titles are included
    pub include_adult: bool,
    pub page: u32,
}

impl Default for DiscoverParams {
    fn default() -> Self {
        Self {
            sort_by: DEFAULT_SORT.to_string(),
            with_genres: BTreeSet::new(),
            vote_average_gte: None,
            vote_average_lte: None,
            release_date_gte: None,
            release_date_lte: None,
            include_adult: false,
            page: DEFAULT_PAGE,
        }
    }
}

/// Coarse endpoint identity, independent of parameters
///
/// Used by the global activity monitor to exclude whole endpoint families
/// from the aggregate loading signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EndpointKind {
    Popular,
    TopRated,
    Upcoming,
    NowPlaying,
    Search,
    MovieDetails,
    MovieCredits,
    MovieVideos,
    Recommendations,
    GenreList,
    Discover,
}

impl EndpointKind {
    /// Stable name used in cache keys and diagnostics
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Popular => "popular",
            Self::TopRated => "top_rated",
            Self::Upcoming => "upcoming",
            Self::NowPlaying => "now_playing",
            Self::Search => "search",
            Self::MovieDetails => "movie_details",
            Self::MovieCredits => "movie_credits",
            Self::MovieVideos => "movie_videos",
            Self::Recommendations => "recommendations",
            Self::GenreList => "genre_list",
            Self::Discover => "discover",
        }
    }
}

impl fmt::Display for EndpointKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully-parametrized request to one of the known upstream endpoints
#[derive(Debug, Clone, PartialEq)]
pub enum Endpoint {
    Popular { page: u32 },
    TopRated { page: u32 },
    Upcoming { page: u32 },
    NowPlaying { page: u32 },
    Search { query: String, page: u32 },
    MovieDetails { movie_id: u64 },
    MovieCredits { movie_id: u64 },
    MovieVideos { movie_id: u64 },
    Recommendations { movie_id: u64, page: u32 },
    GenreList,
    Discover(DiscoverParams),
}

impl Endpoint {
    /// The coarse identity of this endpoint
    pub fn kind(&self) -> EndpointKind {
        match self {
            Self::Popular { .. } => EndpointKind::Popular,
            Self::TopRated { .. } => EndpointKind::TopRated,
            Self::Upcoming { .. } => EndpointKind::Upcoming,
            Self::NowPlaying { .. } => EndpointKind::NowPlaying,
            Self::Search { .. } => EndpointKind::Search,
            Self::MovieDetails { .. } => EndpointKind::MovieDetails,
            Self::MovieCredits { .. } => EndpointKind::MovieCredits,
            Self::MovieVideos { .. } => EndpointKind::MovieVideos,
            Self::Recommendations { .. } => EndpointKind::Recommendations,
            Self::GenreList => EndpointKind::GenreList,
            Self::Discover(_) => EndpointKind::Discover,
        }
    }

    /// The schema the response payload is validated against
    pub fn schema(&self) -> SchemaId {
        match self {
            Self::Popular { .. }
            | Self::TopRated { .. }
            | Self::Upcoming { .. }
            | Self::NowPlaying { .. }
            | Self::Search { .. }
            | Self::Recommendations { .. }
            | Self::Discover(_) => SchemaId::MovieList,
            Self::MovieDetails { .. } => SchemaId::MovieDetails,
            Self::MovieCredits { .. } => SchemaId::MovieCredits,
            Self::MovieVideos { .. } => SchemaId::MovieVideos,
            Self::GenreList => SchemaId::GenreList,
        }
    }

    /// URL path relative to the API base
    pub fn path(&self) -> String {
        match self {
            Self::Popular { .. } => "/movie/popular".to_string(),
            Self::TopRated { .. } => "/movie/top_rated".to_string(),
            Self::Upcoming { .. } => "/movie/upcoming".to_string(),
            Self::NowPlaying { .. } => "/movie/now_playing".to_string(),
            Self::Search { .. } => "/search/movie".to_string(),
            Self::MovieDetails { movie_id } => format!("/movie/{movie_id}"),
            Self::MovieCredits { movie_id } => format!("/movie/{movie_id}/credits"),
            Self::MovieVideos { movie_id } => format!("/movie/{movie_id}/videos"),
            Self::Recommendations { movie_id, .. } => {
                format!("/movie/{movie_id}/recommendations")
            }
            Self::GenreList => "/genre/movie/list".to_string(),
            Self::Discover(_) => "/discover/movie".to_string(),
        }
    }

    /// Query parameters in canonical order, excluding the locale
    ///
    /// The order is fixed per endpoint and the genre set is emitted sorted,
    /// so the pair list (and anything derived from it) is deterministic for
    /// logically identical requests.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        match self {
            Self::Popular { page }
            | Self::TopRated { page }
            | Self::Upcoming { page }
            | Self::NowPlaying { page }
            | Self::Recommendations { page, .. } => {
                vec![("page".to_string(), page.to_string())]
            }
            Self::Search { query, page } => vec![
                ("query".to_string(), query.clone()),
                ("page".to_string(), page.to_string()),
            ],
            Self::MovieDetails { .. } | Self::MovieCredits { .. } | Self::MovieVideos { .. } => {
                Vec::new()
            }
            Self::GenreList => Vec::new(),
            Self::Discover(params) => {
                let mut pairs = vec![
                    ("sort_by".to_string(), params.sort_by.clone()),
                    ("page".to_string(), params.page.to_string()),
                    (
                        "include_adult".to_string(),
                        params.include_adult.to_string(),
                    ),
                ];
                if !params.with_genres.is_empty() {
                    let genres: Vec<String> =
                        params.with_genres.iter().map(u64::to_string).collect();
                    pairs.push(("with_genres".to_string(), genres.join(",")));
                }
                if let Some(min) = params.vote_average_gte {
                    pairs.push(("vote_average.gte".to_string(), min.to_string()));
                }
                if let Some(max) = params.vote_average_lte {
                    pairs.push(("vote_average.lte".to_string(), max.to_string()));
                }
                if let Some(from) = params.release_date_gte {
                    pairs.push((
                        "primary_release_date.gte".to_string(),
                        from.format("%Y-%m-%d").to_string(),
                    ));
                }
                if let Some(to) = params.release_date_lte {
                    pairs.push((
                        "primary_release_date.lte".to_string(),
                        to.format("%Y-%m-%d").to_string(),
                    ));
                }
                pairs
            }
        }
    }
}
