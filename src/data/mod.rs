//! Core domain models for cinecache
//!
//! This module contains the validated, strongly-typed shapes that the rest of
//! the application consumes: movies, paginated movie lists, movie details,
//! credits, videos and genres. Raw API payloads only become these types after
//! passing through the schema validator.

use serde::{Deserialize, Serialize};

/// Maximum page count the API will serve for any list endpoint.
///
/// `total_pages` is capped to this value during normalization so that all
/// pagination math downstream sees the capped figure.
pub const MAX_TOTAL_PAGES: u32 = 500;

/// A movie as it appears in list responses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    /// Unique TMDB identifier
    pub id: u64,
    /// Localized title
    pub title: String,
    /// Plot summary, empty when the API has none for the locale
    pub overview: String,
    /// Poster image path, `None` when the movie has no poster
    pub poster_path: Option<String>,
    /// Backdrop image path, `None` when the movie has no backdrop
    pub backdrop_path: Option<String>,
    /// Release date as `YYYY-MM-DD`, may be empty for unreleased titles
    pub release_date: String,
    /// Average user rating (0.0 - 10.0)
    pub vote_average: f64,
    /// Number of user votes
    pub vote_count: u64,
    /// Popularity score
    pub popularity: f64,
    /// Adult-content flag
    pub adult: bool,
    /// ISO 639-1 code of the original language
    pub original_language: String,
    /// Title in the original language
    pub original_title: String,
    /// Genre identifiers
    pub genre_ids: Vec<u64>,
    /// Whether the entry is a video release rather than a theatrical movie
    pub video: bool,
}

/// One page of a paginated movie list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoviePage {
    /// Page number, 1-based
    pub page: u32,
    /// Movies on this page
    pub results: Vec<Movie>,
    /// Total pages available, capped at [`MAX_TOTAL_PAGES`]
    pub total_pages: u32,
    /// Total matching movies
    pub total_results: u64,
}

/// A movie genre
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Genre {
    pub id: u64,
    pub name: String,
}

/// The genre catalog returned by the genre-list endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenreList {
    pub genres: Vec<Genre>,
}

/// A production company credited on a movie
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionCompany {
    pub id: u64,
    pub logo_path: Option<String>,
    pub name: String,
    pub origin_country: String,
}

/// A production country credited on a movie
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionCountry {
    pub iso_3166_1: String,
    pub name: String,
}

/// A spoken language credited on a movie
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpokenLanguage {
    pub english_name: String,
    pub iso_639_1: String,
    pub name: String,
}

/// Full detail record for a single movie
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieDetails {
    pub id: u64,
    pub title: String,
    pub overview: String,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub release_date: String,
    pub vote_average: f64,
    pub vote_count: u64,
    pub popularity: f64,
    pub adult: bool,
    pub original_language: String,
    pub original_title: String,
    pub video: bool,
    /// Production budget in US dollars
    pub budget: u64,
    /// Resolved genre records (not just ids)
    pub genres: Vec<Genre>,
    /// Official homepage, `None` when absent
    pub homepage: Option<String>,
    /// IMDb identifier, `None` when absent
    pub imdb_id: Option<String>,
    /// Runtime in minutes, `None` when the API does not know it
    pub runtime: Option<u32>,
    /// Gross revenue in US dollars
    pub revenue: u64,
    pub production_companies: Vec<ProductionCompany>,
    pub production_countries: Vec<ProductionCountry>,
    pub spoken_languages: Vec<SpokenLanguage>,
    /// Release status, e.g. "Released"
    pub status: String,
    pub tagline: String,
}

/// A cast member in a movie's credits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CastMember {
    pub id: u64,
    pub name: String,
    pub character: String,
    pub profile_path: Option<String>,
    /// Billing order, lower is more prominent
    pub order: u32,
}

/// A crew member in a movie's credits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrewMember {
    pub id: u64,
    pub name: String,
    pub job: String,
    pub department: String,
    pub profile_path: Option<String>,
}

/// Credits for a single movie
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieCredits {
    /// The movie these credits belong to
    pub id: u64,
    pub cast: Vec<CastMember>,
    pub crew: Vec<CrewMember>,
}

/// A published video (trailer, teaser, clip) attached to a movie
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Video {
    pub id: String,
    /// Site-specific video key (e.g. a YouTube id)
    pub key: String,
    pub name: String,
    pub site: String,
    /// Video type, e.g. "Trailer"
    #[serde(rename = "type")]
    pub kind: String,
    pub official: bool,
}

/// Videos attached to a single movie
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieVideos {
    /// The movie these videos belong to
    pub id: u64,
    pub results: Vec<Video>,
}
