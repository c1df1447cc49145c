//! Command-line interface parsing
//!
//! Each query subcommand maps onto exactly one [`Endpoint`]; the favorites
//! subcommands work against the local favorites file instead (adding a
//! favorite first fetches the movie's details to capture its metadata).

use std::collections::BTreeSet;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use crate::api::transport::API_KEY_ENV;
use crate::api::{DiscoverParams, Endpoint, DEFAULT_PAGE, DEFAULT_SORT};

/// Movie catalog client for the TMDB API
#[derive(Parser, Debug)]
#[command(name = "cinecache")]
#[command(about = "Browse, search and filter the TMDB movie catalog")]
#[command(version)]
pub struct Cli {
    /// API bearer token; falls back to the TMDB_API_KEY environment variable
    #[arg(long, global = true, env = API_KEY_ENV, hide_env_values = true)]
    pub api_key: Option<String>,

    /// Locale for titles and overviews, e.g. en-US or de-DE
    #[arg(long, global = true)]
    pub language: Option<String>,

    /// Time budget per request, in seconds
    #[arg(long, global = true, default_value_t = 10)]
    pub timeout: u64,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Movies currently popular
    Popular {
        #[arg(long, default_value_t = DEFAULT_PAGE)]
        page: u32,
    },
    /// Highest-rated movies
    TopRated {
        #[arg(long, default_value_t = DEFAULT_PAGE)]
        page: u32,
    },
    /// Movies with upcoming releases
    Upcoming {
        #[arg(long, default_value_t = DEFAULT_PAGE)]
        page: u32,
    },
    /// Movies currently in theaters
    NowPlaying {
        #[arg(long, default_value_t = DEFAULT_PAGE)]
        page: u32,
    },
    /// Search movies by title
    Search {
        /// Title text to search for
        query: String,
        #[arg(long, default_value_t = DEFAULT_PAGE)]
        page: u32,
    },
    /// Full details for one movie
    Details { movie_id: u64 },
    /// Cast and crew for one movie
    Credits { movie_id: u64 },
    /// Trailers and clips for one movie
    Videos { movie_id: u64 },
    /// Movies similar to one movie
    Recommend {
        movie_id: u64,
        #[arg(long, default_value_t = DEFAULT_PAGE)]
        page: u32,
    },
    /// The genre catalog
    Genres,
    /// Filtered catalog browsing
    Discover {
        /// Genre ids the results must carry; repeatable
        #[arg(long = "genre")]
        genres: Vec<u64>,
        /// Minimum average rating, inclusive
        #[arg(long)]
        min_rating: Option<f64>,
        /// Maximum average rating, inclusive
        #[arg(long)]
        max_rating: Option<f64>,
        /// Earliest release date (YYYY-MM-DD), inclusive
        #[arg(long)]
        released_after: Option<NaiveDate>,
        /// Latest release date (YYYY-MM-DD), inclusive
        #[arg(long)]
        released_before: Option<NaiveDate>,
        /// Sort key, e.g. popularity.desc or vote_average.desc
        #[arg(long, default_value = DEFAULT_SORT)]
        sort_by: String,
        /// Include adult titles
        #[arg(long)]
        include_adult: bool,
        #[arg(long, default_value_t = DEFAULT_PAGE)]
        page: u32,
    },
    /// Manage the local favorites list
    Favorites {
        #[command(subcommand)]
        action: FavoritesCommand,
    },
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum FavoritesCommand {
    /// Show all favorites
    List,
    /// Add a movie to favorites by id
    Add { movie_id: u64 },
    /// Remove a movie from favorites by id
    Remove { movie_id: u64 },
}

impl Command {
    /// The endpoint this command queries, `None` for local-only commands.
    pub fn endpoint(&self) -> Option<Endpoint> {
        match self {
            Self::Popular { page } => Some(Endpoint::Popular { page: *page }),
            Self::TopRated { page } => Some(Endpoint::TopRated { page: *page }),
            Self::Upcoming { page } => Some(Endpoint::Upcoming { page: *page }),
            Self::NowPlaying { page } => Some(Endpoint::NowPlaying { page: *page }),
            Self::Search { query, page } => Some(Endpoint::Search {
                query: query.clone(),
                page: *page,
            }),
            Self::Details { movie_id } => Some(Endpoint::MovieDetails {
                movie_id: *movie_id,
            }),
            Self::Credits { movie_id } => Some(Endpoint::MovieCredits {
                movie_id: *movie_id,
            }),
            Self::Videos { movie_id } => Some(Endpoint::MovieVideos {
                movie_id: *movie_id,
            }),
            Self::Recommend { movie_id, page } => Some(Endpoint::Recommendations {
                movie_id: *movie_id,
                page: *page,
            }),
            Self::Genres => Some(Endpoint::GenreList),
            Self::Discover {
                genres,
                min_rating,
                max_rating,
                released_after,
                released_before,
                sort_by,
                include_adult,
                page,
            } => Some(Endpoint::Discover(DiscoverParams {
                sort_by: sort_by.clone(),
                with_genres: genres.iter().copied().collect::<BTreeSet<u64>>(),
                vote_average_gte: *min_rating,
                vote_average_lte: *max_rating,
                release_date_gte: *released_after,
                release_date_lte: *released_before,
                include_adult: *include_adult,
                page: *page,
            })),
            Self::Favorites { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_popular_default_page() {
        let cli = Cli::parse_from(["cinecache", "popular"]);
        assert_eq!(
            cli.command.endpoint(),
            Some(Endpoint::Popular { page: 1 })
        );
    }

    #[test]
    fn test_parse_popular_explicit_page() {
        let cli = Cli::parse_from(["cinecache", "popular", "--page", "3"]);
        assert_eq!(
            cli.command.endpoint(),
            Some(Endpoint::Popular { page: 3 })
        );
    }

    #[test]
    fn test_parse_search() {
        let cli = Cli::parse_from(["cinecache", "search", "blade runner", "--page", "2"]);
        assert_eq!(
            cli.command.endpoint(),
            Some(Endpoint::Search {
                query: "blade runner".to_string(),
                page: 2,
            })
        );
    }

    #[test]
    fn test_parse_movie_scoped_commands() {
        let cli = Cli::parse_from(["cinecache", "details", "603"]);
        assert_eq!(
            cli.command.endpoint(),
            Some(Endpoint::MovieDetails { movie_id: 603 })
        );

        let cli = Cli::parse_from(["cinecache", "credits", "603"]);
        assert_eq!(
            cli.command.endpoint(),
            Some(Endpoint::MovieCredits { movie_id: 603 })
        );

        let cli = Cli::parse_from(["cinecache", "recommend", "603", "--page", "2"]);
        assert_eq!(
            cli.command.endpoint(),
            Some(Endpoint::Recommendations {
                movie_id: 603,
                page: 2,
            })
        );
    }

    #[test]
    fn test_parse_discover_filters() {
        let cli = Cli::parse_from([
            "cinecache",
            "discover",
            "--genre",
            "28",
            "--genre",
            "12",
            "--min-rating",
            "7.5",
            "--released-after",
            "1999-01-01",
        ]);

        match cli.command.endpoint() {
            Some(Endpoint::Discover(params)) => {
                assert_eq!(params.with_genres, BTreeSet::from([12, 28]));
                assert_eq!(params.vote_average_gte, Some(7.5));
                assert_eq!(
                    params.release_date_gte,
                    NaiveDate::from_ymd_opt(1999, 1, 1)
                );
                assert_eq!(params.sort_by, DEFAULT_SORT);
                assert!(!params.include_adult);
            }
            other => panic!("unexpected endpoint: {other:?}"),
        }
    }

    #[test]
    fn test_parse_favorites_commands() {
        let cli = Cli::parse_from(["cinecache", "favorites", "list"]);
        assert_eq!(
            cli.command,
            Command::Favorites {
                action: FavoritesCommand::List
            }
        );
        assert!(cli.command.endpoint().is_none());

        let cli = Cli::parse_from(["cinecache", "favorites", "add", "603"]);
        assert_eq!(
            cli.command,
            Command::Favorites {
                action: FavoritesCommand::Add { movie_id: 603 }
            }
        );
    }

    #[test]
    fn test_parse_global_flags() {
        let cli = Cli::parse_from([
            "cinecache",
            "genres",
            "--api-key",
            "token",
            "--language",
            "de-DE",
            "--timeout",
            "5",
        ]);

        assert_eq!(cli.api_key.as_deref(), Some("token"));
        assert_eq!(cli.language.as_deref(), Some("de-DE"));
        assert_eq!(cli.timeout, 5);
    }

    #[test]
    fn test_parse_invalid_date_rejected() {
        let result = Cli::try_parse_from([
            "cinecache",
            "discover",
            "--released-after",
            "not-a-date",
        ]);
        assert!(result.is_err());
    }
}
