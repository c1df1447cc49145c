//! Persistent favorites list
//!
//! Favorites live outside the request cache entirely: they are a small local
//! collection the user curates, persisted as one JSON file in an
//! XDG-compliant data directory (`~/.local/share/cinecache/` on Linux).
//! Toggling is idempotent per direction and the on-disk order is insertion
//! order, newest last.

use std::fs;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::data::{Movie, MovieDetails};

/// The subset of movie fields worth keeping once the full record is gone
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FavoriteMovie {
    pub id: u64,
    pub title: String,
    pub poster_path: Option<String>,
    pub release_date: String,
    pub vote_average: f64,
    /// When the movie was added to favorites
    pub added_at: DateTime<Utc>,
}

impl FavoriteMovie {
    /// Captures the favorite-worthy fields of a movie record.
    pub fn from_movie(movie: &Movie) -> Self {
        Self {
            id: movie.id,
            title: movie.title.clone(),
            poster_path: movie.poster_path.clone(),
            release_date: movie.release_date.clone(),
            vote_average: movie.vote_average,
            added_at: Utc::now(),
        }
    }

    /// Captures the favorite-worthy fields of a full details record.
    pub fn from_details(details: &MovieDetails) -> Self {
        Self {
            id: details.id,
            title: details.title.clone(),
            poster_path: details.poster_path.clone(),
            release_date: details.release_date.clone(),
            vote_average: details.vote_average,
            added_at: Utc::now(),
        }
    }
}

/// Errors from reading or writing the favorites file
#[derive(Debug, Error)]
pub enum FavoritesError {
    #[error("Could not determine a data directory for favorites")]
    NoDataDir,
    #[error("Failed to read favorites file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Favorites file is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Favorites collection backed by a JSON file
#[derive(Debug, Clone)]
pub struct Favorites {
    path: PathBuf,
}

impl Favorites {
    /// Opens the favorites store at the XDG data location.
    pub fn open() -> Result<Self, FavoritesError> {
        let project_dirs =
            ProjectDirs::from("", "", "cinecache").ok_or(FavoritesError::NoDataDir)?;
        Ok(Self {
            path: project_dirs.data_dir().join("favorites.json"),
        })
    }

    /// Opens a favorites store at an explicit file path, for tests.
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// All favorites in insertion order. A missing file is an empty list.
    pub fn list(&self) -> Result<Vec<FavoriteMovie>, FavoritesError> {
        match fs::read_to_string(&self.path) {
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }

    /// Whether the given movie id is currently a favorite.
    pub fn contains(&self, movie_id: u64) -> Result<bool, FavoritesError> {
        Ok(self.list()?.iter().any(|movie| movie.id == movie_id))
    }

    /// Adds a favorite. Adding an id that is already present leaves the list
    /// unchanged and reports `false`.
    pub fn add(&self, favorite: FavoriteMovie) -> Result<bool, FavoritesError> {
        let mut favorites = self.list()?;
        if favorites.iter().any(|movie| movie.id == favorite.id) {
            return Ok(false);
        }
        favorites.push(favorite);
        self.save(&favorites)?;
        Ok(true)
    }

    /// Removes a favorite by id, reporting whether it was present.
    pub fn remove(&self, movie_id: u64) -> Result<bool, FavoritesError> {
        let mut favorites = self.list()?;
        let before = favorites.len();
        favorites.retain(|movie| movie.id != movie_id);
        if favorites.len() == before {
            return Ok(false);
        }
        self.save(&favorites)?;
        Ok(true)
    }

    /// Adds the movie when absent, removes it when present. Returns `true`
    /// when the movie ended up a favorite.
    pub fn toggle(&self, movie: &Movie) -> Result<bool, FavoritesError> {
        if self.remove(movie.id)? {
            Ok(false)
        } else {
            self.add(FavoriteMovie::from_movie(movie))?;
            Ok(true)
        }
    }

    /// Empties the favorites list.
    pub fn clear(&self) -> Result<(), FavoritesError> {
        self.save(&[])
    }

    fn save(&self, favorites: &[FavoriteMovie]) -> Result<(), FavoritesError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(favorites)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}
