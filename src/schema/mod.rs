//! Response schema validation
//!
//! Raw JSON payloads from the API are checked against a fixed set of expected
//! shapes and normalized into the domain types from [`crate::data`]. Validation
//! never panics and never returns a partial object: either the whole payload
//! conforms (missing non-critical fields are filled with documented defaults)
//! or a [`ValidationFailure`] enumerating every per-field issue is returned.
//!
//! Tolerated upstream drift (defaults instead of failures):
//! - absent `overview` / `tagline` -> empty string
//! - absent `genre_ids` / `genres` -> empty list
//! - absent or null `runtime` -> `None`
//! - absent `homepage` / `imdb_id` -> `None`

use serde_json::Value;
use thiserror::Error;

use crate::data::{
    CastMember, CrewMember, Genre, GenreList, Movie, MovieCredits, MovieDetails, MoviePage,
    MovieVideos, ProductionCompany, ProductionCountry, SpokenLanguage, Video, MAX_TOTAL_PAGES,
};

/// Identifier for one of the fixed set of expected response shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemaId {
    /// Paginated movie list (`page` / `results` / `total_pages` / `total_results`)
    MovieList,
    MovieDetails,
    MovieCredits,
    MovieVideos,
    GenreList,
}

impl SchemaId {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::MovieList => "movie_list",
            Self::MovieDetails => "movie_details",
            Self::MovieCredits => "movie_credits",
            Self::MovieVideos => "movie_videos",
            Self::GenreList => "genre_list",
        }
    }
}

/// A validated payload, tagged by the schema it conformed to
#[derive(Debug, Clone, PartialEq)]
pub enum ApiPayload {
    MovieList(MoviePage),
    MovieDetails(MovieDetails),
    MovieCredits(MovieCredits),
    MovieVideos(MovieVideos),
    GenreList(GenreList),
}

impl ApiPayload {
    pub fn as_movie_page(&self) -> Option<&MoviePage> {
        match self {
            Self::MovieList(page) => Some(page),
            _ => None,
        }
    }

    pub fn as_movie_details(&self) -> Option<&MovieDetails> {
        match self {
            Self::MovieDetails(details) => Some(details),
            _ => None,
        }
    }

    pub fn as_movie_credits(&self) -> Option<&MovieCredits> {
        match self {
            Self::MovieCredits(credits) => Some(credits),
            _ => None,
        }
    }

    pub fn as_movie_videos(&self) -> Option<&MovieVideos> {
        match self {
            Self::MovieVideos(videos) => Some(videos),
            _ => None,
        }
    }

    pub fn as_genre_list(&self) -> Option<&GenreList> {
        match self {
            Self::GenreList(genres) => Some(genres),
            _ => None,
        }
    }
}

/// One field-level problem found during validation
#[derive(Debug, Clone, PartialEq)]
pub struct FieldIssue {
    /// Path to the offending field, e.g. `results[0].id`
    pub path: String,
    /// What was expected
    pub message: String,
    /// Preview of the received value, when one was present
    pub found: Option<String>,
}

/// A payload that parsed as JSON but does not conform to its schema
#[derive(Debug, Clone, Error)]
#[error("payload does not conform to schema {}: {} issue(s)", schema.as_str(), issues.len())]
pub struct ValidationFailure {
    pub schema: SchemaId,
    pub issues: Vec<FieldIssue>,
}

/// Validates `raw` against the shape identified by `schema`.
///
/// Pure: the same payload and schema id always produce the same result.
pub fn validate(schema: SchemaId, raw: &Value) -> Result<ApiPayload, ValidationFailure> {
    let mut issues = Vec::new();
    let payload = match schema {
        SchemaId::MovieList => ApiPayload::MovieList(movie_page(raw, "", &mut issues)),
        SchemaId::MovieDetails => ApiPayload::MovieDetails(movie_details(raw, "", &mut issues)),
        SchemaId::MovieCredits => ApiPayload::MovieCredits(movie_credits(raw, "", &mut issues)),
        SchemaId::MovieVideos => ApiPayload::MovieVideos(movie_videos(raw, "", &mut issues)),
        SchemaId::GenreList => ApiPayload::GenreList(genre_list(raw, "", &mut issues)),
    };

    if issues.is_empty() {
        Ok(payload)
    } else {
        Err(ValidationFailure { schema, issues })
    }
}

fn movie_page(raw: &Value, path: &str, issues: &mut Vec<FieldIssue>) -> MoviePage {
    let obj = Walker::new(raw, path, issues);
    MoviePage {
        page: obj.req_u32("page"),
        results: obj.req_items("results", movie),
        // Cap in u64 space, before narrowing.
        total_pages: obj.req_u64("total_pages").min(u64::from(MAX_TOTAL_PAGES)) as u32,
        total_results: obj.req_u64("total_results"),
    }
}

fn movie(raw: &Value, path: &str, issues: &mut Vec<FieldIssue>) -> Movie {
    let obj = Walker::new(raw, path, issues);
    Movie {
        id: obj.req_u64("id"),
        title: obj.req_string("title"),
        overview: obj.opt_string("overview"),
        poster_path: obj.nullable_string("poster_path"),
        backdrop_path: obj.nullable_string("backdrop_path"),
        release_date: obj.opt_string("release_date"),
        vote_average: obj.req_rating("vote_average"),
        vote_count: obj.req_u64("vote_count"),
        popularity: obj.req_rating("popularity"),
        adult: obj.req_bool("adult"),
        original_language: obj.req_string("original_language"),
        original_title: obj.req_string("original_title"),
        genre_ids: obj.opt_u64_array("genre_ids"),
        video: obj.req_bool("video"),
    }
}

fn movie_details(raw: &Value, path: &str, issues: &mut Vec<FieldIssue>) -> MovieDetails {
    let obj = Walker::new(raw, path, issues);
    MovieDetails {
        id: obj.req_u64("id"),
        title: obj.req_string("title"),
        overview: obj.opt_string("overview"),
        poster_path: obj.nullable_string("poster_path"),
        backdrop_path: obj.nullable_string("backdrop_path"),
        release_date: obj.opt_string("release_date"),
        vote_average: obj.req_rating("vote_average"),
        vote_count: obj.req_u64("vote_count"),
        popularity: obj.req_rating("popularity"),
        adult: obj.req_bool("adult"),
        original_language: obj.req_string("original_language"),
        original_title: obj.req_string("original_title"),
        video: obj.req_bool("video"),
        budget: obj.opt_u64("budget"),
        genres: obj.opt_items("genres", genre),
        homepage: obj.nullable_string("homepage"),
        imdb_id: obj.nullable_string("imdb_id"),
        runtime: obj.nullable_u32("runtime"),
        revenue: obj.opt_u64("revenue"),
        production_companies: obj.opt_items("production_companies", production_company),
        production_countries: obj.opt_items("production_countries", production_country),
        spoken_languages: obj.opt_items("spoken_languages", spoken_language),
        status: obj.opt_string("status"),
        tagline: obj.opt_string("tagline"),
    }
}

fn genre(raw: &Value, path: &str, issues: &mut Vec<FieldIssue>) -> Genre {
    let obj = Walker::new(raw, path, issues);
    Genre {
        id: obj.req_u64("id"),
        name: obj.req_string("name"),
    }
}

fn genre_list(raw: &Value, path: &str, issues: &mut Vec<FieldIssue>) -> GenreList {
    let obj = Walker::new(raw, path, issues);
    GenreList {
        genres: obj.req_items("genres", genre),
    }
}

fn production_company(raw: &Value, path: &str, issues: &mut Vec<FieldIssue>) -> ProductionCompany {
    let obj = Walker::new(raw, path, issues);
    ProductionCompany {
        id: obj.req_u64("id"),
        logo_path: obj.nullable_string("logo_path"),
        name: obj.req_string("name"),
        origin_country: obj.opt_string("origin_country"),
    }
}

fn production_country(raw: &Value, path: &str, issues: &mut Vec<FieldIssue>) -> ProductionCountry {
    let obj = Walker::new(raw, path, issues);
    ProductionCountry {
        iso_3166_1: obj.req_string("iso_3166_1"),
        name: obj.req_string("name"),
    }
}

fn spoken_language(raw: &Value, path: &str, issues: &mut Vec<FieldIssue>) -> SpokenLanguage {
    let obj = Walker::new(raw, path, issues);
    SpokenLanguage {
        english_name: obj.opt_string("english_name"),
        iso_639_1: obj.req_string("iso_639_1"),
        name: obj.opt_string("name"),
    }
}

fn movie_credits(raw: &Value, path: &str, issues: &mut Vec<FieldIssue>) -> MovieCredits {
    let obj = Walker::new(raw, path, issues);
    MovieCredits {
        id: obj.req_u64("id"),
        cast: obj.req_items("cast", cast_member),
        crew: obj.req_items("crew", crew_member),
    }
}

fn cast_member(raw: &Value, path: &str, issues: &mut Vec<FieldIssue>) -> CastMember {
    let obj = Walker::new(raw, path, issues);
    CastMember {
        id: obj.req_u64("id"),
        name: obj.req_string("name"),
        character: obj.opt_string("character"),
        profile_path: obj.nullable_string("profile_path"),
        order: obj.opt_u32("order"),
    }
}

fn crew_member(raw: &Value, path: &str, issues: &mut Vec<FieldIssue>) -> CrewMember {
    let obj = Walker::new(raw, path, issues);
    CrewMember {
        id: obj.req_u64("id"),
        name: obj.req_string("name"),
        job: obj.opt_string("job"),
        department: obj.opt_string("department"),
        profile_path: obj.nullable_string("profile_path"),
    }
}

fn movie_videos(raw: &Value, path: &str, issues: &mut Vec<FieldIssue>) -> MovieVideos {
    let obj = Walker::new(raw, path, issues);
    MovieVideos {
        id: obj.req_u64("id"),
        results: obj.req_items("results", video),
    }
}

fn video(raw: &Value, path: &str, issues: &mut Vec<FieldIssue>) -> Video {
    let obj = Walker::new(raw, path, issues);
    Video {
        id: obj.req_string("id"),
        key: obj.req_string("key"),
        name: obj.req_string("name"),
        site: obj.req_string("site"),
        kind: obj.req_string("type"),
        official: obj.req_bool("official"),
    }
}

/// Field-extraction helper bound to one JSON object and a path prefix.
///
/// Required accessors record an issue and return a neutral default when the
/// field is missing or mistyped; the defaults never escape because `validate`
/// only returns the payload when no issues were recorded.
struct Walker<'a, 'i> {
    raw: &'a Value,
    path: &'a str,
    issues: std::cell::RefCell<&'i mut Vec<FieldIssue>>,
}

impl<'a, 'i> Walker<'a, 'i> {
    fn new(raw: &'a Value, path: &'a str, issues: &'i mut Vec<FieldIssue>) -> Self {
        let walker = Self {
            raw,
            path,
            issues: std::cell::RefCell::new(issues),
        };
        if !raw.is_object() {
            walker.issue("", "expected an object", Some(raw));
        }
        walker
    }

    fn field_path(&self, field: &str) -> String {
        if self.path.is_empty() {
            field.to_string()
        } else if field.is_empty() {
            self.path.to_string()
        } else {
            format!("{}.{}", self.path, field)
        }
    }

    fn issue(&self, field: &str, message: &str, found: Option<&Value>) {
        self.issues.borrow_mut().push(FieldIssue {
            path: self.field_path(field),
            message: message.to_string(),
            found: found.map(preview),
        });
    }

    fn get(&self, field: &str) -> Option<&'a Value> {
        self.raw.get(field)
    }

    fn req_u64(&self, field: &str) -> u64 {
        match self.get(field) {
            Some(value) => match value.as_u64() {
                Some(n) => n,
                None => {
                    self.issue(field, "expected a non-negative integer", Some(value));
                    0
                }
            },
            None => {
                self.issue(field, "required field is missing", None);
                0
            }
        }
    }

    /// Required integer that must also fit in 32 bits (page numbers)
    fn req_u32(&self, field: &str) -> u32 {
        match u32::try_from(self.req_u64(field)) {
            Ok(n) => n,
            Err(_) => {
                self.issue(field, "expected a 32-bit integer", self.get(field));
                0
            }
        }
    }

    /// Required non-negative float (ratings, popularity scores)
    fn req_rating(&self, field: &str) -> f64 {
        match self.get(field) {
            Some(value) => match value.as_f64() {
                Some(n) if n >= 0.0 => n,
                Some(_) => {
                    self.issue(field, "expected a non-negative number", Some(value));
                    0.0
                }
                None => {
                    self.issue(field, "expected a number", Some(value));
                    0.0
                }
            },
            None => {
                self.issue(field, "required field is missing", None);
                0.0
            }
        }
    }

    fn req_string(&self, field: &str) -> String {
        match self.get(field) {
            Some(value) => match value.as_str() {
                Some(s) => s.to_string(),
                None => {
                    self.issue(field, "expected a string", Some(value));
                    String::new()
                }
            },
            None => {
                self.issue(field, "required field is missing", None);
                String::new()
            }
        }
    }

    fn req_bool(&self, field: &str) -> bool {
        match self.get(field) {
            Some(value) => match value.as_bool() {
                Some(b) => b,
                None => {
                    self.issue(field, "expected a boolean", Some(value));
                    false
                }
            },
            None => {
                self.issue(field, "required field is missing", None);
                false
            }
        }
    }

    /// Optional string: absent or null becomes an empty string
    fn opt_string(&self, field: &str) -> String {
        match self.get(field) {
            Some(Value::Null) | None => String::new(),
            Some(value) => match value.as_str() {
                Some(s) => s.to_string(),
                None => {
                    self.issue(field, "expected a string", Some(value));
                    String::new()
                }
            },
        }
    }

    /// Nullable string: absent or null becomes `None`
    fn nullable_string(&self, field: &str) -> Option<String> {
        match self.get(field) {
            Some(Value::Null) | None => None,
            Some(value) => match value.as_str() {
                Some(s) => Some(s.to_string()),
                None => {
                    self.issue(field, "expected a string or null", Some(value));
                    None
                }
            },
        }
    }

    /// Optional integer: absent becomes zero
    fn opt_u64(&self, field: &str) -> u64 {
        match self.get(field) {
            Some(Value::Null) | None => 0,
            Some(value) => match value.as_u64() {
                Some(n) => n,
                None => {
                    self.issue(field, "expected a non-negative integer", Some(value));
                    0
                }
            },
        }
    }

    /// Optional 32-bit integer: absent becomes zero
    fn opt_u32(&self, field: &str) -> u32 {
        match u32::try_from(self.opt_u64(field)) {
            Ok(n) => n,
            Err(_) => {
                self.issue(field, "expected a 32-bit integer", self.get(field));
                0
            }
        }
    }

    /// Nullable 32-bit integer: absent or null becomes `None`
    fn nullable_u32(&self, field: &str) -> Option<u32> {
        let n = self.nullable_u64(field)?;
        match u32::try_from(n) {
            Ok(n) => Some(n),
            Err(_) => {
                self.issue(field, "expected a 32-bit integer or null", self.get(field));
                None
            }
        }
    }

    /// Nullable integer: absent or null becomes `None`
    fn nullable_u64(&self, field: &str) -> Option<u64> {
        match self.get(field) {
            Some(Value::Null) | None => None,
            Some(value) => match value.as_u64() {
                Some(n) => Some(n),
                None => {
                    self.issue(field, "expected a non-negative integer or null", Some(value));
                    None
                }
            },
        }
    }

    /// Optional array of integers: absent becomes empty
    fn opt_u64_array(&self, field: &str) -> Vec<u64> {
        let value = match self.get(field) {
            Some(Value::Null) | None => return Vec::new(),
            Some(value) => value,
        };
        let items = match value.as_array() {
            Some(items) => items,
            None => {
                self.issue(field, "expected an array of integers", Some(value));
                return Vec::new();
            }
        };
        let mut out = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            match item.as_u64() {
                Some(n) => out.push(n),
                None => self.issue(
                    &format!("{field}[{index}]"),
                    "expected a non-negative integer",
                    Some(item),
                ),
            }
        }
        out
    }

    /// Required array of objects, each validated by `f`
    fn req_items<T>(&self, field: &str, f: fn(&Value, &str, &mut Vec<FieldIssue>) -> T) -> Vec<T> {
        match self.get(field) {
            Some(value) => self.items(field, value, f),
            None => {
                self.issue(field, "required field is missing", None);
                Vec::new()
            }
        }
    }

    /// Optional array of objects: absent becomes empty
    fn opt_items<T>(&self, field: &str, f: fn(&Value, &str, &mut Vec<FieldIssue>) -> T) -> Vec<T> {
        match self.get(field) {
            Some(Value::Null) | None => Vec::new(),
            Some(value) => self.items(field, value, f),
        }
    }

    fn items<T>(
        &self,
        field: &str,
        value: &Value,
        f: fn(&Value, &str, &mut Vec<FieldIssue>) -> T,
    ) -> Vec<T> {
        let items = match value.as_array() {
            Some(items) => items,
            None => {
                self.issue(field, "expected an array", Some(value));
                return Vec::new();
            }
        };
        let mut issues = self.issues.borrow_mut();
        items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                let item_path = format!("{}[{index}]", self.field_path(field));
                f(item, &item_path, &mut **issues)
            })
            .collect()
    }
}

/// Short, single-line preview of a JSON value for issue reports
fn preview(value: &Value) -> String {
    let text = value.to_string();
    if text.chars().count() > 60 {
        let truncated: String = text.chars().take(60).collect();
        format!("{truncated}…")
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn movie_json() -> Value {
        json!({
            "id": 603,
            "title": "The Matrix",
            "overview": "A hacker learns the truth.",
            "poster_path": "/matrix.jpg",
            "backdrop_path": null,
            "release_date": "1999-03-31",
            "vote_average": 8.2,
            "vote_count": 24000,
            "popularity": 85.3,
            "adult": false,
            "original_language": "en",
            "original_title": "The Matrix",
            "genre_ids": [28, 878],
            "video": false
        })
    }

    fn page_json() -> Value {
        json!({
            "page": 1,
            "results": [movie_json()],
            "total_pages": 42,
            "total_results": 834
        })
    }

    #[test]
    fn test_validate_movie_list() {
        let payload = validate(SchemaId::MovieList, &page_json()).expect("should validate");
        let page = payload.as_movie_page().expect("should be a movie page");

        assert_eq!(page.page, 1);
        assert_eq!(page.results.len(), 1);
        assert_eq!(page.results[0].id, 603);
        assert_eq!(page.results[0].backdrop_path, None);
        assert_eq!(page.total_results, 834);
    }

    #[test]
    fn test_total_pages_capped() {
        let mut raw = page_json();
        raw["total_pages"] = json!(87231);

        let payload = validate(SchemaId::MovieList, &raw).expect("should validate");
        assert_eq!(payload.as_movie_page().unwrap().total_pages, 500);
    }

    #[test]
    fn test_total_pages_beyond_u32_still_caps() {
        let mut raw = page_json();
        // 2^32 + 1 would truncate to 1 if narrowed before the cap.
        raw["total_pages"] = json!(4_294_967_297u64);

        let payload = validate(SchemaId::MovieList, &raw).expect("should validate");
        assert_eq!(payload.as_movie_page().unwrap().total_pages, 500);
    }

    #[test]
    fn test_page_beyond_u32_is_an_issue() {
        let mut raw = page_json();
        raw["page"] = json!(u64::MAX);

        let failure = validate(SchemaId::MovieList, &raw).expect_err("should fail");
        assert!(failure.issues.iter().any(|issue| issue.path == "page"));
    }

    #[test]
    fn test_runtime_beyond_u32_is_an_issue() {
        let mut raw = details_json();
        raw["runtime"] = json!(4_294_967_296u64);

        let failure = validate(SchemaId::MovieDetails, &raw).expect_err("should fail");
        assert!(failure.issues.iter().any(|issue| issue.path == "runtime"));
    }

    #[test]
    fn test_missing_required_field_is_reported() {
        let mut raw = page_json();
        raw["results"][0]
            .as_object_mut()
            .unwrap()
            .remove("title");

        let failure = validate(SchemaId::MovieList, &raw).expect_err("should fail");
        assert_eq!(failure.schema, SchemaId::MovieList);
        assert!(failure
            .issues
            .iter()
            .any(|issue| issue.path == "results[0].title"));
    }

    #[test]
    fn test_wrong_type_reports_received_value() {
        let mut raw = page_json();
        raw["results"][0]["id"] = json!("not-a-number");

        let failure = validate(SchemaId::MovieList, &raw).expect_err("should fail");
        let issue = failure
            .issues
            .iter()
            .find(|issue| issue.path == "results[0].id")
            .expect("id issue should be present");
        assert_eq!(issue.found.as_deref(), Some("\"not-a-number\""));
    }

    #[test]
    fn test_negative_rating_rejected() {
        let mut raw = page_json();
        raw["results"][0]["vote_average"] = json!(-1.0);

        let failure = validate(SchemaId::MovieList, &raw).expect_err("should fail");
        assert!(failure
            .issues
            .iter()
            .any(|issue| issue.path == "results[0].vote_average"));
    }

    #[test]
    fn test_non_object_payload() {
        let failure = validate(SchemaId::MovieList, &json!([1, 2, 3])).expect_err("should fail");
        assert!(!failure.issues.is_empty());
    }

    fn details_json() -> Value {
        json!({
            "id": 603,
            "title": "The Matrix",
            "overview": "A hacker learns the truth.",
            "poster_path": "/matrix.jpg",
            "backdrop_path": null,
            "release_date": "1999-03-31",
            "vote_average": 8.2,
            "vote_count": 24000,
            "popularity": 85.3,
            "adult": false,
            "original_language": "en",
            "original_title": "The Matrix",
            "video": false,
            "budget": 63000000,
            "genres": [{"id": 28, "name": "Action"}],
            "homepage": "https://www.warnerbros.com/movies/matrix",
            "imdb_id": "tt0133093",
            "runtime": 136,
            "revenue": 463517383,
            "production_companies": [
                {"id": 79, "logo_path": null, "name": "Village Roadshow", "origin_country": "US"}
            ],
            "production_countries": [{"iso_3166_1": "US", "name": "United States of America"}],
            "spoken_languages": [{"english_name": "English", "iso_639_1": "en", "name": "English"}],
            "status": "Released",
            "tagline": "The fight for the future begins."
        })
    }

    #[test]
    fn test_validate_movie_details() {
        let payload = validate(SchemaId::MovieDetails, &details_json()).expect("should validate");
        let details = payload.as_movie_details().expect("should be details");

        assert_eq!(details.runtime, Some(136));
        assert_eq!(details.genres[0].name, "Action");
        assert_eq!(details.production_companies[0].logo_path, None);
    }

    #[test]
    fn test_missing_runtime_defaults_to_none() {
        let mut raw = details_json();
        raw.as_object_mut().unwrap().remove("runtime");

        let payload = validate(SchemaId::MovieDetails, &raw).expect("should validate");
        assert_eq!(payload.as_movie_details().unwrap().runtime, None);
    }

    #[test]
    fn test_missing_genres_defaults_to_empty() {
        let mut raw = details_json();
        raw.as_object_mut().unwrap().remove("genres");

        let payload = validate(SchemaId::MovieDetails, &raw).expect("should validate");
        assert!(payload.as_movie_details().unwrap().genres.is_empty());
    }

    #[test]
    fn test_validate_credits() {
        let raw = json!({
            "id": 603,
            "cast": [
                {"id": 6384, "name": "Keanu Reeves", "character": "Neo",
                 "profile_path": "/keanu.jpg", "order": 0}
            ],
            "crew": [
                {"id": 9339, "name": "Lilly Wachowski", "job": "Director",
                 "department": "Directing", "profile_path": null}
            ]
        });

        let payload = validate(SchemaId::MovieCredits, &raw).expect("should validate");
        let credits = payload.as_movie_credits().expect("should be credits");
        assert_eq!(credits.cast[0].character, "Neo");
        assert_eq!(credits.crew[0].job, "Director");
    }

    #[test]
    fn test_validate_videos() {
        let raw = json!({
            "id": 603,
            "results": [
                {"id": "abc", "key": "vKQi3bBA1y8", "name": "Official Trailer",
                 "site": "YouTube", "type": "Trailer", "official": true}
            ]
        });

        let payload = validate(SchemaId::MovieVideos, &raw).expect("should validate");
        let videos = payload.as_movie_videos().expect("should be videos");
        assert_eq!(videos.results[0].kind, "Trailer");
    }

    #[test]
    fn test_validate_genre_list() {
        let raw = json!({
            "genres": [{"id": 28, "name": "Action"}, {"id": 12, "name": "Adventure"}]
        });

        let payload = validate(SchemaId::GenreList, &raw).expect("should validate");
        assert_eq!(payload.as_genre_list().unwrap().genres.len(), 2);
    }

    #[test]
    fn test_validation_is_deterministic() {
        let mut raw = page_json();
        raw["results"][0].as_object_mut().unwrap().remove("id");
        raw["results"][0].as_object_mut().unwrap().remove("title");

        let first = validate(SchemaId::MovieList, &raw).expect_err("should fail");
        let second = validate(SchemaId::MovieList, &raw).expect_err("should fail");
        assert_eq!(first.issues, second.issues);
    }
}
