//! cinecache - browse the TMDB movie catalog from the terminal
//!
//! Thin binary over the library crate: parses arguments, wires the transport
//! and query store together, runs one query to completion and prints the
//! validated payload (or the classified error).

use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;

use cinecache::api::transport::TmdbTransport;
use cinecache::api::Endpoint;
use cinecache::cache::{QueryStatus, QueryStore, StoreConfig};
use cinecache::cli::{Cli, Command, FavoritesCommand};
use cinecache::data::{GenreList, MovieCredits, MovieDetails, MoviePage, MovieVideos};
use cinecache::diagnostics::LogSink;
use cinecache::error::ClassifiedError;
use cinecache::favorites::{FavoriteMovie, Favorites};
use cinecache::query::QueryHandle;
use cinecache::schema::ApiPayload;

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("Error: {message}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), String> {
    if let Command::Favorites { action } = &cli.command {
        return run_favorites(&cli, action).await;
    }

    let endpoint = match cli.command.endpoint() {
        Some(endpoint) => endpoint,
        None => return Ok(()),
    };

    let store = build_store(&cli)?;
    let payload = fetch(&store, endpoint).await?;
    print_payload(&payload);
    Ok(())
}

fn build_store(cli: &Cli) -> Result<Arc<QueryStore>, String> {
    let bearer = cli
        .api_key
        .clone()
        .filter(|key| !key.is_empty())
        .ok_or_else(|| {
            "No API credential: set TMDB_API_KEY or pass --api-key".to_string()
        })?;

    let mut transport = TmdbTransport::new(bearer);
    if let Some(language) = &cli.language {
        transport = transport.with_language(language.clone());
    }

    let config = StoreConfig {
        fetch_timeout: Duration::from_secs(cli.timeout),
    };
    Ok(Arc::new(QueryStore::with_parts(
        Arc::new(transport),
        Arc::new(LogSink),
        config,
    )))
}

/// Runs one query to completion and surfaces its classified error as a
/// printable message.
async fn fetch(store: &Arc<QueryStore>, endpoint: Endpoint) -> Result<ApiPayload, String> {
    let mut handle = QueryHandle::new(store, endpoint);
    let snapshot = handle.settled().await;
    match snapshot.status {
        QueryStatus::Success => snapshot
            .data
            .ok_or_else(|| "Query succeeded without data".to_string()),
        _ => Err(snapshot
            .error
            .as_ref()
            .map(describe_error)
            .unwrap_or_else(|| "Query did not complete".to_string())),
    }
}

fn describe_error(error: &ClassifiedError) -> String {
    if error.retryable {
        format!("{} (retrying later may help)", error.message)
    } else {
        error.message.clone()
    }
}

async fn run_favorites(cli: &Cli, action: &FavoritesCommand) -> Result<(), String> {
    let favorites = Favorites::open().map_err(|e| e.to_string())?;

    match action {
        FavoritesCommand::List => {
            let list = favorites.list().map_err(|e| e.to_string())?;
            if list.is_empty() {
                println!("No favorites yet.");
            }
            for favorite in list {
                println!(
                    "{:>5.1}  {} ({})  [id {}]",
                    favorite.vote_average, favorite.title, favorite.release_date, favorite.id
                );
            }
        }
        FavoritesCommand::Add { movie_id } => {
            let store = build_store(cli)?;
            let payload = fetch(&store, Endpoint::MovieDetails { movie_id: *movie_id }).await?;
            let details = payload
                .as_movie_details()
                .ok_or_else(|| "Unexpected payload for movie details".to_string())?;
            if favorites
                .add(FavoriteMovie::from_details(details))
                .map_err(|e| e.to_string())?
            {
                println!("Added \"{}\" to favorites.", details.title);
            } else {
                println!("\"{}\" is already a favorite.", details.title);
            }
        }
        FavoritesCommand::Remove { movie_id } => {
            if favorites.remove(*movie_id).map_err(|e| e.to_string())? {
                println!("Removed movie {movie_id} from favorites.");
            } else {
                println!("Movie {movie_id} is not in favorites.");
            }
        }
    }
    Ok(())
}

fn print_payload(payload: &ApiPayload) {
    match payload {
        ApiPayload::MovieList(page) => print_movie_page(page),
        ApiPayload::MovieDetails(details) => print_details(details),
        ApiPayload::MovieCredits(credits) => print_credits(credits),
        ApiPayload::MovieVideos(videos) => print_videos(videos),
        ApiPayload::GenreList(genres) => print_genres(genres),
    }
}

fn print_movie_page(page: &MoviePage) {
    println!(
        "Page {} of {} ({} results)",
        page.page, page.total_pages, page.total_results
    );
    for movie in &page.results {
        let year = movie.release_date.get(..4).unwrap_or("????");
        println!(
            "{:>5.1}  {} ({})  [id {}]",
            movie.vote_average, movie.title, year, movie.id
        );
    }
}

fn print_details(details: &MovieDetails) {
    println!("{} [id {}]", details.title, details.id);
    if details.title != details.original_title {
        println!("Original title: {}", details.original_title);
    }
    println!(
        "Released: {}  Status: {}",
        details.release_date, details.status
    );
    if let Some(runtime) = details.runtime {
        println!("Runtime: {runtime} min");
    }
    if !details.genres.is_empty() {
        let names: Vec<&str> = details.genres.iter().map(|g| g.name.as_str()).collect();
        println!("Genres: {}", names.join(", "));
    }
    println!(
        "Rating: {:.1} ({} votes)",
        details.vote_average, details.vote_count
    );
    if !details.tagline.is_empty() {
        println!("\"{}\"", details.tagline);
    }
    if !details.overview.is_empty() {
        println!("\n{}", details.overview);
    }
}

fn print_credits(credits: &MovieCredits) {
    println!("Cast:");
    for member in credits.cast.iter().take(15) {
        println!("  {} as {}", member.name, member.character);
    }
    let key_jobs = ["Director", "Screenplay", "Writer"];
    let crew: Vec<_> = credits
        .crew
        .iter()
        .filter(|member| key_jobs.contains(&member.job.as_str()))
        .collect();
    if !crew.is_empty() {
        println!("Crew:");
        for member in crew {
            println!("  {}: {}", member.job, member.name);
        }
    }
}

fn print_videos(videos: &MovieVideos) {
    if videos.results.is_empty() {
        println!("No videos.");
        return;
    }
    for video in &videos.results {
        println!("{} ({}, {}): {}", video.name, video.kind, video.site, video.key);
    }
}

fn print_genres(genres: &GenreList) {
    for genre in &genres.genres {
        println!("{:>6}  {}", genre.id, genre.name);
    }
}
