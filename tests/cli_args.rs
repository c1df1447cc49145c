//! Tests that parsed CLI commands map onto the right endpoints and that the
//! mapping composes with cache-key derivation the way call sites rely on.

use clap::Parser;

use cinecache::api::Endpoint;
use cinecache::cache::derive_key;
use cinecache::cli::{Cli, Command, FavoritesCommand};

fn endpoint_of(args: &[&str]) -> Option<Endpoint> {
    Cli::parse_from(args).command.endpoint()
}

#[test]
fn test_each_query_command_has_an_endpoint() {
    let commands: Vec<Vec<&str>> = vec![
        vec!["cinecache", "popular"],
        vec!["cinecache", "top-rated"],
        vec!["cinecache", "upcoming"],
        vec!["cinecache", "now-playing"],
        vec!["cinecache", "search", "matrix"],
        vec!["cinecache", "details", "603"],
        vec!["cinecache", "credits", "603"],
        vec!["cinecache", "videos", "603"],
        vec!["cinecache", "recommend", "603"],
        vec!["cinecache", "genres"],
        vec!["cinecache", "discover"],
    ];

    for args in commands {
        assert!(
            endpoint_of(&args).is_some(),
            "command {args:?} should map to an endpoint"
        );
    }
}

#[test]
fn test_favorites_commands_have_no_endpoint() {
    for args in [
        vec!["cinecache", "favorites", "list"],
        vec!["cinecache", "favorites", "add", "603"],
        vec!["cinecache", "favorites", "remove", "603"],
    ] {
        assert!(endpoint_of(&args).is_none());
    }
}

#[test]
fn test_repeated_invocations_derive_identical_keys() {
    let first = endpoint_of(&["cinecache", "discover", "--genre", "28", "--genre", "12"])
        .expect("endpoint");
    let second = endpoint_of(&["cinecache", "discover", "--genre", "12", "--genre", "28"])
        .expect("endpoint");

    // Genre order on the command line must not change the cache identity.
    assert_eq!(derive_key(&first), derive_key(&second));
}

#[test]
fn test_search_and_discover_do_not_collide() {
    let search = endpoint_of(&["cinecache", "search", "matrix"]).expect("endpoint");
    let discover = endpoint_of(&["cinecache", "discover"]).expect("endpoint");

    assert_ne!(derive_key(&search), derive_key(&discover));
}

#[test]
fn test_favorites_subcommand_shape() {
    let cli = Cli::parse_from(["cinecache", "favorites", "remove", "550"]);
    assert_eq!(
        cli.command,
        Command::Favorites {
            action: FavoritesCommand::Remove { movie_id: 550 }
        }
    );
}
