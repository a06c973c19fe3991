//! PowerSearch: detect the search query on a page URL and print where it
//! would lead on other search engines
//!
//! Stand-in for the browser glue: takes the page URL on the command line
//! instead of the active tab, and prints instead of navigating.

use anyhow::Result;
use powersearch::{config, JsonFileStore, SearchSession};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();

    if args.iter().any(|a| a == "-V" || a == "--version") {
        println!("powersearch {}", powersearch::VERSION);
        return Ok(());
    }
    if args.is_empty() || args.iter().any(|a| a == "-h" || a == "--help") {
        print_usage();
        return Ok(());
    }

    // Load configuration
    let settings = config::load()?;

    // Initialize logging
    let default_level = if settings.general.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    info!("Starting PowerSearch v{}", powersearch::VERSION);

    let store_path = settings.storage.resolved_path();
    info!("Using storage file: {}", store_path.display());
    let store = Arc::new(JsonFileStore::new(store_path));

    let session = SearchSession::open(store, &settings, &args[0]).await?;

    match session.current_query() {
        Some(query) => println!("Current search: \"{}\"", query),
        None => println!("No search query detected"),
    }

    if let Some(target) = args.get(1) {
        println!("{}", session.switch_to(target)?);
        return Ok(());
    }

    for target in session.targets() {
        match session.destination(&target.url) {
            Ok(url) => println!("{} {:<12} {}", target.icon, target.name, url),
            Err(_) => println!("{} {}", target.icon, target.name),
        }
    }

    Ok(())
}

/// Print usage information
fn print_usage() {
    println!(
        r#"
PowerSearch v{}
Re-run the search on the current page with another search engine

USAGE:
    powersearch <PAGE_URL> [TARGET]

ARGS:
    <PAGE_URL>    URL of the page to detect the search query on
    [TARGET]      Name of the engine to switch to; lists all targets if omitted

OPTIONS:
    -h, --help       Print help information
    -V, --version    Print version information

ENVIRONMENT VARIABLES:
    POWERSEARCH_SETTINGS_PATH   Path to settings.yml
    POWERSEARCH_DEBUG           Enable debug logging (true/false)
    POWERSEARCH_STORAGE_PATH    Path to the storage file
    POWERSEARCH_STORAGE_KEY     Storage key holding the custom engines
"#,
        powersearch::VERSION
    );
}
