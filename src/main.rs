//! Pack Odds - MTG booster pull-odds calculator
//!
//! Loads the sealed-product reference feed once, validates it, and
//! serves the wishlist odds UI.

use clap::Parser;
use pack_odds::scryfall::SCRYFALL_API_URL;
use pack_odds::sealed::{fetch_feed_from, load_feed_file, BoosterCatalog, SEALED_DATA_URL};
use std::path::PathBuf;
use std::sync::Arc;

/// Booster pull-odds server - ranks wishlist cards by pull probability
#[derive(Parser, Debug)]
#[command(name = "pack_odds")]
#[command(version, about, long_about = None)]
struct Args {
    /// Port for the web UI
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Load the booster reference feed from a local JSON file instead
    /// of fetching it
    #[arg(long)]
    feed_file: Option<PathBuf>,

    /// URL of the booster reference feed
    #[arg(long, default_value = SEALED_DATA_URL)]
    feed_url: String,

    /// Base URL of the card database API
    #[arg(long, default_value = SCRYFALL_API_URL)]
    scryfall_url: String,
}

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    log::info!("Starting pack_odds...");

    // Load the reference feed once; it is immutable for the process
    // lifetime
    let raw = match &args.feed_file {
        Some(path) => load_feed_file(path),
        None => fetch_feed_from(&args.feed_url).await,
    };
    let raw = match raw {
        Ok(raw) => raw,
        Err(e) => {
            log::error!("Failed to load booster feed: {}", e);
            std::process::exit(1);
        }
    };

    // The feed is externally authored: reject malformed products up
    // front instead of computing nonsense odds later
    let boosters = match BoosterCatalog::from_raw(raw) {
        Ok(catalog) => catalog,
        Err(e) => {
            log::error!("Invalid booster feed: {}", e);
            std::process::exit(1);
        }
    };

    if boosters.is_empty() {
        log::warn!("Booster feed contains no products");
    }

    if let Err(e) = pack_odds::web::serve(Arc::new(boosters), args.scryfall_url, args.port).await {
        log::error!("Web server error: {}", e);
        std::process::exit(1);
    }
}
