//! Raw booster reference feed parsing and loading.
//!
//! The feed is a JSON array with one record per sealed product,
//! describing its print sheets and booster roll configurations.

use crate::error::{PackOddsError, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

/// Public sealed-product reference data
pub const SEALED_DATA_URL: &str =
    "https://raw.githubusercontent.com/taw/magic-sealed-data/master/sealed_extended_data.json";

/// One sealed product as it appears in the feed
#[derive(Debug, Deserialize, Clone)]
pub struct RawProduct {
    pub name: String,
    pub code: String,
    pub set_code: String,
    /// Sets cards may be pooled from; defaults to the product's own set
    #[serde(default)]
    pub source_set_codes: Vec<String>,
    #[serde(default)]
    pub variant_name: Option<String>,
    pub sheets: BTreeMap<String, RawSheet>,
    pub boosters: Vec<RawBooster>,
}

/// A weighted pool of card slots
#[derive(Debug, Deserialize, Clone)]
pub struct RawSheet {
    pub total_weight: u64,
    /// Fixed sheets are always fully included, never sampled
    #[serde(default)]
    pub fixed: bool,
    /// Card code (optionally ":foil"-suffixed) to weight
    pub cards: BTreeMap<String, u64>,
}

/// One booster variant: relative weight plus per-sheet roll counts
#[derive(Debug, Deserialize, Clone)]
pub struct RawBooster {
    pub weight: u64,
    pub sheets: BTreeMap<String, u32>,
}

/// Load the feed from a local JSON file
pub fn load_feed_file(path: &Path) -> Result<Vec<RawProduct>> {
    log::info!("Loading booster feed from {}", path.display());

    let content = std::fs::read_to_string(path)?;
    let products: Vec<RawProduct> = serde_json::from_str(&content)?;

    log::info!("Loaded {} products from feed file", products.len());
    Ok(products)
}

/// Fetch the feed from the public reference URL
pub async fn fetch_feed() -> Result<Vec<RawProduct>> {
    fetch_feed_from(SEALED_DATA_URL).await
}

/// Fetch the feed from a specific URL
pub async fn fetch_feed_from(url: &str) -> Result<Vec<RawProduct>> {
    log::info!("Fetching booster feed from {}", url);

    let response = reqwest::Client::new()
        .get(url)
        .header("User-Agent", "pack_odds/1.0")
        .send()
        .await?;

    if !response.status().is_success() {
        return Err(PackOddsError::HttpStatus(response.status()));
    }

    let products: Vec<RawProduct> = response.json().await?;

    log::info!("Fetched {} products from feed", products.len());
    Ok(products)
}
