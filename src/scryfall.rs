//! Scryfall API client for fetching card prints by set.
//!
//! Uses async reqwest for non-blocking HTTP requests. Fetch functions
//! take an explicit base URL so tests can point them at a mock server.

use crate::cards::CardPrint;
use crate::error::{PackOddsError, Result};
use serde::Deserialize;

/// Production Scryfall API base URL
pub const SCRYFALL_API_URL: &str = "https://api.scryfall.com";

/// Search pages are bounded to guard against a runaway pagination loop
const MAX_SEARCH_PAGES: usize = 64;

/// Scryfall card response
#[derive(Debug, Deserialize, Clone)]
pub struct ScryfallCard {
    pub name: String,
    pub set: String,
    pub collector_number: String,
    #[serde(default)]
    pub rarity: String,
    /// Formats this print exists in ("paper", "mtgo", "arena")
    #[serde(default)]
    pub games: Vec<String>,
    /// For double-faced cards, faces are listed separately
    #[serde(default)]
    pub card_faces: Option<Vec<CardFace>>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CardFace {
    pub name: String,
}

impl ScryfallCard {
    /// Convert to the catalog's print record. Multi-faced prints get
    /// the front-face suffix used by sheet codes.
    pub fn to_print(&self) -> CardPrint {
        let multi_faced = self
            .card_faces
            .as_ref()
            .map(|faces| faces.len() > 1)
            .unwrap_or(false);

        CardPrint {
            name: self.name.clone(),
            set_code: self.set.clone(),
            collector_number: self.collector_number.clone(),
            face_suffix: multi_faced.then(|| "a".to_string()),
            rarity: self.rarity.clone(),
            games: self.games.clone(),
            multi_faced,
        }
    }
}

/// One page of a Scryfall search
#[derive(Debug, Deserialize)]
struct SearchPage {
    pub data: Vec<ScryfallCard>,
    #[serde(default)]
    pub has_more: bool,
    #[serde(default)]
    pub next_page: Option<String>,
}

/// Scryfall API error response
#[derive(Debug, Deserialize)]
pub struct ScryfallError {
    pub status: u16,
    pub code: String,
    pub details: String,
}

/// Fetch every print of a set, following pagination.
///
/// A 404 from the search endpoint means the card database does not
/// know the set; that is an empty result, not an error.
pub async fn fetch_set_cards_from(base_url: &str, set_code: &str) -> Result<Vec<ScryfallCard>> {
    let query = format!("e:{}", set_code.to_lowercase());
    let mut url = format!(
        "{}/cards/search?q={}&unique=prints",
        base_url,
        urlencoding::encode(&query)
    );

    log::info!("Fetching prints for set '{}' from Scryfall", set_code);

    let client = reqwest::Client::new();
    let mut cards = Vec::new();

    for page in 0..MAX_SEARCH_PAGES {
        log::debug!("Fetching search page {}: {}", page + 1, url);

        let response = client
            .get(&url)
            .header("User-Agent", "pack_odds/1.0")
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            log::info!("Set '{}' not found on Scryfall", set_code);
            return Ok(Vec::new());
        }
        if !response.status().is_success() {
            return Err(PackOddsError::HttpStatus(response.status()));
        }

        let search_page: SearchPage = response.json().await?;
        cards.extend(search_page.data);

        match (search_page.has_more, search_page.next_page) {
            (true, Some(next)) => url = next,
            _ => {
                log::info!("Fetched {} prints for set '{}'", cards.len(), set_code);
                return Ok(cards);
            }
        }
    }

    log::warn!(
        "Stopping pagination for set '{}' after {} pages",
        set_code,
        MAX_SEARCH_PAGES
    );
    Ok(cards)
}

/// Fetch every print of a set from the production API
pub async fn fetch_set_cards(set_code: &str) -> Result<Vec<ScryfallCard>> {
    fetch_set_cards_from(SCRYFALL_API_URL, set_code).await
}

/// Fetch a single card by name (fuzzy search), for wishlist validation
pub async fn fetch_card_by_name_from(base_url: &str, name: &str) -> Result<ScryfallCard> {
    let url = format!(
        "{}/cards/named?fuzzy={}",
        base_url,
        urlencoding::encode(name)
    );

    log::debug!("Fetching card from Scryfall: {}", name);

    let response = reqwest::Client::new()
        .get(&url)
        .header("User-Agent", "pack_odds/1.0")
        .send()
        .await?;

    if response.status().is_success() {
        Ok(response.json::<ScryfallCard>().await?)
    } else {
        let error: ScryfallError = response.json().await?;
        Err(PackOddsError::ApiResponse {
            code: error.code,
            details: error.details,
        })
    }
}

#[cfg(test)]
#[path = "scryfall_tests.rs"]
mod tests;
