//! Per-set orchestration: product filtering, card pooling, odds
//! computation, and ranked result assembly.

use crate::cards::{CardCatalog, CardPrint};
use crate::odds::booster::product_odds;
use crate::odds::card::card_odds;
use crate::odds::sheet::{match_sheet, OddsAccumulator, TargetSheet};
use crate::sealed::{BoosterCatalog, PackProduct};
use crate::wishlist::Wishlist;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Product-name substrings excluded from results (paper retail scope)
pub const EXCLUDED_CATEGORIES: [&str; 5] = ["Arena", "Promo", "Tournament", "Topper", "Sample"];

/// One booster variant's contribution to a product's odds
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoosterBreakdown {
    pub weight: u64,
    /// Probability in [0, 1] of at least one wishlist hit
    pub odds: f64,
}

/// Wishlist-facing summary of one sheet
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetSummary {
    pub total_weight: u64,
    pub total_target_weight: u64,
    pub fixed: bool,
}

/// One wishlist card ranked within a product
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedCard {
    #[serde(flatten)]
    pub print: CardPrint,
    /// Probability in [0, 1] of pulling this print from a single pack
    pub odds: f64,
    /// Same probability as a percentage, for display
    pub odds_percent: f64,
}

/// Computed odds for one sealed product
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PackResult {
    pub pack_name: String,
    pub pack_code: String,
    pub set_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variant_name: Option<String>,
    pub boosters: Vec<BoosterBreakdown>,
    pub sheets: BTreeMap<String, SheetSummary>,
    /// Probability in [0, 1] of at least one wishlist hit per pack
    pub total_odds: f64,
    pub odds_percent: f64,
    pub cards_ranked_by_odds: Vec<RankedCard>,
}

/// Returns true if the product belongs to an excluded retail category
fn is_excluded(product: &PackProduct) -> bool {
    EXCLUDED_CATEGORIES
        .iter()
        .any(|category| product.name.contains(category))
}

/// Compute odds for one product against a wishlist
pub fn assemble_product(
    product: &PackProduct,
    cards: &CardCatalog,
    wishlist: &Wishlist,
) -> PackResult {
    // Pool cards from every source set. Overlapping source sets
    // contribute duplicates; they are accepted, not deduplicated.
    let possible_cards: Vec<CardPrint> = product
        .source_set_codes
        .iter()
        .flat_map(|set| cards.cards_for_set(set).iter().cloned())
        .collect();

    let mut accumulator = OddsAccumulator::new();
    let mut targets: BTreeMap<String, TargetSheet> = BTreeMap::new();

    for (sheet_name, sheet) in &product.sheets {
        let target = match_sheet(
            sheet_name,
            sheet,
            &possible_cards,
            wishlist,
            &mut accumulator,
        );
        targets.insert(sheet_name.clone(), target);
    }

    let (per_booster, total_odds) = product_odds(&product.boosters, &targets);

    let mut hits = card_odds(&accumulator, &product.boosters);
    // Descending by odds; ties resolve by first-discovery order
    hits.sort_by(|a, b| {
        b.odds
            .partial_cmp(&a.odds)
            .unwrap_or(Ordering::Equal)
            .then(a.discovery.cmp(&b.discovery))
    });

    let cards_ranked_by_odds = hits
        .into_iter()
        .map(|hit| RankedCard {
            print: hit.print,
            odds: hit.odds,
            odds_percent: hit.odds * 100.0,
        })
        .collect();

    let sheets = targets
        .into_iter()
        .map(|(name, target)| {
            (
                name,
                SheetSummary {
                    total_weight: target.total_weight,
                    total_target_weight: target.total_target_weight,
                    fixed: target.fixed,
                },
            )
        })
        .collect();

    let boosters = product
        .boosters
        .iter()
        .zip(per_booster)
        .map(|(config, odds)| BoosterBreakdown {
            weight: config.weight,
            odds,
        })
        .collect();

    PackResult {
        pack_name: product.name.clone(),
        pack_code: product.code.clone(),
        set_code: product.set_code.clone(),
        variant_name: product.variant_name.clone(),
        boosters,
        sheets,
        total_odds,
        odds_percent: total_odds * 100.0,
        cards_ranked_by_odds,
    }
}

/// Compute ranked results for every paper product of a set, in feed
/// order. Recomputed from scratch on every call; nothing is cached
/// across wishlist changes.
pub fn assemble_set(
    set_code: &str,
    boosters: &BoosterCatalog,
    cards: &CardCatalog,
    wishlist: &Wishlist,
) -> Vec<PackResult> {
    let results: Vec<PackResult> = boosters
        .products_for_set(set_code)
        .into_iter()
        .filter(|product| {
            if is_excluded(product) {
                log::debug!("Excluding non-retail product '{}'", product.name);
                return false;
            }
            true
        })
        .map(|product| assemble_product(product, cards, wishlist))
        .collect();

    log::debug!(
        "Assembled {} pack results for set '{}' against {} wishlist names",
        results.len(),
        set_code,
        wishlist.len()
    );

    results
}
