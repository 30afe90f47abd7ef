//! Web server for the pull-odds UI
//!
//! Provides REST API endpoints for wishlist management and per-set
//! booster odds, plus the single-page UI.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, Json},
    routing::{get, put},
    Form, Router,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::{Arc, RwLock};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

use crate::cards::CardCatalog;
use crate::odds::{assemble_set, PackResult};
use crate::scryfall::fetch_set_cards_from;
use crate::sealed::BoosterCatalog;
use crate::wishlist::Wishlist;

/// Shared application state. The booster catalog is immutable for the
/// process lifetime; cards and wishlist are read-locked snapshots
/// during computation and never held across an await.
#[derive(Clone)]
struct AppState {
    boosters: Arc<BoosterCatalog>,
    cards: Arc<RwLock<CardCatalog>>,
    wishlist: Arc<RwLock<Wishlist>>,
    scryfall_base: Arc<String>,
}

/// Wishlist replacement form (free text, one card per line)
#[derive(Deserialize)]
struct WishlistForm {
    list: String,
}

/// API response wrapper
#[derive(Serialize)]
struct ApiResponse<T> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<T> ApiResponse<T> {
    fn ok(data: T) -> Json<Self> {
        Json(Self {
            success: true,
            data: Some(data),
            error: None,
        })
    }
}

/// GET / - Serve the web UI (single HTML page)
async fn index_handler() -> Html<&'static str> {
    Html(include_str!("../static/index.html"))
}

/// GET /api/sets - set codes carrying at least one product
async fn sets_handler(State(state): State<AppState>) -> Json<ApiResponse<Vec<String>>> {
    let codes = state
        .boosters
        .set_codes()
        .into_iter()
        .map(String::from)
        .collect();
    ApiResponse::ok(codes)
}

/// GET /api/wishlist - current wishlist names
async fn get_wishlist_handler(State(state): State<AppState>) -> Json<ApiResponse<Vec<String>>> {
    let wishlist = state.wishlist.read().unwrap();
    ApiResponse::ok(wishlist.names().to_vec())
}

/// PUT /api/wishlist - replace the wishlist from free text
async fn put_wishlist_handler(
    State(state): State<AppState>,
    Form(form): Form<WishlistForm>,
) -> Json<ApiResponse<Vec<String>>> {
    let parsed = Wishlist::from_text(&form.list);
    log::info!("Wishlist replaced: {} names", parsed.len());

    let names = parsed.names().to_vec();
    *state.wishlist.write().unwrap() = parsed;

    ApiResponse::ok(names)
}

/// GET /api/odds/{set} - ranked pull odds for every product of a set
async fn odds_handler(
    State(state): State<AppState>,
    Path(set_code): Path<String>,
) -> Result<Json<ApiResponse<Vec<PackResult>>>, StatusCode> {
    let set_code = set_code.to_lowercase();

    // Source sets this computation needs but the catalog has not seen
    let missing: Vec<String> = {
        let cards = state.cards.read().unwrap();
        state
            .boosters
            .products_for_set(&set_code)
            .iter()
            .flat_map(|p| p.source_set_codes.iter())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .filter(|set| !cards.has_set(set))
            .cloned()
            .collect()
    };

    for set in missing {
        let fetched = match fetch_set_cards_from(&state.scryfall_base, &set).await {
            Ok(cards) => cards,
            Err(e) => {
                log::error!("Failed to fetch prints for set '{}': {}", set, e);
                return Err(StatusCode::INTERNAL_SERVER_ERROR);
            }
        };
        let prints = fetched.iter().map(|c| c.to_print()).collect();
        state.cards.write().unwrap().ingest_set(&set, prints);
    }

    // Snapshot the wishlist, then compute against the read-locked
    // catalog; results are recomputed on every request
    let wishlist = state.wishlist.read().unwrap().clone();
    let results = {
        let cards = state.cards.read().unwrap();
        assemble_set(&set_code, &state.boosters, &cards, &wishlist)
    };

    Ok(ApiResponse::ok(results))
}

/// Build the web server router
pub fn create_router(
    boosters: Arc<BoosterCatalog>,
    cards: Arc<RwLock<CardCatalog>>,
    wishlist: Arc<RwLock<Wishlist>>,
    scryfall_base: String,
) -> Router {
    let state = AppState {
        boosters,
        cards,
        wishlist,
        scryfall_base: Arc::new(scryfall_base),
    };

    Router::new()
        .route("/", get(index_handler))
        .route("/api/sets", get(sets_handler))
        .route(
            "/api/wishlist",
            put(put_wishlist_handler).get(get_wishlist_handler),
        )
        .route("/api/odds/{set}", get(odds_handler))
        .nest_service("/static", ServeDir::new("static"))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Start the web server (async)
///
/// Binds to 0.0.0.0 (all interfaces) to work with Docker port mapping.
/// When running locally, use firewall rules to restrict access.
pub async fn serve(
    boosters: Arc<BoosterCatalog>,
    scryfall_base: String,
    port: u16,
) -> Result<(), Box<dyn std::error::Error>> {
    let cards = Arc::new(RwLock::new(CardCatalog::new()));
    let wishlist = Arc::new(RwLock::new(Wishlist::new()));

    let app = create_router(boosters, cards, wishlist, scryfall_base);
    let addr = format!("0.0.0.0:{}", port);

    log::info!("Web UI listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
