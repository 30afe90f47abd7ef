//! Pack Odds - MTG booster pull-odds calculator
//!
//! Estimates the probability of pulling wishlist cards from each sealed
//! booster product of a set, and ranks every wishlist card by its
//! individual pull probability.

pub mod cards;
pub mod error;
pub mod odds;
pub mod scryfall;
pub mod sealed;
pub mod web;
pub mod wishlist;

pub use cards::{CardCatalog, CardPrint, PrintKey};
pub use error::{PackOddsError, Result};
pub use odds::{assemble_set, PackResult};
pub use sealed::{BoosterCatalog, PackProduct};
pub use wishlist::Wishlist;
