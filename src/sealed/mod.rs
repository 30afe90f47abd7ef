//! Booster reference feed: raw records and the validated catalog.

pub mod catalog;
pub mod feed;

pub use catalog::{BoosterCatalog, BoosterConfig, PackProduct, Sheet};
pub use feed::{fetch_feed, fetch_feed_from, load_feed_file, RawProduct, SEALED_DATA_URL};
