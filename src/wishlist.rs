//! Free-text wishlist parsing and membership.

use std::collections::HashSet;

/// A deduplicated set of wished-for card names with case-insensitive
/// membership. Quantities in the input are accepted and discarded.
#[derive(Debug, Clone, Default)]
pub struct Wishlist {
    /// Names as first seen, for display
    names: Vec<String>,
    /// Lowercased names for membership tests
    index: HashSet<String>,
}

/// Parse a single wishlist line into (quantity, name).
/// Accepts "4 Lightning Bolt", "4x Lightning Bolt" and bare names.
fn parse_line(line: &str) -> Option<(i32, String)> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }

    let mut parts = trimmed.splitn(2, ' ');
    let first = parts.next()?;
    let rest = parts.next();

    let quantity = first
        .strip_suffix(['x', 'X'])
        .unwrap_or(first)
        .parse::<i32>()
        .ok();

    match (quantity, rest) {
        (Some(q), Some(name)) if !name.trim().is_empty() => Some((q, name.trim().to_string())),
        _ => Some((1, trimmed.to_string())),
    }
}

impl Wishlist {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a free-text wishlist: one card per line, blank lines and
    /// the "Deck" / "Sideboard" headers skipped, leading counts dropped.
    pub fn from_text(text: &str) -> Self {
        let mut wishlist = Self::new();
        for line in text.lines() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed == "Deck" || trimmed == "Sideboard" {
                continue;
            }
            if let Some((_, name)) = parse_line(trimmed) {
                wishlist.add(&name);
            }
        }
        wishlist
    }

    /// Add a name; duplicates (case-insensitive) are ignored
    pub fn add(&mut self, name: &str) {
        let name = name.trim();
        if name.is_empty() {
            return;
        }
        if self.index.insert(name.to_lowercase()) {
            self.names.push(name.to_string());
        }
    }

    /// Case-insensitive membership test
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains(&name.trim().to_lowercase())
    }

    /// Names in first-seen order
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
