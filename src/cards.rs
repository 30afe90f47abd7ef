//! Card print records and the per-set card catalog.
//!
//! Prints are identified by value key (set code, collector number, face
//! suffix), never by object identity; the same print observed twice maps
//! to the same key.

use serde::Serialize;
use std::collections::HashMap;

/// Value identity of a card print
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PrintKey {
    pub set_code: String,
    pub collector_number: String,
    pub face_suffix: Option<String>,
}

/// One physical printing of a card
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardPrint {
    pub name: String,
    pub set_code: String,
    pub collector_number: String,
    /// Face code for multi-faced prints ("a" = front face)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub face_suffix: Option<String>,
    pub rarity: String,
    /// Formats this print exists in ("paper", "mtgo", "arena")
    #[serde(skip)]
    pub games: Vec<String>,
    #[serde(skip)]
    pub multi_faced: bool,
}

impl CardPrint {
    /// Value key used in all per-print mappings
    pub fn key(&self) -> PrintKey {
        PrintKey {
            set_code: self.set_code.clone(),
            collector_number: self.collector_number.clone(),
            face_suffix: self.face_suffix.clone(),
        }
    }

    /// Code used to look this print up in a sheet's entry table:
    /// `set:collector_number`, face-suffixed for multi-faced prints
    pub fn sheet_code(&self) -> String {
        let mut code = format!("{}:{}", self.set_code, self.collector_number);
        if self.multi_faced {
            if let Some(face) = &self.face_suffix {
                code.push(':');
                code.push_str(face);
            }
        }
        code
    }

    /// Returns true if this print exists in paper
    pub fn is_paper(&self) -> bool {
        self.games.iter().any(|g| g == "paper")
    }
}

/// Card catalog grouped by set code.
///
/// Load-once snapshot semantics: callers ingest prints, then pass
/// immutable references into the odds engine. A set ingested with no
/// prints stays recorded as loaded (empty contribution, not an error).
#[derive(Debug, Default)]
pub struct CardCatalog {
    by_set: HashMap<String, Vec<CardPrint>>,
}

impl CardCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ingest prints, grouping by set code. Non-paper prints are dropped;
    /// prints whose key is already present in their set are skipped.
    pub fn ingest(&mut self, prints: Vec<CardPrint>) {
        for print in prints {
            if !print.is_paper() {
                continue;
            }
            let set = self.by_set.entry(print.set_code.clone()).or_default();
            let key = print.key();
            if set.iter().any(|p| p.key() == key) {
                log::debug!("Skipping duplicate print {}", print.sheet_code());
                continue;
            }
            set.push(print);
        }
    }

    /// Ingest the prints of one set, recording the set as loaded even
    /// when the print list is empty
    pub fn ingest_set(&mut self, set_code: &str, prints: Vec<CardPrint>) {
        self.by_set.entry(set_code.to_string()).or_default();
        self.ingest(prints);
    }

    /// Returns true if the set has been ingested (possibly empty)
    pub fn has_set(&self, set_code: &str) -> bool {
        self.by_set.contains_key(set_code)
    }

    /// All prints of a set, in ingestion order. Unknown sets yield an
    /// empty slice.
    pub fn cards_for_set(&self, set_code: &str) -> &[CardPrint] {
        self.by_set.get(set_code).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Total number of prints across all sets
    pub fn len(&self) -> usize {
        self.by_set.values().map(Vec::len).sum()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Ingested set codes
    pub fn sets(&self) -> impl Iterator<Item = &str> {
        self.by_set.keys().map(String::as_str)
    }
}

#[cfg(test)]
pub fn make_test_print(name: &str, set_code: &str, collector_number: &str) -> CardPrint {
    CardPrint {
        name: name.to_string(),
        set_code: set_code.to_string(),
        collector_number: collector_number.to_string(),
        face_suffix: None,
        rarity: "common".to_string(),
        games: vec!["paper".to_string()],
        multi_faced: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sheet_code_plain_print() {
        let print = make_test_print("Llanowar Elves", "dmu", "168");
        assert_eq!(print.sheet_code(), "dmu:168");
    }

    #[test]
    fn sheet_code_multi_faced_print() {
        let mut print = make_test_print("Jorn, God of Winter", "khm", "179");
        print.multi_faced = true;
        print.face_suffix = Some("a".to_string());
        assert_eq!(print.sheet_code(), "khm:179:a");
    }

    #[test]
    fn print_key_is_value_identity() {
        let a = make_test_print("Llanowar Elves", "dmu", "168");
        let b = make_test_print("Llanowar Elves", "dmu", "168");
        assert_eq!(a.key(), b.key());

        let c = make_test_print("Llanowar Elves", "m19", "314");
        assert_ne!(a.key(), c.key());
    }

    #[test]
    fn ingest_groups_by_set() {
        let mut catalog = CardCatalog::new();
        catalog.ingest(vec![
            make_test_print("Card A", "dmu", "1"),
            make_test_print("Card B", "dmu", "2"),
            make_test_print("Card C", "bro", "1"),
        ]);

        assert_eq!(catalog.cards_for_set("dmu").len(), 2);
        assert_eq!(catalog.cards_for_set("bro").len(), 1);
        assert_eq!(catalog.len(), 3);
    }

    #[test]
    fn ingest_skips_duplicate_keys() {
        let mut catalog = CardCatalog::new();
        catalog.ingest(vec![
            make_test_print("Card A", "dmu", "1"),
            make_test_print("Card A", "dmu", "1"),
        ]);

        assert_eq!(catalog.cards_for_set("dmu").len(), 1);
    }

    #[test]
    fn ingest_drops_non_paper_prints() {
        let mut digital = make_test_print("Alchemy Card", "ydmu", "1");
        digital.games = vec!["arena".to_string()];

        let mut catalog = CardCatalog::new();
        catalog.ingest(vec![digital, make_test_print("Card A", "dmu", "1")]);

        assert!(catalog.cards_for_set("ydmu").is_empty());
        assert_eq!(catalog.cards_for_set("dmu").len(), 1);
    }

    #[test]
    fn ingest_set_records_empty_set_as_loaded() {
        let mut catalog = CardCatalog::new();
        catalog.ingest_set("dmu", Vec::new());

        assert!(catalog.has_set("dmu"));
        assert!(catalog.cards_for_set("dmu").is_empty());
        assert!(!catalog.has_set("bro"));
    }

    #[test]
    fn unknown_set_yields_empty_slice() {
        let catalog = CardCatalog::new();
        assert!(catalog.cards_for_set("xyz").is_empty());
    }
}
