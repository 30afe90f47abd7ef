//! Sheet matching: cross-references card prints against one sheet's
//! weighted entry table to produce the wishlist-restricted view of that
//! sheet.

use crate::cards::{CardPrint, PrintKey};
use crate::sealed::Sheet;
use crate::wishlist::Wishlist;
use std::collections::HashMap;

/// Wishlist-restricted view of one sheet
#[derive(Debug, Clone)]
pub struct TargetSheet {
    pub total_weight: u64,
    pub fixed: bool,
    /// Sum of weights of wishlist-matching entries
    pub total_target_weight: u64,
    pub entries: Vec<TargetEntry>,
}

/// One wishlist-matching slot on a sheet
#[derive(Debug, Clone)]
pub struct TargetEntry {
    pub print: CardPrint,
    pub weight: u64,
    pub foil: bool,
}

impl TargetSheet {
    /// Effective denominator for the odds formulas. Fixed sheets count
    /// as 1 regardless of their declared total weight, so every listed
    /// entry is a guaranteed inclusion.
    pub fn effective_total_weight(&self) -> u64 {
        if self.fixed {
            1
        } else {
            self.total_weight
        }
    }
}

/// Single-sheet odds record for one print
#[derive(Debug, Clone, PartialEq)]
pub struct SheetOdds {
    pub sheet: String,
    pub foil: bool,
    /// Percent chance of this slot per single roll of the sheet
    pub odds: f64,
}

/// Per-print odds records with explicit first-discovery indices, used
/// downstream both for card-level odds and as the stable sort tie-break.
#[derive(Debug, Default)]
pub struct OddsAccumulator {
    index: HashMap<PrintKey, usize>,
    entries: Vec<(CardPrint, Vec<SheetOdds>)>,
}

impl OddsAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an odds record for a print, registering the print on
    /// first sight
    pub fn push(&mut self, print: &CardPrint, record: SheetOdds) {
        let key = print.key();
        let slot = match self.index.get(&key) {
            Some(&slot) => slot,
            None => {
                let slot = self.entries.len();
                self.entries.push((print.clone(), Vec::new()));
                self.index.insert(key, slot);
                slot
            }
        };
        self.entries[slot].1.push(record);
    }

    /// Prints and their records, in first-discovery order
    pub fn iter(&self) -> impl Iterator<Item = (&CardPrint, &[SheetOdds])> {
        self.entries.iter().map(|(p, r)| (p, r.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Cross-reference the prints in scope against one sheet's entry table.
///
/// Each wishlist-matching print is looked up by its sheet code and by
/// the ":foil"-suffixed code; every hit becomes a target entry and an
/// odds record. Unmatched sheets and cards simply yield empty results.
pub fn match_sheet(
    sheet_name: &str,
    sheet: &Sheet,
    possible_cards: &[CardPrint],
    wishlist: &Wishlist,
    accumulator: &mut OddsAccumulator,
) -> TargetSheet {
    let mut target = TargetSheet {
        total_weight: sheet.total_weight,
        fixed: sheet.fixed,
        total_target_weight: 0,
        entries: Vec::new(),
    };

    let effective_total = target.effective_total_weight();

    for print in possible_cards {
        if !wishlist.contains(&print.name) {
            continue;
        }

        let code = print.sheet_code();
        let foil_code = format!("{}:foil", code);

        for (lookup, foil) in [(&code, false), (&foil_code, true)] {
            if let Some(&weight) = sheet.cards.get(lookup.as_str()) {
                target.total_target_weight += weight;
                target.entries.push(TargetEntry {
                    print: print.clone(),
                    weight,
                    foil,
                });
                accumulator.push(
                    print,
                    SheetOdds {
                        sheet: sheet_name.to_string(),
                        foil,
                        odds: weight as f64 / effective_total as f64 * 100.0,
                    },
                );
            }
        }
    }

    target
}
