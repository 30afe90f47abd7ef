//! Validated booster catalog.
//!
//! The reference feed is trusted but externally authored, so every
//! structural assumption the odds engine relies on is checked here,
//! once, at load time.

use crate::error::{PackOddsError, Result};
use crate::sealed::feed::RawProduct;
use serde::Serialize;
use std::collections::BTreeMap;

/// Bounds on well-formed feed records
const MAX_SHEETS_PER_PRODUCT: usize = 512;
const MAX_BOOSTERS_PER_PRODUCT: usize = 256;
const MAX_ROLLS_PER_SHEET: u32 = 1024;
const MAX_CARDS_PER_SHEET: usize = 65_536;

/// A weighted pool of card slots a booster draws from
#[derive(Debug, Clone, Serialize)]
pub struct Sheet {
    pub total_weight: u64,
    pub fixed: bool,
    #[serde(skip)]
    pub cards: BTreeMap<String, u64>,
}

/// One booster variant within a product
#[derive(Debug, Clone, Serialize)]
pub struct BoosterConfig {
    pub weight: u64,
    /// Sheet name to independent draw count
    pub rolls: BTreeMap<String, u32>,
}

/// One sealed product: its sheets and booster variants
#[derive(Debug, Clone)]
pub struct PackProduct {
    pub name: String,
    pub code: String,
    pub set_code: String,
    pub source_set_codes: Vec<String>,
    pub variant_name: Option<String>,
    pub sheets: BTreeMap<String, Sheet>,
    pub boosters: Vec<BoosterConfig>,
}

impl PackProduct {
    /// Sum of booster weights; validated nonzero at load
    pub fn total_booster_weight(&self) -> u64 {
        self.boosters.iter().map(|b| b.weight).sum()
    }
}

/// Immutable catalog of validated sealed products, in feed order
#[derive(Debug, Default)]
pub struct BoosterCatalog {
    products: Vec<PackProduct>,
}

impl BoosterCatalog {
    /// Validate raw feed records and build the catalog. Fails fast on
    /// the first malformed product so a bad feed never reaches the
    /// odds engine.
    pub fn from_raw(raw: Vec<RawProduct>) -> Result<Self> {
        let mut products = Vec::with_capacity(raw.len());

        for record in raw {
            products.push(validate_product(record)?);
        }

        log::info!("Validated booster catalog: {} products", products.len());
        Ok(Self { products })
    }

    /// Build a catalog from already-validated products (for tests)
    #[cfg(test)]
    pub fn from_products(products: Vec<PackProduct>) -> Self {
        Self { products }
    }

    /// Look up a product by its code
    pub fn get(&self, code: &str) -> Option<&PackProduct> {
        self.products.iter().find(|p| p.code == code)
    }

    /// Products whose set code matches, in feed order
    pub fn products_for_set(&self, set_code: &str) -> Vec<&PackProduct> {
        self.products
            .iter()
            .filter(|p| p.set_code == set_code)
            .collect()
    }

    /// Distinct set codes carrying at least one product, sorted
    pub fn set_codes(&self) -> Vec<&str> {
        let mut codes: Vec<&str> = self.products.iter().map(|p| p.set_code.as_str()).collect();
        codes.sort_unstable();
        codes.dedup();
        codes
    }

    /// Get the number of products
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Iterate over all products in feed order
    pub fn iter(&self) -> impl Iterator<Item = &PackProduct> {
        self.products.iter()
    }
}

fn validate_product(record: RawProduct) -> Result<PackProduct> {
    let name = record.name;

    if record.sheets.len() > MAX_SHEETS_PER_PRODUCT {
        return Err(PackOddsError::LimitExceeded {
            product: name,
            detail: format!("{} sheets", record.sheets.len()),
        });
    }
    if record.boosters.len() > MAX_BOOSTERS_PER_PRODUCT {
        return Err(PackOddsError::LimitExceeded {
            product: name,
            detail: format!("{} boosters", record.boosters.len()),
        });
    }

    let mut sheets = BTreeMap::new();
    for (sheet_name, raw_sheet) in record.sheets {
        if !raw_sheet.fixed && raw_sheet.total_weight == 0 {
            return Err(PackOddsError::EmptySheetWeight {
                product: name,
                sheet: sheet_name,
            });
        }
        if raw_sheet.cards.len() > MAX_CARDS_PER_SHEET {
            return Err(PackOddsError::LimitExceeded {
                product: name,
                detail: format!("{} cards on sheet '{}'", raw_sheet.cards.len(), sheet_name),
            });
        }
        sheets.insert(
            sheet_name,
            Sheet {
                total_weight: raw_sheet.total_weight,
                fixed: raw_sheet.fixed,
                cards: raw_sheet.cards,
            },
        );
    }

    let mut boosters = Vec::with_capacity(record.boosters.len());
    for raw_booster in record.boosters {
        for (sheet_name, rolls) in &raw_booster.sheets {
            if !sheets.contains_key(sheet_name) {
                return Err(PackOddsError::UnknownSheet {
                    product: name,
                    sheet: sheet_name.clone(),
                });
            }
            if *rolls > MAX_ROLLS_PER_SHEET {
                return Err(PackOddsError::LimitExceeded {
                    product: name,
                    detail: format!("{} rolls of sheet '{}'", rolls, sheet_name),
                });
            }
        }
        boosters.push(BoosterConfig {
            weight: raw_booster.weight,
            rolls: raw_booster.sheets,
        });
    }

    if !boosters.is_empty() && boosters.iter().map(|b| b.weight).sum::<u64>() == 0 {
        return Err(PackOddsError::NoBoosterWeight { product: name });
    }

    // Cards may be pooled from several sets; a product that names none
    // draws from its own set
    let source_set_codes = if record.source_set_codes.is_empty() {
        vec![record.set_code.clone()]
    } else {
        record.source_set_codes
    };

    Ok(PackProduct {
        name,
        code: record.code,
        set_code: record.set_code,
        source_set_codes,
        variant_name: record.variant_name,
        sheets,
        boosters,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sealed::feed::{RawBooster, RawSheet};

    fn raw_sheet(total_weight: u64, fixed: bool, cards: &[(&str, u64)]) -> RawSheet {
        RawSheet {
            total_weight,
            fixed,
            cards: cards
                .iter()
                .map(|(code, w)| (code.to_string(), *w))
                .collect(),
        }
    }

    fn raw_booster(weight: u64, rolls: &[(&str, u32)]) -> RawBooster {
        RawBooster {
            weight,
            sheets: rolls
                .iter()
                .map(|(name, count)| (name.to_string(), *count))
                .collect(),
        }
    }

    fn raw_product(name: &str) -> RawProduct {
        RawProduct {
            name: name.to_string(),
            code: "tst-draft".to_string(),
            set_code: "tst".to_string(),
            source_set_codes: vec!["tst".to_string()],
            variant_name: None,
            sheets: [("common".to_string(), raw_sheet(100, false, &[("tst:1", 10)]))].into(),
            boosters: vec![raw_booster(1, &[("common", 10)])],
        }
    }

    #[test]
    fn valid_product_passes() {
        let catalog = BoosterCatalog::from_raw(vec![raw_product("Test Draft Booster")]).unwrap();
        assert_eq!(catalog.len(), 1);

        let product = catalog.get("tst-draft").unwrap();
        assert_eq!(product.total_booster_weight(), 1);
        assert_eq!(product.sheets["common"].total_weight, 100);
    }

    #[test]
    fn booster_rolling_unknown_sheet_is_rejected() {
        let mut record = raw_product("Test Draft Booster");
        record.boosters = vec![raw_booster(1, &[("rare", 1)])];

        let result = BoosterCatalog::from_raw(vec![record]);
        match result {
            Err(PackOddsError::UnknownSheet { product, sheet }) => {
                assert_eq!(product, "Test Draft Booster");
                assert_eq!(sheet, "rare");
            }
            other => panic!("Expected UnknownSheet, got: {other:?}"),
        }
    }

    #[test]
    fn non_fixed_zero_weight_sheet_is_rejected() {
        let mut record = raw_product("Test Draft Booster");
        record
            .sheets
            .insert("broken".to_string(), raw_sheet(0, false, &[]));

        let result = BoosterCatalog::from_raw(vec![record]);
        assert!(matches!(
            result,
            Err(PackOddsError::EmptySheetWeight { sheet, .. }) if sheet == "broken"
        ));
    }

    #[test]
    fn fixed_zero_weight_sheet_is_allowed() {
        let mut record = raw_product("Test Draft Booster");
        record
            .sheets
            .insert("token".to_string(), raw_sheet(0, true, &[("ttst:1", 1)]));

        assert!(BoosterCatalog::from_raw(vec![record]).is_ok());
    }

    #[test]
    fn zero_total_booster_weight_is_rejected() {
        let mut record = raw_product("Test Draft Booster");
        record.boosters = vec![raw_booster(0, &[("common", 1)]), raw_booster(0, &[])];

        let result = BoosterCatalog::from_raw(vec![record]);
        assert!(matches!(result, Err(PackOddsError::NoBoosterWeight { .. })));
    }

    #[test]
    fn excessive_roll_count_is_rejected() {
        let mut record = raw_product("Test Draft Booster");
        record.boosters = vec![raw_booster(1, &[("common", 100_000)])];

        let result = BoosterCatalog::from_raw(vec![record]);
        assert!(matches!(result, Err(PackOddsError::LimitExceeded { .. })));
    }

    #[test]
    fn missing_source_sets_default_to_own_set() {
        let mut record = raw_product("Test Draft Booster");
        record.source_set_codes = Vec::new();

        let catalog = BoosterCatalog::from_raw(vec![record]).unwrap();
        assert_eq!(catalog.get("tst-draft").unwrap().source_set_codes, ["tst"]);
    }

    #[test]
    fn products_for_set_filters_by_code() {
        let mut other = raw_product("Other Set Booster");
        other.code = "oth-draft".to_string();
        other.set_code = "oth".to_string();

        let catalog =
            BoosterCatalog::from_raw(vec![raw_product("Test Draft Booster"), other]).unwrap();

        let for_tst = catalog.products_for_set("tst");
        assert_eq!(for_tst.len(), 1);
        assert_eq!(for_tst[0].code, "tst-draft");
        assert!(catalog.products_for_set("xyz").is_empty());

        assert_eq!(catalog.set_codes(), ["oth", "tst"]);
    }
}
