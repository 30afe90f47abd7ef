//! Per-card pull probability, aggregated across a product's boosters.

use crate::cards::CardPrint;
use crate::odds::sheet::{OddsAccumulator, SheetOdds};
use crate::sealed::BoosterConfig;

/// One print's aggregated pull probability for a product
#[derive(Debug, Clone)]
pub struct CardHit {
    pub print: CardPrint,
    /// First-discovery index, the stable sort tie-break
    pub discovery: usize,
    /// Probability in [0, 1] of pulling this print at least once from a
    /// single pack
    pub odds: f64,
}

/// Probability of hitting this print in one booster: the complement of
/// missing every one of its slots on every rolled sheet. Records that
/// share a booster are independent events and multiply into the miss
/// term.
fn booster_hit(records: &[SheetOdds], booster: &BoosterConfig) -> f64 {
    let mut miss = 1.0;

    for record in records {
        if let Some(&rolls) = booster.rolls.get(&record.sheet) {
            miss *= (1.0 - record.odds / 100.0).powi(rolls as i32);
        }
    }

    1.0 - miss
}

/// Compute each accumulated print's pull probability for the product,
/// weighted across its booster variants. Output order is discovery
/// order; ranking happens in the assembler.
pub fn card_odds(accumulator: &OddsAccumulator, boosters: &[BoosterConfig]) -> Vec<CardHit> {
    let total_weight: u64 = boosters.iter().map(|b| b.weight).sum();
    if total_weight == 0 {
        return Vec::new();
    }

    accumulator
        .iter()
        .enumerate()
        .map(|(discovery, (print, records))| {
            let odds = boosters
                .iter()
                .map(|b| booster_hit(records, b) * b.weight as f64 / total_weight as f64)
                .sum();
            CardHit {
                print: print.clone(),
                discovery,
                odds,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::make_test_print;

    fn record(sheet: &str, odds: f64) -> SheetOdds {
        SheetOdds {
            sheet: sheet.to_string(),
            foil: false,
            odds,
        }
    }

    fn booster(weight: u64, rolls: &[(&str, u32)]) -> BoosterConfig {
        BoosterConfig {
            weight,
            rolls: rolls
                .iter()
                .map(|(name, count)| (name.to_string(), *count))
                .collect(),
        }
    }

    fn accumulate(records: Vec<SheetOdds>) -> OddsAccumulator {
        let print = make_test_print("Wanted Card", "tst", "1");
        let mut acc = OddsAccumulator::new();
        for rec in records {
            acc.push(&print, rec);
        }
        acc
    }

    #[test]
    fn two_sheets_rolled_once_each() {
        // 10% on each of two sheets: 1 - 0.9 * 0.9 = 0.19
        let acc = accumulate(vec![record("a", 10.0), record("b", 10.0)]);
        let hits = card_odds(&acc, &[booster(1, &[("a", 1), ("b", 1)])]);

        assert_eq!(hits.len(), 1);
        assert!((hits[0].odds - 0.19).abs() < 1e-12);
    }

    #[test]
    fn roll_count_raises_miss_power() {
        // 10% sheet rolled 3 times: 1 - 0.9^3 = 0.271
        let acc = accumulate(vec![record("common", 10.0)]);
        let hits = card_odds(&acc, &[booster(1, &[("common", 3)])]);

        assert!((hits[0].odds - 0.271).abs() < 1e-12);
    }

    #[test]
    fn records_on_unrolled_sheets_do_not_count() {
        let acc = accumulate(vec![record("common", 10.0), record("foil", 50.0)]);
        let hits = card_odds(&acc, &[booster(1, &[("common", 1)])]);

        assert!((hits[0].odds - 0.10).abs() < 1e-12);
    }

    #[test]
    fn boosters_mix_by_weight() {
        // Booster A (weight 3) never rolls the sheet, booster B
        // (weight 1) always hits: 0 * 0.75 + 1 * 0.25
        let acc = accumulate(vec![record("sure", 100.0)]);
        let hits = card_odds(
            &acc,
            &[booster(3, &[("other", 1)]), booster(1, &[("sure", 1)])],
        );

        assert!((hits[0].odds - 0.25).abs() < 1e-12);
    }

    #[test]
    fn foil_and_nonfoil_slots_compound() {
        // Same sheet carries the print twice (plain + foil slots).
        // Both records apply per roll: 1 - 0.9 * 0.99
        let acc = accumulate(vec![record("mixed", 10.0), record("mixed", 1.0)]);
        let hits = card_odds(&acc, &[booster(1, &[("mixed", 1)])]);

        assert!((hits[0].odds - (1.0 - 0.9 * 0.99)).abs() < 1e-12);
    }

    #[test]
    fn discovery_index_follows_accumulation_order() {
        let first = make_test_print("First", "tst", "1");
        let second = make_test_print("Second", "tst", "2");
        let mut acc = OddsAccumulator::new();
        acc.push(&first, record("common", 10.0));
        acc.push(&second, record("common", 10.0));

        let hits = card_odds(&acc, &[booster(1, &[("common", 1)])]);

        assert_eq!(hits[0].print.name, "First");
        assert_eq!(hits[0].discovery, 0);
        assert_eq!(hits[1].discovery, 1);
    }

    #[test]
    fn zero_booster_weight_yields_nothing() {
        let acc = accumulate(vec![record("common", 10.0)]);
        assert!(card_odds(&acc, &[booster(0, &[("common", 1)])]).is_empty());
    }
}
