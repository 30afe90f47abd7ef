//! Booster- and product-level odds of at least one wishlist hit.

use crate::odds::sheet::TargetSheet;
use crate::sealed::BoosterConfig;
use std::collections::BTreeMap;

/// Probability that a single booster of this configuration contains at
/// least one wishlist card.
///
/// Sheets are statistically independent and each roll re-samples the
/// full sheet with replacement, so the booster's miss probability is
/// the product of each rolled sheet's single-roll miss raised to its
/// roll count.
pub fn booster_odds(booster: &BoosterConfig, targets: &BTreeMap<String, TargetSheet>) -> f64 {
    let mut miss = 1.0;

    for (sheet_name, rolls) in &booster.rolls {
        // Sheet presence is validated at feed load
        let Some(target) = targets.get(sheet_name) else {
            continue;
        };

        let single_roll_miss = if target.fixed {
            // Fixed sheets are always fully included: a target entry is
            // a guaranteed hit
            if target.total_target_weight > 0 {
                0.0
            } else {
                1.0
            }
        } else {
            1.0 - target.total_target_weight as f64 / target.total_weight as f64
        };

        miss *= single_roll_miss.powi(*rolls as i32);
    }

    1.0 - miss
}

/// Per-booster odds plus the product-level weighted mixture.
///
/// Booster weights reflect the real-world frequency of each variant
/// inside the product; the total is their weighted average.
pub fn product_odds(
    boosters: &[BoosterConfig],
    targets: &BTreeMap<String, TargetSheet>,
) -> (Vec<f64>, f64) {
    let per_booster: Vec<f64> = boosters.iter().map(|b| booster_odds(b, targets)).collect();

    let total_weight: u64 = boosters.iter().map(|b| b.weight).sum();
    if total_weight == 0 {
        return (per_booster, 0.0);
    }

    let total = boosters
        .iter()
        .zip(&per_booster)
        .map(|(b, odds)| odds * b.weight as f64 / total_weight as f64)
        .sum();

    (per_booster, total)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target(total_weight: u64, total_target_weight: u64, fixed: bool) -> TargetSheet {
        TargetSheet {
            total_weight,
            fixed,
            total_target_weight,
            entries: Vec::new(),
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

    #[test]
    fn one_sheet_three_rolls() {
        // weight-10 entry on a 100-weight sheet rolled 3 times:
        // 1 - 0.9^3 = 0.271
        let targets = BTreeMap::from([("common".to_string(), target(100, 10, false))]);
        let odds = booster_odds(&booster(1, &[("common", 3)]), &targets);

        assert!((odds - 0.271).abs() < 1e-12);
    }

    #[test]
    fn zero_target_weight_never_hits() {
        let targets = BTreeMap::from([("common".to_string(), target(100, 0, false))]);

        for rolls in [1, 5, 100] {
            let odds = booster_odds(&booster(1, &[("common", rolls)]), &targets);
            assert_eq!(odds, 0.0);
        }
    }

    #[test]
    fn fixed_sheet_with_target_is_guaranteed() {
        let targets = BTreeMap::from([
            ("token".to_string(), target(3, 2, true)),
            ("land".to_string(), target(1, 1, true)),
        ]);
        let odds = booster_odds(&booster(1, &[("token", 1), ("land", 1)]), &targets);

        assert_eq!(odds, 1.0);
    }

    #[test]
    fn fixed_sheet_without_target_misses() {
        let targets = BTreeMap::from([("token".to_string(), target(3, 0, true))]);
        let odds = booster_odds(&booster(1, &[("token", 4)]), &targets);

        assert_eq!(odds, 0.0);
    }

    #[test]
    fn independent_sheets_multiply_misses() {
        // Two sheets at 10% each, one roll apiece: 1 - 0.9*0.9 = 0.19
        let targets = BTreeMap::from([
            ("a".to_string(), target(100, 10, false)),
            ("b".to_string(), target(100, 10, false)),
        ]);
        let odds = booster_odds(&booster(1, &[("a", 1), ("b", 1)]), &targets);

        assert!((odds - 0.19).abs() < 1e-12);
    }

    #[test]
    fn product_odds_is_weighted_mixture() {
        // Boosters with weights 3 and 1 and odds 0 and 1:
        // 0 * 0.75 + 1 * 0.25 = 0.25
        let targets = BTreeMap::from([
            ("empty".to_string(), target(100, 0, false)),
            ("sure".to_string(), target(1, 1, true)),
        ]);
        let boosters = vec![booster(3, &[("empty", 1)]), booster(1, &[("sure", 1)])];

        let (per_booster, total) = product_odds(&boosters, &targets);

        assert_eq!(per_booster, [0.0, 1.0]);
        assert!((total - 0.25).abs() < 1e-12);
    }

    #[test]
    fn odds_stay_in_unit_range() {
        let targets = BTreeMap::from([("common".to_string(), target(100, 37, false))]);
        for rolls in 0..20 {
            let odds = booster_odds(&booster(1, &[("common", rolls)]), &targets);
            assert!((0.0..=1.0).contains(&odds), "odds {odds} out of range");
        }
    }
}
