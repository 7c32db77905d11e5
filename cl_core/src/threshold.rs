use crate::Error;
use crate::catalog::CollectibleType;
use std::collections::HashMap;

/// How many of a collectible a player needs to own before they can claim its collector card.
///
/// `round((235 * rarity + 3245) / 116, -1)`, rounding half to even at the tens digit.
#[must_use]
pub fn required_amount(rarity: f64) -> i64 {
    round_to_tens((235.0 * rarity + 3245.0) / 116.0)
}

#[allow(clippy::cast_possible_truncation)]
fn round_to_tens(value: f64) -> i64 {
    let rounded = (value / 10.0).round_ties_even() * 10.0;
    if rounded.is_nan() || rounded <= 0.0 {
        return 0;
    }
    rounded as i64
}

/// Per-collectible amounts that replace the formula, keyed by country name.
#[derive(Debug, Default, Clone)]
pub struct Thresholds {
    overrides: HashMap<String, i64>,
}

impl Thresholds {
    /// Reads a `{"China": 100, "Japan": 50}` style file.
    pub fn load(path: &str) -> Result<Self, Error> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    pub fn from_json(contents: &str) -> Result<Self, Error> {
        let overrides: HashMap<String, i64> = serde_json::from_str(contents)
            .map_err(|e| format!("Cannot read collector thresholds: {e}"))?;

        if let Some((name, _)) = overrides.iter().find(|(_, amount)| **amount < 0) {
            return Err(format!("Collector threshold for {name} cannot be negative.").into());
        }

        Ok(Thresholds { overrides })
    }

    #[must_use]
    pub fn required_for(&self, ball: &CollectibleType) -> i64 {
        self.overrides
            .get(&ball.country)
            .copied()
            .unwrap_or_else(|| required_amount(ball.rarity))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ball(country: &str, rarity: f64) -> CollectibleType {
        crate::catalog::tests::ball(1, country, rarity, true)
    }

    #[test]
    fn known_rarities() {
        assert_eq!(required_amount(1.0), 30);
        assert_eq!(required_amount(5.0), 40);
        assert_eq!(required_amount(0.0), 30);
        assert_eq!(required_amount(2.0), 30);
        assert_eq!(required_amount(10.0), 50);
        assert_eq!(required_amount(100.0), 230);
        assert_eq!(required_amount(0.5), 30);
    }

    #[test]
    fn halves_round_to_even_tens() {
        assert_eq!(round_to_tens(25.0), 20);
        assert_eq!(round_to_tens(35.0), 40);
        assert_eq!(round_to_tens(45.0), 40);
        assert_eq!(round_to_tens(44.9), 40);
        assert_eq!(round_to_tens(45.1), 50);
    }

    #[test]
    fn never_negative() {
        assert_eq!(required_amount(-100.0), 0);
        assert_eq!(round_to_tens(f64::NAN), 0);
    }

    #[test]
    fn monotonic_in_rarity() {
        let mut last = required_amount(0.0);
        for step in 1..=4000 {
            let current = required_amount(f64::from(step) * 0.05);
            assert!(current >= last, "dropped at rarity {}", f64::from(step) * 0.05);
            last = current;
        }
    }

    #[test]
    fn overrides_replace_formula() {
        let thresholds = Thresholds::from_json(r#"{"China": 100, "Japan": 0}"#).unwrap();

        assert_eq!(thresholds.required_for(&ball("China", 1.0)), 100);
        assert_eq!(thresholds.required_for(&ball("Japan", 5.0)), 0);
        assert_eq!(thresholds.required_for(&ball("India", 5.0)), 40);
    }

    #[test]
    fn rejects_bad_overrides() {
        assert!(Thresholds::from_json(r#"{"China": -1}"#).is_err());
        assert!(Thresholds::from_json("[1, 2]").is_err());
        assert_eq!(Thresholds::default().required_for(&ball("India", 1.0)), 30);
    }
}
