//! Brew calculator state and derivations
//!
//! Holds the two user inputs (coffee mass and pour count) and keeps the
//! two derived values in sync after every edit.

use serde::Serialize;
use std::fmt;

/// Grams of water per gram of coffee, per pour
pub const WATER_RATIO: u64 = 3;

pub const DEFAULT_COFFEE_GRAMS: u64 = 20;

/// Number of discrete pour stages, always one of 1..=5
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(into = "u8")]
pub struct PourCount(u8);

impl PourCount {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    /// Every option offered by the selection control, in display order
    pub const ALL: [PourCount; 5] = [
        PourCount(1),
        PourCount(2),
        PourCount(3),
        PourCount(4),
        PourCount(5),
    ];

    /// Build from any integer, clamping to the nearest valid option
    pub fn clamped(value: i64) -> Self {
        Self(value.clamp(Self::MIN as i64, Self::MAX as i64) as u8)
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// Option label with pluralization: "1 Pour", "2 Pours", ...
    pub fn label(self) -> String {
        if self.0 > 1 {
            format!("{} Pours", self.0)
        } else {
            format!("{} Pour", self.0)
        }
    }

    /// Next option, wrapping from 5 back to 1
    pub fn next(self) -> Self {
        if self.0 >= Self::MAX {
            Self(Self::MIN)
        } else {
            Self(self.0 + 1)
        }
    }

    /// Previous option, wrapping from 1 to 5
    pub fn prev(self) -> Self {
        if self.0 <= Self::MIN {
            Self(Self::MAX)
        } else {
            Self(self.0 - 1)
        }
    }
}

impl Default for PourCount {
    fn default() -> Self {
        Self(3)
    }
}

impl From<PourCount> for u8 {
    fn from(pours: PourCount) -> Self {
        pours.0
    }
}

impl fmt::Display for PourCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Snapshot of inputs and derived outputs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BrewResults {
    pub coffee_grams: u64,
    pub num_pours: PourCount,
    pub water_per_pour: u64,
    pub final_quantity: u64,
}

/// Water for a single pour stage
pub fn water_per_pour(coffee_grams: u64) -> u64 {
    coffee_grams.saturating_mul(WATER_RATIO)
}

/// Total brew output across all pours
pub fn final_quantity(water_per_pour: u64, pours: PourCount) -> u64 {
    water_per_pour.saturating_mul(pours.get() as u64)
}

/// Parse the leading integer of a string: optional whitespace, optional
/// sign, then a run of ASCII digits. Trailing text is ignored, so "12.7"
/// reads as 12. Returns `None` when no digit follows the sign.
/// Magnitudes beyond `i64` saturate.
pub fn parse_leading_int(input: &str) -> Option<i64> {
    let s = input.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let run = digits.bytes().take_while(u8::is_ascii_digit).count();
    if run == 0 {
        return None;
    }

    let magnitude = digits[..run]
        .bytes()
        .fold(0i64, |acc, b| acc.saturating_mul(10).saturating_add((b - b'0') as i64));

    Some(if negative { -magnitude } else { magnitude })
}

/// The calculator: two inputs, two derived values
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrewCalculator {
    coffee_grams: u64,
    num_pours: PourCount,
    water_per_pour: u64,
    final_quantity: u64,
}

impl Default for BrewCalculator {
    fn default() -> Self {
        Self::new(DEFAULT_COFFEE_GRAMS, PourCount::default())
    }
}

impl BrewCalculator {
    pub fn new(coffee_grams: u64, num_pours: PourCount) -> Self {
        let mut calc = Self {
            coffee_grams,
            num_pours,
            water_per_pour: 0,
            final_quantity: 0,
        };
        calc.recompute();
        calc
    }

    /// Set the coffee mass from raw field text.
    /// Non-numeric or negative input stores 0.
    pub fn set_coffee_grams(&mut self, input: &str) {
        self.coffee_grams = match parse_leading_int(input) {
            Some(v) if v >= 0 => v as u64,
            _ => 0,
        };
        self.recompute();
    }

    /// Set the coffee mass directly (used by spinner steps)
    pub fn set_coffee_grams_value(&mut self, grams: u64) {
        self.coffee_grams = grams;
        self.recompute();
    }

    /// Set the pour count from raw selection text.
    /// Unparseable input falls back to the default of 3, out-of-range
    /// values clamp to the nearest option.
    pub fn set_num_pours(&mut self, input: &str) {
        self.num_pours = match parse_leading_int(input) {
            Some(v) => PourCount::clamped(v),
            None => {
                tracing::debug!("Unparseable pour count {:?}, using default", input);
                PourCount::default()
            }
        };
        self.recompute();
    }

    pub fn set_num_pours_value(&mut self, pours: PourCount) {
        self.num_pours = pours;
        self.recompute();
    }

    fn recompute(&mut self) {
        self.water_per_pour = water_per_pour(self.coffee_grams);
        self.final_quantity = final_quantity(self.water_per_pour, self.num_pours);
    }

    pub fn coffee_grams(&self) -> u64 {
        self.coffee_grams
    }

    pub fn num_pours(&self) -> PourCount {
        self.num_pours
    }

    pub fn water_per_pour(&self) -> u64 {
        self.water_per_pour
    }

    pub fn final_quantity(&self) -> u64 {
        self.final_quantity
    }

    pub fn results(&self) -> BrewResults {
        BrewResults {
            coffee_grams: self.coffee_grams,
            num_pours: self.num_pours,
            water_per_pour: self.water_per_pour,
            final_quantity: self.final_quantity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state() {
        let calc = BrewCalculator::default();
        assert_eq!(calc.coffee_grams(), 20);
        assert_eq!(calc.num_pours().get(), 3);
        assert_eq!(calc.water_per_pour(), 60);
        assert_eq!(calc.final_quantity(), 180);
    }

    #[test]
    fn test_derivations_over_range() {
        for c in [0u64, 1, 7, 20, 33, 1000] {
            for p in PourCount::ALL {
                assert_eq!(water_per_pour(c), 3 * c);
                assert_eq!(final_quantity(water_per_pour(c), p), 3 * c * p.get() as u64);
            }
        }
    }

    #[test]
    fn test_scenario_15g_four_pours() {
        let mut calc = BrewCalculator::default();
        calc.set_coffee_grams("15");
        calc.set_num_pours("4");
        assert_eq!(calc.water_per_pour(), 45);
        assert_eq!(calc.final_quantity(), 180);
    }

    #[test]
    fn test_zero_coffee_zeroes_outputs() {
        let mut calc = BrewCalculator::default();
        calc.set_coffee_grams("0");
        for p in ["1", "2", "3", "4", "5"] {
            calc.set_num_pours(p);
            assert_eq!(calc.water_per_pour(), 0);
            assert_eq!(calc.final_quantity(), 0);
        }
    }

    #[test]
    fn test_invalid_coffee_coerced_to_zero() {
        let mut calc = BrewCalculator::default();
        calc.set_coffee_grams("abc");
        assert_eq!(calc.coffee_grams(), 0);

        calc.set_coffee_grams("25");
        calc.set_coffee_grams("-5");
        assert_eq!(calc.coffee_grams(), 0);

        calc.set_coffee_grams("25");
        calc.set_coffee_grams("");
        assert_eq!(calc.coffee_grams(), 0);
    }

    #[test]
    fn test_leading_integer_parse() {
        assert_eq!(parse_leading_int("12.7"), Some(12));
        assert_eq!(parse_leading_int("  7"), Some(7));
        assert_eq!(parse_leading_int("15g"), Some(15));
        assert_eq!(parse_leading_int("-5"), Some(-5));
        assert_eq!(parse_leading_int("+8"), Some(8));
        assert_eq!(parse_leading_int("-"), None);
        assert_eq!(parse_leading_int("g15"), None);
        assert_eq!(parse_leading_int(""), None);
    }

    #[test]
    fn test_huge_values_saturate() {
        let mut calc = BrewCalculator::default();
        calc.set_coffee_grams("99999999999999999999999");
        assert_eq!(calc.coffee_grams(), i64::MAX as u64);
        calc.set_coffee_grams_value(u64::MAX);
        assert_eq!(calc.water_per_pour(), u64::MAX);
        assert_eq!(calc.final_quantity(), u64::MAX);
    }

    #[test]
    fn test_pour_fallbacks() {
        let mut calc = BrewCalculator::default();
        calc.set_num_pours("5");
        calc.set_num_pours("many");
        assert_eq!(calc.num_pours().get(), 3);
        calc.set_num_pours("0");
        assert_eq!(calc.num_pours().get(), 1);
        calc.set_num_pours("9");
        assert_eq!(calc.num_pours().get(), 5);
    }

    #[test]
    fn test_setting_same_value_is_idempotent() {
        let mut once = BrewCalculator::default();
        once.set_coffee_grams("18");

        let mut twice = once.clone();
        twice.set_coffee_grams("18");
        twice.set_coffee_grams("18");

        assert_eq!(once.results(), twice.results());
    }

    #[test]
    fn test_pour_labels() {
        let labels: Vec<String> = PourCount::ALL.iter().map(|p| p.label()).collect();
        assert_eq!(labels, ["1 Pour", "2 Pours", "3 Pours", "4 Pours", "5 Pours"]);
    }

    #[test]
    fn test_pour_cycling_wraps() {
        assert_eq!(PourCount::clamped(5).next().get(), 1);
        assert_eq!(PourCount::clamped(1).prev().get(), 5);
        assert_eq!(PourCount::clamped(3).next().get(), 4);
    }

    #[test]
    fn test_results_serialize() {
        let json = serde_json::to_value(BrewCalculator::default().results()).unwrap();
        assert_eq!(json["num_pours"], 3);
        assert_eq!(json["final_quantity"], 180);
    }
}
