//! Body Mass Index evaluation and classification.
//!
//! This is the only place the formula and thresholds live. The server persists
//! what `evaluate` returns and the CLI preview shows the same value.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lower bound (inclusive) of the NORMAL range.
pub const NORMAL_FLOOR: f64 = 18.5;
/// Lower bound (inclusive) of the OVERWEIGHT range.
pub const OVERWEIGHT_FLOOR: f64 = 25.0;
/// Lower bound (inclusive) of the OBESE range.
pub const OBESE_FLOOR: f64 = 30.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Category {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Underweight,
        Category::Normal,
        Category::Overweight,
        Category::Obese,
    ];

    /// Classify an already-rounded BMI value. Ranges are lower-bound inclusive.
    pub fn classify(bmi: f64) -> Self {
        if bmi < NORMAL_FLOOR {
            Category::Underweight
        } else if bmi < OVERWEIGHT_FLOOR {
            Category::Normal
        } else if bmi < OBESE_FLOOR {
            Category::Overweight
        } else {
            Category::Obese
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Underweight => "UNDERWEIGHT",
            Category::Normal => "NORMAL",
            Category::Overweight => "OVERWEIGHT",
            Category::Obese => "OBESE",
        }
    }

    /// Human-readable range for legends.
    pub fn range(&self) -> &'static str {
        match self {
            Category::Underweight => "Below 18.5",
            Category::Normal => "18.5 - 24.9",
            Category::Overweight => "25 - 29.9",
            Category::Obese => "30 and above",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "UNDERWEIGHT" => Ok(Category::Underweight),
            "NORMAL" => Ok(Category::Normal),
            "OVERWEIGHT" => Ok(Category::Overweight),
            "OBESE" => Ok(Category::Obese),
            other => Err(format!("unknown BMI category: {other}")),
        }
    }
}

/// Result of evaluating one height/weight pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub bmi: f64,
    pub category: Category,
}

/// Compute BMI from centimetres and kilograms, rounded to two decimals,
/// and classify it.
///
/// Both inputs must be finite and strictly positive; validation happens
/// before this is called.
pub fn evaluate(height_cm: f64, weight_kg: f64) -> Evaluation {
    let bmi = exact_bmi(height_cm, weight_kg).unwrap_or_else(|| {
        let height_m = height_cm / 100.0;
        round2(weight_kg / (height_m * height_m))
    });
    Evaluation {
        bmi,
        category: Category::classify(bmi),
    }
}

/// BMI computed in decimal on the measurements as entered, so an exact
/// half-hundredth such as 18.375 rounds up. `None` when an input does not
/// fit a `Decimal`.
fn exact_bmi(height_cm: f64, weight_kg: f64) -> Option<f64> {
    let height = to_decimal(height_cm)?;
    let weight = to_decimal(weight_kg)?;
    let bmi = weight
        .checked_mul(Decimal::from(10_000))?
        .checked_div(height.checked_mul(height)?)?;
    let mut rounded = bmi.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    // Integer hundredths divided once, so 1838 becomes exactly the f64 nearest 18.38.
    Some(rounded.mantissa() as f64 / 100.0)
}

fn to_decimal(value: f64) -> Option<Decimal> {
    // f64's Display is the shortest text that reads back to the same value.
    value.to_string().parse().ok()
}

/// Round half-up to two decimal places in binary floating point.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normal_example() {
        let e = evaluate(170.0, 70.0);
        assert_eq!(e.bmi, 24.22);
        assert_eq!(e.category, Category::Normal);
    }

    #[test]
    fn underweight_example() {
        let e = evaluate(150.0, 40.0);
        assert_eq!(e.bmi, 17.78);
        assert_eq!(e.category, Category::Underweight);
    }

    #[test]
    fn overweight_lower_bound() {
        let e = evaluate(180.0, 81.0);
        assert_eq!(e.bmi, 25.0);
        assert_eq!(e.category, Category::Overweight);
    }

    #[test]
    fn obese_example() {
        let e = evaluate(160.0, 77.0);
        assert_eq!(e.bmi, 30.08);
        assert_eq!(e.category, Category::Obese);
    }

    #[test]
    fn half_hundredths_round_up() {
        // 47.04 / 1.6^2 is exactly 18.375; 30.40 / 1.6^2 is exactly 11.875.
        assert_eq!(evaluate(160.0, 47.04).bmi, 18.38);
        assert_eq!(evaluate(160.0, 30.40).bmi, 11.88);
    }

    #[test]
    fn inputs_beyond_decimal_range_still_evaluate() {
        assert_eq!(evaluate(1e-40, 70.0).category, Category::Obese);
        assert_eq!(evaluate(170.0, 1e30).category, Category::Obese);
    }

    #[test]
    fn boundaries_are_lower_inclusive() {
        assert_eq!(Category::classify(18.49), Category::Underweight);
        assert_eq!(Category::classify(18.5), Category::Normal);
        assert_eq!(Category::classify(24.99), Category::Normal);
        assert_eq!(Category::classify(25.0), Category::Overweight);
        assert_eq!(Category::classify(29.99), Category::Overweight);
        assert_eq!(Category::classify(30.0), Category::Obese);
    }

    #[test]
    fn classification_is_monotonic() {
        // Walk 10.00..=45.00 in hundredths; the category index never decreases.
        let mut last = 0;
        for hundredths in 1000..=4500 {
            let bmi = hundredths as f64 / 100.0;
            let idx = Category::ALL
                .iter()
                .position(|c| *c == Category::classify(bmi))
                .unwrap();
            assert!(idx >= last, "category went backwards at {bmi}");
            last = idx;
        }
        assert_eq!(last, 3);
    }

    #[test]
    fn evaluate_is_deterministic() {
        let a = evaluate(172.5, 68.3);
        let b = evaluate(172.5, 68.3);
        assert_eq!(a, b);
    }

    #[test]
    fn category_matches_rounded_value() {
        // 18.499... rounds up to 18.5 and must classify on the rounded value.
        let height_cm = 100.0;
        let weight_kg = 18.4996;
        let e = evaluate(height_cm, weight_kg);
        assert_eq!(e.bmi, 18.5);
        assert_eq!(e.category, Category::Normal);
    }

    #[test]
    fn category_string_roundtrip() {
        for c in Category::ALL {
            assert_eq!(c.to_string().parse::<Category>(), Ok(c));
        }
        assert!("normal".parse::<Category>().is_err());
    }

    #[test]
    fn category_serializes_uppercase() {
        let json = serde_json::to_string(&Category::Overweight).unwrap();
        assert_eq!(json, "\"OVERWEIGHT\"");
    }
}
