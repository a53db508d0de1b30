use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::bmi::{self, Category, Evaluation};
use crate::error::{Error, Result};

pub const MIN_AGE: i64 = 1;
pub const MAX_AGE: i64 = 150;

pub const MSG_REQUIRED: &str = "Name, age, and gender are required";
pub const MSG_MEASUREMENTS: &str = "Height and weight must be positive numbers";
pub const MSG_AGE_RANGE: &str = "Age must be a valid number between 1 and 150";

/// Body of `POST /api/bmi/calculate`. Every field is optional at the wire
/// level so a missing value becomes a validation error rather than a
/// deserialization failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BmiRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub age: Option<i64>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub height: Option<f64>,
    #[serde(default)]
    pub weight: Option<f64>,
}

/// A validated, evaluated BMI row that has not been stored yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewBmiRecord {
    pub name: String,
    pub age: i32,
    pub gender: String,
    pub height_cm: f64,
    pub weight_kg: f64,
    pub evaluation: Evaluation,
}

/// A stored BMI row. Immutable once inserted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BmiRecord {
    pub id: i64,
    pub name: String,
    pub age: i32,
    pub gender: String,
    pub height_cm: f64,
    pub weight_kg: f64,
    pub bmi_value: f64,
    pub category: Category,
    pub created_at: DateTime<Utc>,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// The stored form of a person's name. History lookups must use the same
/// form or they miss rows that were saved with surrounding spaces.
pub fn normalize_name(name: &str) -> &str {
    name.trim()
}

fn positive(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v > 0.0)
}

/// Height and weight must both be present, finite and strictly positive.
pub fn check_measurements(height_cm: Option<f64>, weight_kg: Option<f64>) -> Result<(f64, f64)> {
    match (positive(height_cm), positive(weight_kg)) {
        (Some(h), Some(w)) => Ok((h, w)),
        _ => Err(Error::validation(MSG_MEASUREMENTS)),
    }
}

impl BmiRequest {
    /// Check the request and evaluate it. Nothing is computed when a check fails.
    ///
    /// An age of zero counts as missing, which is why it reports the
    /// "required" message rather than the range message.
    pub fn validate(&self) -> Result<NewBmiRecord> {
        let name = self
            .name
            .as_deref()
            .map(normalize_name)
            .filter(|s| !s.is_empty());
        let gender = non_empty(&self.gender);
        let age = self.age.filter(|a| *a != 0);

        let (Some(name), Some(age), Some(gender)) = (name, age, gender) else {
            return Err(Error::validation(MSG_REQUIRED));
        };

        let (height_cm, weight_kg) = check_measurements(self.height, self.weight)?;

        if !(MIN_AGE..=MAX_AGE).contains(&age) {
            return Err(Error::validation(MSG_AGE_RANGE));
        }

        Ok(NewBmiRecord {
            name: name.to_string(),
            // In range 1..=150, so the narrowing is lossless.
            age: age as i32,
            gender: gender.to_string(),
            height_cm,
            weight_kg,
            evaluation: bmi::evaluate(height_cm, weight_kg),
        })
    }
}
