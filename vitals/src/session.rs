use serde::{Deserialize, Serialize};

use vitals::record::{MAX_AGE, MIN_AGE, MSG_AGE_RANGE, MSG_REQUIRED};
use vitals::BmiRequest;

/// The person BMI measurements are recorded for.
///
/// Loaded from the session file by the command dispatcher and handed to the
/// commands that need it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub name: String,
    pub age: i64,
    pub gender: String,
}

impl Session {
    pub fn new(name: &str, age: i64, gender: &str) -> Result<Self, String> {
        let name = name.trim();
        let gender = gender.trim();
        if name.is_empty() || gender.is_empty() || age == 0 {
            return Err(MSG_REQUIRED.into());
        }
        if !(MIN_AGE..=MAX_AGE).contains(&age) {
            return Err(MSG_AGE_RANGE.into());
        }
        Ok(Self {
            name: name.to_string(),
            age,
            gender: gender.to_string(),
        })
    }

    /// Request body for a measurement taken by this user.
    pub fn request(&self, height_cm: f64, weight_kg: f64) -> BmiRequest {
        BmiRequest {
            name: Some(self.name.clone()),
            age: Some(self.age),
            gender: Some(self.gender.clone()),
            height: Some(height_cm),
            weight: Some(weight_kg),
        }
    }
}
