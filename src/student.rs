use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A stored student row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentRecord {
    pub id: i64,
    pub full_name: String,
    pub course: String,
    pub id_number: String,
    pub department: String,
    pub current_units: f64,
}

/// Body of `POST /students` and `PUT /students/{id}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentInput {
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub course: Option<String>,
    #[serde(default)]
    pub id_number: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub current_units: Option<f64>,
}

/// Trimmed, checked student fields ready for insert or update.
#[derive(Debug, Clone, PartialEq)]
pub struct StudentFields {
    pub full_name: String,
    pub course: String,
    pub id_number: String,
    pub department: String,
    pub current_units: f64,
}

fn required(value: &Option<String>, label: &str) -> Result<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .ok_or_else(|| Error::validation(format!("{label} is required")))
}

impl StudentInput {
    /// Validate fields in form order and report the first failure.
    pub fn validate(&self) -> Result<StudentFields> {
        let full_name = required(&self.full_name, "Full Name")?;
        let course = required(&self.course, "Course")?;
        let id_number = required(&self.id_number, "ID Number")?;
        let department = required(&self.department, "Department")?;

        let current_units = match self.current_units {
            None => return Err(Error::validation("Current Units is required")),
            Some(u) if !u.is_finite() || u < 0.0 => {
                return Err(Error::validation("Current Units must be a valid number"))
            }
            Some(u) => u,
        };

        Ok(StudentFields {
            full_name,
            course,
            id_number,
            department,
            current_units,
        })
    }
}

impl StudentFields {
    pub fn into_record(self, id: i64) -> StudentRecord {
        StudentRecord {
            id,
            full_name: self.full_name,
            course: self.course,
            id_number: self.id_number,
            department: self.department,
            current_units: self.current_units,
        }
    }
}
