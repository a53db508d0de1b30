//! JSON bodies exchanged between the HTTP server and the CLI client.

use serde::{Deserialize, Serialize};
use vitals::{BmiRecord, Category};

pub const SAVE_FAILED_PREFIX: &str = "Failed to save BMI record to database: ";

/// Error body shared by every failing route.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub success: bool,
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculateResponse {
    pub success: bool,
    pub bmi: f64,
    pub category: Category,
    pub record_id: i64,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordsResponse {
    pub success: bool,
    pub records: Vec<BmiRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordResponse {
    pub success: bool,
    pub record: Option<BmiRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeletedResponse {
    pub success: bool,
    pub id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}
