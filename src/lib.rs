//! Shared domain logic for the vitals services: BMI evaluation, record
//! types and the validation rules applied at the HTTP boundary.

pub mod bmi;
pub mod error;
pub mod record;
pub mod schema;
pub mod student;

pub use bmi::{evaluate, Category, Evaluation};
pub use error::{Error, Result};
pub use record::{normalize_name, BmiRecord, BmiRequest, NewBmiRecord};
pub use student::{StudentFields, StudentInput, StudentRecord};
