//! Error kinds surfaced by the record services.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Malformed or out-of-range input. Raised before any computation.
    #[error("{0}")]
    Validation(String),

    /// The store was unreachable or rejected a statement.
    #[error("{0}")]
    Persistence(String),

    /// A student row addressed by id does not exist.
    #[error("{0}")]
    NotFound(String),
}

impl Error {
    pub fn validation(msg: impl Into<String>) -> Self {
        Error::Validation(msg.into())
    }

    pub fn persistence(msg: impl Into<String>) -> Self {
        Error::Persistence(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
