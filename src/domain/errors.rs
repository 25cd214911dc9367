//! Domain errors for the Samsara karma engine.

use thiserror::Error;

/// Domain-level errors that can occur in the Samsara system.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Unknown action: {0}")]
    UnknownAction(String),

    #[error("Action '{action}' references unknown category: {category}")]
    UnknownCategory { action: String, category: String },

    #[error("Invalid weight for category '{category}': {weight}. Must be positive")]
    InvalidWeight { category: String, weight: f64 },

    #[error("Duplicate action id: {0}")]
    DuplicateAction(String),

    #[error("Oracle failure: {0}")]
    OracleFailure(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

pub type DomainResult<T> = Result<T, DomainError>;

impl From<serde_json::Error> for DomainError {
    fn from(err: serde_json::Error) -> Self {
        DomainError::SerializationError(err.to_string())
    }
}
