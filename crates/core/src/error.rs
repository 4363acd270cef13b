use crate::types::DbId;
use crate::validation::FieldViolation;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(FieldViolation),

    #[error("Duplicate key: {0}")]
    DuplicateKey(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Login mismatch. Deliberately carries no detail so an unknown username
    /// and a wrong secret are indistinguishable.
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Malformed input: {0}")]
    MalformedInput(String),

    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Shorthand for a single-field validation failure.
    pub fn invalid(field: &str, message: impl Into<String>) -> Self {
        CoreError::Validation(FieldViolation::new(field, message))
    }
}
