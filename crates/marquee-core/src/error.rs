//! Error types for the catalog

use marquee_types::FieldErrors;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CatalogError>;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Validation failed: {0}")]
    Validation(FieldErrors),

    #[error("Username already exists: {0}")]
    DuplicateUsername(String),

    /// Deliberately carries no detail about which credential was wrong
    #[error("Wrong username or password")]
    AuthenticationFailed,

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CatalogError {
    pub fn not_found(entity: &'static str, id: &str) -> Self {
        CatalogError::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub fn field(field: &str, message: impl Into<String>) -> Self {
        CatalogError::Validation(FieldErrors::single(field, message))
    }
}

impl From<FieldErrors> for CatalogError {
    fn from(errors: FieldErrors) -> Self {
        CatalogError::Validation(errors)
    }
}
