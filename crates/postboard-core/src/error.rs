//! Domain-level error types.

use thiserror::Error;
use uuid::Uuid;

use crate::ports::StorageError;

/// Domain errors - business logic failures.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound { entity_type: &'static str, id: Uuid },

    #[error("No post at position {0}")]
    NoSuchPosition(usize),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Storage failure: {0}")]
    Storage(#[from] StorageError),

    #[error("Malformed stored data: {0}")]
    Malformed(#[from] serde_json::Error),
}
