//! Domain-level error types.

use thiserror::Error;
use uuid::Uuid;

use crate::domain::ValidationErrors;

/// Domain errors - business logic failures.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound { entity_type: &'static str, id: Uuid },

    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    /// Checked before a comment is built, so no validation runs.
    #[error("Post {post_id} is a draft and does not accept comments")]
    CommentsClosed { post_id: Uuid },

    #[error(transparent)]
    Repository(#[from] RepoError),
}

impl DomainError {
    pub fn post_not_found(id: Uuid) -> Self {
        DomainError::NotFound {
            entity_type: "Post",
            id,
        }
    }

    pub fn comment_not_found(id: Uuid) -> Self {
        DomainError::NotFound {
            entity_type: "Comment",
            id,
        }
    }
}

impl From<ValidationErrors> for DomainError {
    fn from(errors: ValidationErrors) -> Self {
        DomainError::Validation(errors)
    }
}

/// Repository-level errors.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    #[error("Entity not found")]
    NotFound,

    #[error("Constraint violation: {0}")]
    Constraint(String),
}
