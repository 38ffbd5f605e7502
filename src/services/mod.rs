//! Service layer
//!
//! Orchestrates validation, the store, and the searchers. Every operation
//! checks its preconditions before touching the database, so a failed call
//! never leaves partial state behind.

mod recipe_service;
mod user_service;

pub use recipe_service::RecipeService;
pub use user_service::UserService;

use thiserror::Error;

use crate::db::DbError;
use crate::models::ValidationError;

/// Failures surfaced by the service layer, distinguishable by kind so
/// callers can render field-specific messages for validation and generic
/// ones for the rest
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error(transparent)]
    Db(#[from] DbError),

    #[error("Password could not be processed")]
    Credential(#[from] crate::auth::HashError),
}

/// Result type for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;
