//! Domain models
//!
//! Validated entities for the recipe catalog. Constructors and setters check
//! their arguments on assignment and fail with a [`ValidationError`] instead
//! of ever holding an invalid state. Lists handed to constructors are copied,
//! so callers keep no handle into an entity's internal collections.

mod ingredient;
mod nutrition;
mod rating;
mod recipe;
mod step;
mod tag;
mod user;

pub use ingredient::{Ingredient, UnitOfMeasurement};
pub use nutrition::Nutrition;
pub use rating::Rating;
pub use recipe::Recipe;
pub use step::Step;
pub use tag::Tag;
pub use user::User;

use thiserror::Error;

/// Longest allowed recipe, rating, or profile description
pub const MAX_DESCRIPTION_LENGTH: usize = 500;

/// Smallest allowed serving count on a recipe
pub const MIN_SERVINGS: u32 = 1;

/// Most tags a single recipe may carry
pub const MAX_TAGS: usize = 3;

/// Highest star value on a rating
pub const MAX_STARS: u8 = 5;

/// Rejected constructor or setter argument
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct ValidationError(pub(crate) String);

impl ValidationError {
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }

    /// The field-specific message for presentation
    pub fn message(&self) -> &str {
        &self.0
    }
}

/// Check a description against [`MAX_DESCRIPTION_LENGTH`], normalizing
/// an absent value to the empty string.
pub(crate) fn normalize_description(
    description: Option<&str>,
    what: &str,
) -> Result<String, ValidationError> {
    let description = description.unwrap_or("");
    if description.chars().count() > MAX_DESCRIPTION_LENGTH {
        return Err(ValidationError::new(format!(
            "{what} description cannot exceed {MAX_DESCRIPTION_LENGTH} characters"
        )));
    }
    Ok(description.to_string())
}
