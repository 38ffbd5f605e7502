//! Rating model
//!
//! A star review left on a recipe. A blank or absent description is
//! normalized to the empty string; that and the recipe description are the
//! only silent coercions in the domain layer.

use serde::Serialize;

use super::{User, ValidationError, MAX_DESCRIPTION_LENGTH, MAX_STARS};

/// A validated rating
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rating {
    stars: u8,
    description: String,
    author: User,
}

impl Rating {
    /// Validate and build a rating
    pub fn new(stars: u8, description: Option<&str>, author: &User) -> Result<Self, ValidationError> {
        if stars > MAX_STARS {
            return Err(ValidationError::new("Stars must be between 0 and 5"));
        }
        let description = match description {
            Some(text) if !text.trim().is_empty() => text,
            _ => "",
        };
        if description.chars().count() > MAX_DESCRIPTION_LENGTH {
            return Err(ValidationError::new(format!(
                "Rating description cannot exceed {MAX_DESCRIPTION_LENGTH} characters"
            )));
        }
        Ok(Self {
            stars,
            description: description.to_string(),
            author: author.clone(),
        })
    }

    pub fn stars(&self) -> u8 {
        self.stars
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn author(&self) -> &User {
        &self.author
    }
}
