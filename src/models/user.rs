//! User model
//!
//! An account with its favorites and authored recipes. Identity equality is
//! the stable id plus name and description, never list contents.

use serde::Serialize;

use super::{normalize_description, Recipe, ValidationError};

/// A validated user account
#[derive(Debug, Clone, Serialize)]
pub struct User {
    id: i64,
    name: String,
    description: String,
    #[serde(skip_serializing)]
    password_hash: String,
    favorites: Vec<Recipe>,
    made_recipes: Vec<Recipe>,
}

impl User {
    /// Validate and build a user. The recipe lists are copied.
    pub fn new(
        name: &str,
        description: Option<&str>,
        password_hash: &str,
        favorites: &[Recipe],
        made_recipes: &[Recipe],
    ) -> Result<Self, ValidationError> {
        if name.trim().is_empty() {
            return Err(ValidationError::new("Username cannot be empty"));
        }
        if password_hash.is_empty() {
            return Err(ValidationError::new("Password hash cannot be empty"));
        }
        Ok(Self {
            id: 0,
            name: name.to_string(),
            description: normalize_description(description, "User")?,
            password_hash: password_hash.to_string(),
            favorites: favorites.to_vec(),
            made_recipes: made_recipes.to_vec(),
        })
    }

    /// Stable identifier; 0 until the user has been persisted
    pub fn id(&self) -> i64 {
        self.id
    }

    pub(crate) fn set_id(&mut self, id: i64) {
        self.id = id;
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// The stored argon2 hash, never the raw password
    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    pub fn favorites(&self) -> &[Recipe] {
        &self.favorites
    }

    pub fn made_recipes(&self) -> &[Recipe] {
        &self.made_recipes
    }

    pub fn set_description(&mut self, description: Option<&str>) -> Result<(), ValidationError> {
        self.description = normalize_description(description, "User")?;
        Ok(())
    }

    /// Replace the favorites list with a copy of the given one
    pub fn set_favorites(&mut self, favorites: &[Recipe]) {
        self.favorites = favorites.to_vec();
    }

    /// Replace the authored-recipes list with a copy of the given one
    pub fn set_made_recipes(&mut self, made_recipes: &[Recipe]) {
        self.made_recipes = made_recipes.to_vec();
    }
}

impl PartialEq for User {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.name == other.name && self.description == other.description
    }
}
