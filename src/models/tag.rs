//! Tag model
//!
//! A label attached to recipes for search. The entity itself does not
//! enforce uniqueness; the recipe caps how many it carries.

use serde::Serialize;

use super::ValidationError;

/// A validated tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tag {
    name: String,
}

impl Tag {
    /// Validate and build a tag
    pub fn new(name: &str) -> Result<Self, ValidationError> {
        if name.trim().is_empty() {
            return Err(ValidationError::new("Tag name cannot be empty"));
        }
        Ok(Self {
            name: name.to_string(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_tag() {
        assert_eq!(Tag::new("dessert").unwrap().name(), "dessert");
    }

    #[test]
    fn test_empty_tag_rejected() {
        assert!(Tag::new("").is_err());
        assert!(Tag::new(" ").is_err());
    }
}
