//! User search strategies
//!
//! Currently a single variant: case-insensitive substring match on usernames.

use crate::models::{User, ValidationError};

/// A criteria-bound user filter
#[derive(Debug, Clone)]
pub enum UserSearcher {
    ByName { fragment: String },
}

impl UserSearcher {
    /// Match users whose name contains `fragment`, case-insensitively
    pub fn by_name(fragment: &str) -> Result<Self, ValidationError> {
        if fragment.is_empty() {
            return Err(ValidationError::new("Username cannot be empty"));
        }
        Ok(Self::ByName {
            fragment: fragment.to_string(),
        })
    }

    /// Apply the filter to a candidate collection
    pub fn filter(&self, candidates: &[User]) -> Vec<User> {
        match self {
            Self::ByName { fragment } => {
                let needle = fragment.to_lowercase();
                candidates
                    .iter()
                    .filter(|user| user.name().to_lowercase().contains(&needle))
                    .cloned()
                    .collect()
            }
        }
    }
}
