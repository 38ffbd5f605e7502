//! Recipe filter strategies
//!
//! Tag match is exact and case-sensitive; ingredient match is a
//! case-insensitive substring. With [`DuplicatePolicy::KeepDuplicates`] the
//! ingredient search yields a recipe once per matching ingredient, which is
//! the historical behavior callers may rely on; [`DuplicatePolicy::DedupeById`]
//! collapses the output by recipe id.

use crate::models::{Recipe, User, ValidationError};

/// How the ingredient search treats a recipe with several matching ingredients
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicatePolicy {
    /// One output entry per matching ingredient
    KeepDuplicates,
    /// At most one output entry per recipe
    #[default]
    DedupeById,
}

/// A criteria-bound recipe filter
#[derive(Debug, Clone)]
pub enum RecipeSearcher {
    ByTag {
        tag: String,
    },
    ByIngredient {
        fragment: String,
        duplicates: DuplicatePolicy,
    },
    ByFavorites {
        user: User,
    },
}

impl RecipeSearcher {
    /// Match recipes carrying a tag exactly equal to `tag`
    pub fn by_tag(tag: &str) -> Result<Self, ValidationError> {
        if tag.is_empty() {
            return Err(ValidationError::new("Tag name cannot be empty"));
        }
        Ok(Self::ByTag {
            tag: tag.to_string(),
        })
    }

    /// Match recipes with an ingredient whose name contains `fragment`,
    /// case-insensitively
    pub fn by_ingredient(
        fragment: &str,
        duplicates: DuplicatePolicy,
    ) -> Result<Self, ValidationError> {
        if fragment.is_empty() {
            return Err(ValidationError::new("Ingredient name cannot be empty"));
        }
        Ok(Self::ByIngredient {
            fragment: fragment.to_string(),
            duplicates,
        })
    }

    /// Match every recipe in the given user's favorites relation
    pub fn by_favorites(user: &User) -> Self {
        Self::ByFavorites { user: user.clone() }
    }

    /// Apply the filter to a candidate collection. The input is not retained
    /// and comes back unmodified; matches are returned as copies.
    pub fn filter(&self, candidates: &[Recipe]) -> Vec<Recipe> {
        match self {
            Self::ByTag { tag } => candidates
                .iter()
                .filter(|recipe| recipe.tags().iter().any(|t| t.name() == tag))
                .cloned()
                .collect(),

            Self::ByIngredient {
                fragment,
                duplicates,
            } => {
                let needle = fragment.to_lowercase();
                let mut matches = Vec::new();
                for recipe in candidates {
                    let hits = recipe
                        .ingredients()
                        .iter()
                        .filter(|ing| ing.name().to_lowercase().contains(&needle))
                        .count();
                    let copies = match duplicates {
                        DuplicatePolicy::KeepDuplicates => hits,
                        DuplicatePolicy::DedupeById => hits.min(1),
                    };
                    for _ in 0..copies {
                        matches.push(recipe.clone());
                    }
                }
                matches
            }

            Self::ByFavorites { user } => user.favorites().to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Ingredient, Step, Tag, UnitOfMeasurement};

    fn author() -> User {
        User::new("cook", None, "$argon2$stub", &[], &[]).unwrap()
    }

    fn recipe(name: &str, ingredient_names: &[&str], tag_names: &[&str]) -> Recipe {
        let ingredients: Vec<Ingredient> = ingredient_names
            .iter()
            .map(|n| Ingredient::new(n, 1.0, UnitOfMeasurement::Amount, 1.0).unwrap())
            .collect();
        let tags: Vec<Tag> = tag_names.iter().map(|n| Tag::new(n).unwrap()).collect();
        Recipe::new(
            name,
            &author(),
            None,
            1,
            &ingredients,
            &[Step::new(5, "Cook it").unwrap()],
            &[],
            &tags,
        )
        .unwrap()
    }

    #[test]
    fn test_by_tag_exact_match() {
        let cake = recipe("Cake", &["Flour"], &["dessert"]);
        let toast = recipe("Toast", &["Bread"], &["breakfast"]);
        let searcher = RecipeSearcher::by_tag("dessert").unwrap();

        let found = searcher.filter(&[cake, toast]);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name(), "Cake");
    }

    #[test]
    fn test_by_tag_is_case_sensitive() {
        let cake = recipe("Cake", &["Flour"], &["dessert"]);
        let searcher = RecipeSearcher::by_tag("Dessert").unwrap();
        assert!(searcher.filter(&[cake]).is_empty());
    }

    #[test]
    fn test_by_ingredient_substring_case_insensitive() {
        let fries = recipe("Fries", &["Potato"], &[]);
        let soup = recipe("Soup", &["Tomato"], &[]);
        let searcher =
            RecipeSearcher::by_ingredient("pota", DuplicatePolicy::DedupeById).unwrap();

        let found = searcher.filter(&[fries, soup]);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name(), "Fries");
    }

    #[test]
    fn test_by_ingredient_duplicate_policies() {
        let hash = recipe("Hash", &["Potato", "Sweet Potato"], &[]);

        let keep = RecipeSearcher::by_ingredient("potato", DuplicatePolicy::KeepDuplicates)
            .unwrap()
            .filter(std::slice::from_ref(&hash));
        assert_eq!(keep.len(), 2);

        let dedup = RecipeSearcher::by_ingredient("potato", DuplicatePolicy::DedupeById)
            .unwrap()
            .filter(std::slice::from_ref(&hash));
        assert_eq!(dedup.len(), 1);
    }

    #[test]
    fn test_by_favorites_returns_relation() {
        let fries = recipe("Fries", &["Potato"], &[]);
        let mut fan = author();
        fan.set_favorites(std::slice::from_ref(&fries));

        let searcher = RecipeSearcher::by_favorites(&fan);
        let found = searcher.filter(&[]);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name(), "Fries");
    }

    #[test]
    fn test_empty_criteria_rejected() {
        assert!(RecipeSearcher::by_tag("").is_err());
        assert!(RecipeSearcher::by_ingredient("", DuplicatePolicy::DedupeById).is_err());
    }
}
