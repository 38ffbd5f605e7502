//! Recipe model
//!
//! The aggregate root of the catalog: a validated recipe with its author
//! snapshot, ingredients, steps, ratings, and tags. Every list is copied on
//! assignment, so nothing outside the recipe can mutate its internals.

use serde::Serialize;

use super::{
    normalize_description, Ingredient, Rating, Step, Tag, User, ValidationError, MAX_TAGS,
    MIN_SERVINGS,
};

/// A validated recipe aggregate
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recipe {
    id: i64,
    name: String,
    author: User,
    description: String,
    servings: u32,
    ingredients: Vec<Ingredient>,
    steps: Vec<Step>,
    ratings: Vec<Rating>,
    tags: Vec<Tag>,
}

impl Recipe {
    /// Validate and build a recipe. The author and all four lists are
    /// copied; the caller keeps no handle into the aggregate.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: &str,
        author: &User,
        description: Option<&str>,
        servings: u32,
        ingredients: &[Ingredient],
        steps: &[Step],
        ratings: &[Rating],
        tags: &[Tag],
    ) -> Result<Self, ValidationError> {
        if name.trim().is_empty() {
            return Err(ValidationError::new("Recipe name cannot be empty"));
        }
        check_servings(servings)?;
        check_ingredients(ingredients)?;
        check_steps(steps)?;
        check_tags(tags)?;
        Ok(Self {
            id: 0,
            name: name.to_string(),
            author: author.clone(),
            description: normalize_description(description, "Recipe")?,
            servings,
            ingredients: ingredients.to_vec(),
            steps: steps.to_vec(),
            ratings: ratings.to_vec(),
            tags: tags.to_vec(),
        })
    }

    /// Stable identifier; 0 until the recipe has been persisted
    pub fn id(&self) -> i64 {
        self.id
    }

    pub(crate) fn set_id(&mut self, id: i64) {
        self.id = id;
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Snapshot of the author taken at construction
    pub fn author(&self) -> &User {
        &self.author
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn servings(&self) -> u32 {
        self.servings
    }

    pub fn ingredients(&self) -> &[Ingredient] {
        &self.ingredients
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn ratings(&self) -> &[Rating] {
        &self.ratings
    }

    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    pub fn set_name(&mut self, name: &str) -> Result<(), ValidationError> {
        if name.trim().is_empty() {
            return Err(ValidationError::new("Recipe name cannot be empty"));
        }
        self.name = name.to_string();
        Ok(())
    }

    pub fn set_description(&mut self, description: Option<&str>) -> Result<(), ValidationError> {
        self.description = normalize_description(description, "Recipe")?;
        Ok(())
    }

    pub fn set_servings(&mut self, servings: u32) -> Result<(), ValidationError> {
        check_servings(servings)?;
        self.servings = servings;
        Ok(())
    }

    pub fn set_ingredients(&mut self, ingredients: &[Ingredient]) -> Result<(), ValidationError> {
        check_ingredients(ingredients)?;
        self.ingredients = ingredients.to_vec();
        Ok(())
    }

    pub fn set_steps(&mut self, steps: &[Step]) -> Result<(), ValidationError> {
        check_steps(steps)?;
        self.steps = steps.to_vec();
        Ok(())
    }

    pub fn set_ratings(&mut self, ratings: &[Rating]) {
        self.ratings = ratings.to_vec();
    }

    pub fn set_tags(&mut self, tags: &[Tag]) -> Result<(), ValidationError> {
        check_tags(tags)?;
        self.tags = tags.to_vec();
        Ok(())
    }

    /// Append one review; the ratings list has no upper bound
    pub fn add_rating(&mut self, rating: Rating) {
        self.ratings.push(rating);
    }

    /// Total minutes across every step
    pub fn time_to_cook(&self) -> u32 {
        self.steps.iter().map(Step::time_in_minutes).sum()
    }

    /// Total price across every ingredient
    pub fn total_price(&self) -> f64 {
        self.ingredients.iter().map(Ingredient::price).sum()
    }
}

fn check_servings(servings: u32) -> Result<(), ValidationError> {
    if servings < MIN_SERVINGS {
        return Err(ValidationError::new("Serving(s) must be greater than 0"));
    }
    Ok(())
}

fn check_ingredients(ingredients: &[Ingredient]) -> Result<(), ValidationError> {
    if ingredients.is_empty() {
        return Err(ValidationError::new("Ingredients cannot be empty"));
    }
    Ok(())
}

fn check_steps(steps: &[Step]) -> Result<(), ValidationError> {
    if steps.is_empty() {
        return Err(ValidationError::new("Steps cannot be empty"));
    }
    Ok(())
}

fn check_tags(tags: &[Tag]) -> Result<(), ValidationError> {
    if tags.len() > MAX_TAGS {
        return Err(ValidationError::new(format!(
            "Recipe can have a maximum of {MAX_TAGS} tags"
        )));
    }
    Ok(())
}
