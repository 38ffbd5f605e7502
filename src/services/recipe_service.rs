//! Recipe service
//!
//! Catalog CRUD plus search dispatch. Updates and deletes are keyed by the
//! recipe's stable id and restricted to its author; structural equality is
//! never used to pick the row to touch.

use crate::db::Database;
use crate::models::{Recipe, User};
use crate::search::{RecipeSearcher, UserSearcher};
use crate::store;

use super::{ServiceError, ServiceResult};

/// Orchestrates recipe operations against the backing store
#[derive(Clone)]
pub struct RecipeService {
    db: Database,
}

impl RecipeService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Persist a new recipe under its author. The author must already be a
    /// stored user and must be the user making the call.
    pub fn create_recipe(&self, recipe: &Recipe, user: &User) -> ServiceResult<Recipe> {
        if recipe.author() != user {
            return Err(ServiceError::Forbidden(
                "A recipe can only be created by its author".to_string(),
            ));
        }
        let author_known = self
            .db
            .with_conn(|conn| store::users::exists(conn, user.id()))?;
        if !author_known {
            return Err(ServiceError::NotFound("User"));
        }

        let stored = self
            .db
            .with_conn_mut(|conn| store::recipes::create(conn, recipe))?;
        tracing::info!(recipe = stored.name(), id = stored.id(), "recipe created");
        Ok(stored)
    }

    /// Remove a recipe from the catalog; it disappears from the author's
    /// list and from every favorites relation via cascade
    pub fn delete_recipe(&self, recipe: &Recipe, user: &User) -> ServiceResult<()> {
        self.check_author(recipe, user)?;
        self.db
            .with_conn(|conn| store::recipes::delete(conn, recipe.id()))?;
        tracing::info!(id = recipe.id(), "recipe deleted");
        Ok(())
    }

    /// Replace a stored recipe, keyed by its id
    pub fn update_recipe(&self, updated: &Recipe, user: &User) -> ServiceResult<()> {
        self.check_author(updated, user)?;
        self.db
            .with_conn_mut(|conn| store::recipes::update(conn, updated))?;
        tracing::info!(id = updated.id(), "recipe updated");
        Ok(())
    }

    /// Load a recipe aggregate by id
    pub fn get_recipe(&self, id: i64) -> ServiceResult<Recipe> {
        self.db
            .with_conn(|conn| store::recipes::get_by_id(conn, id))?
            .ok_or(ServiceError::NotFound("Recipe"))
    }

    /// Run a searcher over the full catalog and return its result unmodified
    pub fn search_recipes(&self, searcher: &RecipeSearcher) -> ServiceResult<Vec<Recipe>> {
        let catalog = self.db.with_conn(store::recipes::list_all)?;
        Ok(searcher.filter(&catalog))
    }

    /// Run a searcher over all known users
    pub fn search_users(&self, searcher: &UserSearcher) -> ServiceResult<Vec<User>> {
        let everyone = self.db.with_conn(store::users::list_all)?;
        Ok(searcher.filter(&everyone))
    }

    /// Shared precondition for update and delete: the recipe row must exist
    /// and the calling user must be its stored author
    fn check_author(&self, recipe: &Recipe, user: &User) -> ServiceResult<()> {
        let author_id = self
            .db
            .with_conn(|conn| store::recipes::author_id(conn, recipe.id()))?
            .ok_or(ServiceError::NotFound("Recipe"))?;

        let user_known = self.db.with_conn(|conn| store::users::exists(conn, user.id()))?;
        if !user_known {
            return Err(ServiceError::NotFound("User"));
        }
        if author_id != user.id() {
            return Err(ServiceError::Forbidden(
                "Only the author can modify a recipe".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::testing::in_memory;
    use crate::models::{Ingredient, Step, Tag, UnitOfMeasurement};
    use crate::search::DuplicatePolicy;
    use crate::store::users;

    fn service(name: &str) -> RecipeService {
        RecipeService::new(in_memory(name))
    }

    fn stored_user(service: &RecipeService, name: &str) -> User {
        service
            .db
            .with_conn(|conn| {
                let user = User::new(name, None, "$argon2$stub", &[], &[]).unwrap();
                users::create(conn, &user)
            })
            .unwrap()
    }

    fn recipe(author: &User, name: &str, ingredient: &str, tag: &str) -> Recipe {
        Recipe::new(
            name,
            author,
            None,
            2,
            &[Ingredient::new(ingredient, 1.0, UnitOfMeasurement::Amount, 1.0).unwrap()],
            &[Step::new(5, "Cook").unwrap()],
            &[],
            &[Tag::new(tag).unwrap()],
        )
        .unwrap()
    }

    #[test]
    fn test_create_then_search_finds_it_once() {
        let service = service("svc_create_search");
        let cook = stored_user(&service, "cook");

        service
            .create_recipe(&recipe(&cook, "Fries", "Potato", "snack"), &cook)
            .unwrap();

        let searcher =
            RecipeSearcher::by_ingredient("pota", DuplicatePolicy::DedupeById).unwrap();
        let found = service.search_recipes(&searcher).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name(), "Fries");
    }

    #[test]
    fn test_create_rejects_unknown_author() {
        let service = service("svc_create_unknown");
        // never persisted, id stays 0
        let ghost = User::new("ghost", None, "$argon2$stub", &[], &[]).unwrap();

        let err = service
            .create_recipe(&recipe(&ghost, "Fries", "Potato", "snack"), &ghost)
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound("User")));
    }

    #[test]
    fn test_create_rejects_foreign_author() {
        let service = service("svc_create_foreign");
        let cook = stored_user(&service, "cook");
        let other = stored_user(&service, "other");

        let err = service
            .create_recipe(&recipe(&cook, "Fries", "Potato", "snack"), &other)
            .unwrap_err();
        assert!(matches!(err, ServiceError::Forbidden(_)));
    }

    #[test]
    fn test_update_is_keyed_by_id() {
        let service = service("svc_update");
        let cook = stored_user(&service, "cook");

        let stored = service
            .create_recipe(&recipe(&cook, "Fries", "Potato", "snack"), &cook)
            .unwrap();

        let mut updated = stored.clone();
        updated.set_name("Loaded Fries").unwrap();
        service.update_recipe(&updated, &cook).unwrap();

        let loaded = service.get_recipe(stored.id()).unwrap();
        assert_eq!(loaded.name(), "Loaded Fries");
    }

    #[test]
    fn test_update_unknown_recipe_not_found() {
        let service = service("svc_update_missing");
        let cook = stored_user(&service, "cook");

        let unsaved = recipe(&cook, "Fries", "Potato", "snack");
        let err = service.update_recipe(&unsaved, &cook).unwrap_err();
        assert!(matches!(err, ServiceError::NotFound("Recipe")));
    }

    #[test]
    fn test_delete_requires_author() {
        let service = service("svc_delete_author");
        let cook = stored_user(&service, "cook");
        let stranger = stored_user(&service, "stranger");

        let stored = service
            .create_recipe(&recipe(&cook, "Fries", "Potato", "snack"), &cook)
            .unwrap();

        let err = service.delete_recipe(&stored, &stranger).unwrap_err();
        assert!(matches!(err, ServiceError::Forbidden(_)));

        service.delete_recipe(&stored, &cook).unwrap();
        assert!(matches!(
            service.get_recipe(stored.id()).unwrap_err(),
            ServiceError::NotFound("Recipe")
        ));
    }

    #[test]
    fn test_search_by_tag_over_catalog() {
        let service = service("svc_search_tag");
        let cook = stored_user(&service, "cook");

        service
            .create_recipe(&recipe(&cook, "Cake", "Flour", "dessert"), &cook)
            .unwrap();
        service
            .create_recipe(&recipe(&cook, "Toast", "Bread", "breakfast"), &cook)
            .unwrap();

        let searcher = RecipeSearcher::by_tag("dessert").unwrap();
        let found = service.search_recipes(&searcher).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name(), "Cake");
    }

    #[test]
    fn test_search_users_by_name() {
        let service = service("svc_search_users");
        stored_user(&service, "Rida");
        stored_user(&service, "Marina");
        stored_user(&service, "Bob");

        let searcher = UserSearcher::by_name("RI").unwrap();
        let found = service.search_users(&searcher).unwrap();
        assert_eq!(found.len(), 2);
    }
}
