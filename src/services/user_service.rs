//! User service
//!
//! Account lifecycle, favorites, and review submission. Raw passwords are
//! hashed on the way in and verified against the stored hash on login;
//! failed logins never reveal whether the name or the password was wrong.

use crate::auth;
use crate::db::Database;
use crate::models::{Rating, Recipe, User, ValidationError};
use crate::store;

use super::{ServiceError, ServiceResult};

/// Shortest password accepted at registration
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Orchestrates account and favorites operations against the backing store
#[derive(Clone)]
pub struct UserService {
    db: Database,
}

impl UserService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Create an account. The name must be free and the password long enough.
    pub fn register(
        &self,
        name: &str,
        description: Option<&str>,
        password: &str,
    ) -> ServiceResult<User> {
        if password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(ValidationError::new(format!(
                "Password must be at least {MIN_PASSWORD_LENGTH} characters"
            ))
            .into());
        }

        let taken = self
            .db
            .with_conn(|conn| store::users::get_by_name(conn, name))?
            .is_some();
        if taken {
            return Err(ServiceError::Conflict(format!(
                "Username '{name}' is already taken"
            )));
        }

        let hash = auth::hash_password(password)?;
        let user = User::new(name, description, &hash, &[], &[])?;
        let stored = self.db.with_conn(|conn| store::users::create(conn, &user))?;
        tracing::info!(user = stored.name(), id = stored.id(), "user registered");
        Ok(stored)
    }

    /// Authenticate and return the full profile (favorites and authored
    /// recipes loaded)
    pub fn login(&self, name: &str, password: &str) -> ServiceResult<User> {
        let user = self
            .db
            .with_conn(|conn| store::users::get_by_name(conn, name))?
            .ok_or(ServiceError::InvalidCredentials)?;

        if !auth::verify_password(password, user.password_hash())? {
            return Err(ServiceError::InvalidCredentials);
        }

        self.profile(user.id())
    }

    /// Load a profile with both recipe relations filled in
    pub fn profile(&self, user_id: i64) -> ServiceResult<User> {
        self.db
            .with_conn(|conn| store::users::load_profile(conn, user_id))?
            .ok_or(ServiceError::NotFound("User"))
    }

    /// Remove an account after re-checking the password. Authored recipes,
    /// favorites, and ratings cascade away with it.
    pub fn delete_account(&self, user: &User, password: &str) -> ServiceResult<()> {
        if !auth::verify_password(password, user.password_hash())? {
            return Err(ServiceError::InvalidCredentials);
        }
        let removed = self
            .db
            .with_conn(|conn| store::users::delete(conn, user.id()))?;
        if !removed {
            return Err(ServiceError::NotFound("User"));
        }
        tracing::info!(id = user.id(), "account deleted");
        Ok(())
    }

    /// Mark a recipe as one of the user's favorites.
    /// Returns false if it already was one.
    pub fn add_favorite(&self, user: &User, recipe: &Recipe) -> ServiceResult<bool> {
        self.check_pair(user, recipe)?;
        Ok(self
            .db
            .with_conn(|conn| store::recipes::add_favorite(conn, user.id(), recipe.id()))?)
    }

    /// Drop a recipe from the user's favorites.
    /// Returns false if it was not one.
    pub fn remove_favorite(&self, user: &User, recipe: &Recipe) -> ServiceResult<bool> {
        self.check_pair(user, recipe)?;
        Ok(self
            .db
            .with_conn(|conn| store::recipes::remove_favorite(conn, user.id(), recipe.id()))?)
    }

    /// The user's favorites relation, oldest mark first
    pub fn favorites(&self, user: &User) -> ServiceResult<Vec<Recipe>> {
        Ok(self
            .db
            .with_conn(|conn| store::recipes::favorites_for_user(conn, user.id()))?)
    }

    /// Leave a star review on a recipe
    pub fn rate_recipe(
        &self,
        user: &User,
        recipe: &Recipe,
        stars: u8,
        description: Option<&str>,
    ) -> ServiceResult<Rating> {
        let rating = Rating::new(stars, description, user)?;
        self.check_pair(user, recipe)?;
        self.db
            .with_conn(|conn| store::recipes::add_rating(conn, recipe.id(), &rating))?;
        Ok(rating)
    }

    /// Both sides of a user/recipe relation must be stored rows
    fn check_pair(&self, user: &User, recipe: &Recipe) -> ServiceResult<()> {
        let user_known = self
            .db
            .with_conn(|conn| store::users::exists(conn, user.id()))?;
        if !user_known {
            return Err(ServiceError::NotFound("User"));
        }
        let recipe_known = self
            .db
            .with_conn(|conn| store::recipes::author_id(conn, recipe.id()))?
            .is_some();
        if !recipe_known {
            return Err(ServiceError::NotFound("Recipe"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::testing::in_memory;
    use crate::db::Database;
    use crate::models::{Ingredient, Step, UnitOfMeasurement};
    use crate::services::RecipeService;

    fn services(name: &str) -> (UserService, RecipeService, Database) {
        let db = in_memory(name);
        (
            UserService::new(db.clone()),
            RecipeService::new(db.clone()),
            db,
        )
    }

    fn recipe(author: &User, name: &str) -> Recipe {
        Recipe::new(
            name,
            author,
            None,
            1,
            &[Ingredient::new("Potato", 1.0, UnitOfMeasurement::Amount, 1.0).unwrap()],
            &[Step::new(5, "Cook").unwrap()],
            &[],
            &[],
        )
        .unwrap()
    }

    #[test]
    fn test_register_and_login() {
        let (users, _, _) = services("usr_register_login");

        let stored = users.register("rida", Some("home cook"), "correct horse").unwrap();
        assert!(stored.id() > 0);

        let profile = users.login("rida", "correct horse").unwrap();
        assert_eq!(profile, stored);

        assert!(matches!(
            users.login("rida", "wrong password").unwrap_err(),
            ServiceError::InvalidCredentials
        ));
        assert!(matches!(
            users.login("nobody", "correct horse").unwrap_err(),
            ServiceError::InvalidCredentials
        ));
    }

    #[test]
    fn test_register_short_password_rejected() {
        let (users, _, _) = services("usr_short_password");
        assert!(matches!(
            users.register("rida", None, "short").unwrap_err(),
            ServiceError::Validation(_)
        ));
    }

    #[test]
    fn test_register_duplicate_name_rejected() {
        let (users, _, _) = services("usr_duplicate");
        users.register("rida", None, "correct horse").unwrap();
        assert!(matches!(
            users.register("rida", None, "battery staple").unwrap_err(),
            ServiceError::Conflict(_)
        ));
    }

    #[test]
    fn test_favorites_lifecycle() {
        let (users, recipes, _) = services("usr_favorites");
        let cook = users.register("cook", None, "correct horse").unwrap();
        let fan = users.register("fan", None, "battery staple").unwrap();

        let stored = recipes.create_recipe(&recipe(&cook, "Fries"), &cook).unwrap();

        assert!(users.add_favorite(&fan, &stored).unwrap());
        assert!(!users.add_favorite(&fan, &stored).unwrap());

        let favorites = users.favorites(&fan).unwrap();
        assert_eq!(favorites.len(), 1);
        assert_eq!(favorites[0].id(), stored.id());

        // the profile exposes the same relation
        let profile = users.profile(fan.id()).unwrap();
        assert_eq!(profile.favorites().len(), 1);

        assert!(users.remove_favorite(&fan, &stored).unwrap());
        assert!(users.favorites(&fan).unwrap().is_empty());
    }

    #[test]
    fn test_rate_recipe_appends_review() {
        let (users, recipes, _) = services("usr_rating");
        let cook = users.register("cook", None, "correct horse").unwrap();
        let fan = users.register("fan", None, "battery staple").unwrap();

        let stored = recipes.create_recipe(&recipe(&cook, "Fries"), &cook).unwrap();
        users.rate_recipe(&fan, &stored, 5, Some("crispy")).unwrap();

        let loaded = recipes.get_recipe(stored.id()).unwrap();
        assert_eq!(loaded.ratings().len(), 1);
        assert_eq!(loaded.ratings()[0].stars(), 5);
        assert_eq!(loaded.ratings()[0].author().name(), "fan");
    }

    #[test]
    fn test_rate_recipe_rejects_bad_stars() {
        let (users, recipes, _) = services("usr_rating_stars");
        let cook = users.register("cook", None, "correct horse").unwrap();
        let stored = recipes.create_recipe(&recipe(&cook, "Fries"), &cook).unwrap();

        assert!(matches!(
            users.rate_recipe(&cook, &stored, 6, None).unwrap_err(),
            ServiceError::Validation(_)
        ));
    }

    #[test]
    fn test_delete_account_cascades() {
        let (users, recipes, db) = services("usr_delete_account");
        let cook = users.register("cook", None, "correct horse").unwrap();
        let stored = recipes.create_recipe(&recipe(&cook, "Fries"), &cook).unwrap();

        assert!(matches!(
            users.delete_account(&cook, "wrong password").unwrap_err(),
            ServiceError::InvalidCredentials
        ));

        users.delete_account(&cook, "correct horse").unwrap();
        let remaining = db
            .with_conn(|conn| crate::store::recipes::get_by_id(conn, stored.id()))
            .unwrap();
        assert!(remaining.is_none());
    }
}
