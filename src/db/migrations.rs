//! Database migrations
//!
//! Schema creation and migration logic.

use rusqlite::Connection;

use super::connection::DbResult;

/// Current schema version
const SCHEMA_VERSION: i32 = 1;

/// Run all migrations to bring the database up to the current schema version
pub fn run_migrations(conn: &Connection) -> DbResult<()> {
    // Create migrations table if it doesn't exist
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schema_migrations (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        )",
        [],
    )?;

    // Get current version
    let current_version: i32 = conn
        .query_row(
            "SELECT COALESCE(MAX(version), 0) FROM schema_migrations",
            [],
            |row| row.get(0),
        )
        .unwrap_or(0);

    // Run migrations
    if current_version < 1 {
        migrate_v1(conn)?;
        conn.execute("INSERT INTO schema_migrations (version) VALUES (1)", [])?;
    }

    Ok(())
}

/// Migration v1: Initial schema
fn migrate_v1(conn: &Connection) -> DbResult<()> {
    conn.execute_batch(
        r#"
        -- ============================================
        -- USERS
        -- Account records; passwords stored as argon2 hashes
        -- ============================================
        CREATE TABLE users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL UNIQUE,
            description TEXT NOT NULL DEFAULT '',
            password_hash TEXT NOT NULL,

            created_at TEXT NOT NULL DEFAULT (datetime('now')),
            updated_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE INDEX idx_users_name ON users(name);

        -- ============================================
        -- RECIPES
        -- One row per recipe; children live in the tables below
        -- ============================================
        CREATE TABLE recipes (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            name TEXT NOT NULL,
            description TEXT NOT NULL DEFAULT '',
            servings INTEGER NOT NULL DEFAULT 1,

            -- Cached aggregate nutrition - refreshed by the nutrition fetcher
            cached_calories REAL DEFAULT 0,
            cached_protein REAL DEFAULT 0,
            cached_carbs REAL DEFAULT 0,
            cached_fat REAL DEFAULT 0,
            cached_fiber REAL DEFAULT 0,
            cached_sodium REAL DEFAULT 0,
            cached_sugar REAL DEFAULT 0,
            cached_saturated_fat REAL DEFAULT 0,
            cached_cholesterol REAL DEFAULT 0,

            created_at TEXT NOT NULL DEFAULT (datetime('now')),
            updated_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE INDEX idx_recipes_name ON recipes(name);
        CREATE INDEX idx_recipes_user ON recipes(user_id);

        -- ============================================
        -- RECIPE INGREDIENTS
        -- Ordered ingredient lines of a recipe
        -- ============================================
        CREATE TABLE recipe_ingredients (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            recipe_id INTEGER NOT NULL REFERENCES recipes(id) ON DELETE CASCADE,
            position INTEGER NOT NULL,
            name TEXT NOT NULL,
            quantity REAL NOT NULL,
            unit TEXT NOT NULL CHECK(unit IN ('spoons', 'grams', 'cups', 'teaspoons', 'amount')),
            price REAL NOT NULL DEFAULT 0
        );

        CREATE INDEX idx_recipe_ingredients_recipe ON recipe_ingredients(recipe_id);

        -- ============================================
        -- RECIPE STEPS
        -- Ordered instructions with time estimates
        -- ============================================
        CREATE TABLE recipe_steps (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            recipe_id INTEGER NOT NULL REFERENCES recipes(id) ON DELETE CASCADE,
            position INTEGER NOT NULL,
            time_minutes INTEGER NOT NULL,
            instruction TEXT NOT NULL
        );

        CREATE INDEX idx_recipe_steps_recipe ON recipe_steps(recipe_id);

        -- ============================================
        -- RECIPE TAGS
        -- ============================================
        CREATE TABLE recipe_tags (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            recipe_id INTEGER NOT NULL REFERENCES recipes(id) ON DELETE CASCADE,
            name TEXT NOT NULL
        );

        CREATE INDEX idx_recipe_tags_recipe ON recipe_tags(recipe_id);
        CREATE INDEX idx_recipe_tags_name ON recipe_tags(name);

        -- ============================================
        -- RATINGS
        -- Star reviews left by users on recipes
        -- ============================================
        CREATE TABLE ratings (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            recipe_id INTEGER NOT NULL REFERENCES recipes(id) ON DELETE CASCADE,
            user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            stars INTEGER NOT NULL CHECK(stars BETWEEN 0 AND 5),
            description TEXT NOT NULL DEFAULT '',

            created_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE INDEX idx_ratings_recipe ON ratings(recipe_id);
        CREATE INDEX idx_ratings_user ON ratings(user_id);

        -- ============================================
        -- FAVORITES
        -- Many-to-many: users to recipes they bookmarked
        -- ============================================
        CREATE TABLE favorites (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            recipe_id INTEGER NOT NULL REFERENCES recipes(id) ON DELETE CASCADE,

            created_at TEXT NOT NULL DEFAULT (datetime('now')),

            UNIQUE(user_id, recipe_id)
        );

        CREATE INDEX idx_favorites_user ON favorites(user_id);
        CREATE INDEX idx_favorites_recipe ON favorites(recipe_id);
        "#,
    )?;

    Ok(())
}

/// Get the current schema version
pub fn get_schema_version(conn: &Connection) -> DbResult<i32> {
    let version: i32 = conn
        .query_row(
            "SELECT COALESCE(MAX(version), 0) FROM schema_migrations",
            [],
            |row| row.get(0),
        )
        .unwrap_or(0);
    Ok(version)
}

/// Check if the database needs migration
pub fn needs_migration(conn: &Connection) -> DbResult<bool> {
    let current = get_schema_version(conn)?;
    Ok(current < SCHEMA_VERSION)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_migrations_are_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        assert!(needs_migration(&conn).unwrap());

        run_migrations(&conn).unwrap();
        assert_eq!(get_schema_version(&conn).unwrap(), SCHEMA_VERSION);
        assert!(!needs_migration(&conn).unwrap());

        // A second run must not touch the schema again
        run_migrations(&conn).unwrap();
        assert_eq!(get_schema_version(&conn).unwrap(), SCHEMA_VERSION);
    }
}
