//! Recipe persistence
//!
//! A recipe aggregate spans five tables; writes that touch children run in a
//! transaction so the catalog never holds a half-written recipe. Authors and
//! rating authors are rebuilt shallow to keep the aggregate acyclic.

use rusqlite::{params, Connection, Row};

use crate::db::{DbError, DbResult};
use crate::models::{Ingredient, Nutrition, Rating, Recipe, Step, Tag, UnitOfMeasurement, User};

use super::users;

/// Insert a new recipe aggregate and return it with its assigned id
pub fn create(conn: &mut Connection, recipe: &Recipe) -> DbResult<Recipe> {
    let tx = conn.transaction()?;

    tx.execute(
        "INSERT INTO recipes (user_id, name, description, servings) VALUES (?1, ?2, ?3, ?4)",
        params![
            recipe.author().id(),
            recipe.name(),
            recipe.description(),
            recipe.servings(),
        ],
    )?;
    let id = tx.last_insert_rowid();

    insert_children(&tx, id, recipe)?;
    tx.commit()?;

    get_by_id(conn, id)?.ok_or(DbError::Sqlite(rusqlite::Error::QueryReturnedNoRows))
}

/// Get a recipe aggregate by id
pub fn get_by_id(conn: &Connection, id: i64) -> DbResult<Option<Recipe>> {
    let mut stmt =
        conn.prepare("SELECT user_id, name, description, servings FROM recipes WHERE id = ?1")?;

    let base = stmt.query_row([id], |row| {
        Ok((
            row.get::<_, i64>("user_id")?,
            row.get::<_, String>("name")?,
            row.get::<_, String>("description")?,
            row.get::<_, i64>("servings")?,
        ))
    });
    let (user_id, name, description, servings) = match base {
        Ok(base) => base,
        Err(rusqlite::Error::QueryReturnedNoRows) => return Ok(None),
        Err(e) => return Err(e.into()),
    };

    let author = users::get_by_id(conn, user_id)?
        .ok_or_else(|| DbError::Corrupt(format!("recipe {id}: missing author {user_id}")))?;
    let servings = u32::try_from(servings)
        .map_err(|_| DbError::Corrupt(format!("recipe {id}: negative servings")))?;

    let ingredients = ingredients_for(conn, id)?;
    let steps = steps_for(conn, id)?;
    let tags = tags_for(conn, id)?;
    let ratings = ratings_for(conn, id)?;

    let mut recipe = Recipe::new(
        &name,
        &author,
        Some(&description),
        servings,
        &ingredients,
        &steps,
        &[],
        &tags,
    )
    .map_err(|e| DbError::Corrupt(format!("recipe {id}: {e}")))?;
    recipe.set_ratings(&ratings);
    recipe.set_id(id);
    Ok(Some(recipe))
}

/// List the full catalog, ordered by name
pub fn list_all(conn: &Connection) -> DbResult<Vec<Recipe>> {
    collect_by_ids(conn, "SELECT id FROM recipes ORDER BY name", [])
}

/// List recipes authored by one user
pub fn list_for_author(conn: &Connection, user_id: i64) -> DbResult<Vec<Recipe>> {
    collect_by_ids(
        conn,
        "SELECT id FROM recipes WHERE user_id = ?1 ORDER BY name",
        [user_id],
    )
}

/// Replace a stored recipe aggregate. Returns false if the id is unknown.
pub fn update(conn: &mut Connection, recipe: &Recipe) -> DbResult<bool> {
    let tx = conn.transaction()?;

    let rows = tx.execute(
        "UPDATE recipes SET name = ?1, description = ?2, servings = ?3,
         updated_at = datetime('now') WHERE id = ?4",
        params![
            recipe.name(),
            recipe.description(),
            recipe.servings(),
            recipe.id(),
        ],
    )?;
    if rows == 0 {
        return Ok(false);
    }

    // Children are rewritten wholesale; ratings are kept, they are
    // appended through add_rating rather than carried on the update payload
    tx.execute(
        "DELETE FROM recipe_ingredients WHERE recipe_id = ?1",
        [recipe.id()],
    )?;
    tx.execute(
        "DELETE FROM recipe_steps WHERE recipe_id = ?1",
        [recipe.id()],
    )?;
    tx.execute(
        "DELETE FROM recipe_tags WHERE recipe_id = ?1",
        [recipe.id()],
    )?;
    insert_ingredients(&tx, recipe.id(), recipe.ingredients())?;
    insert_steps(&tx, recipe.id(), recipe.steps())?;
    insert_tags(&tx, recipe.id(), recipe.tags())?;

    tx.commit()?;
    Ok(true)
}

/// Delete a recipe; children and favorites cascade.
/// Returns false if no such recipe existed.
pub fn delete(conn: &Connection, id: i64) -> DbResult<bool> {
    let rows = conn.execute("DELETE FROM recipes WHERE id = ?1", [id])?;
    Ok(rows > 0)
}

/// Look up the author id without assembling the aggregate
pub fn author_id(conn: &Connection, id: i64) -> DbResult<Option<i64>> {
    match conn.query_row("SELECT user_id FROM recipes WHERE id = ?1", [id], |row| {
        row.get(0)
    }) {
        Ok(user_id) => Ok(Some(user_id)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Append a rating row to a recipe
pub fn add_rating(conn: &Connection, recipe_id: i64, rating: &Rating) -> DbResult<()> {
    conn.execute(
        "INSERT INTO ratings (recipe_id, user_id, stars, description) VALUES (?1, ?2, ?3, ?4)",
        params![
            recipe_id,
            rating.author().id(),
            rating.stars(),
            rating.description(),
        ],
    )?;
    Ok(())
}

/// Mark a recipe as a favorite of a user. Returns false if it already was.
pub fn add_favorite(conn: &Connection, user_id: i64, recipe_id: i64) -> DbResult<bool> {
    let rows = conn.execute(
        "INSERT OR IGNORE INTO favorites (user_id, recipe_id) VALUES (?1, ?2)",
        params![user_id, recipe_id],
    )?;
    Ok(rows > 0)
}

/// Remove a favorite mark. Returns false if there was none.
pub fn remove_favorite(conn: &Connection, user_id: i64, recipe_id: i64) -> DbResult<bool> {
    let rows = conn.execute(
        "DELETE FROM favorites WHERE user_id = ?1 AND recipe_id = ?2",
        params![user_id, recipe_id],
    )?;
    Ok(rows > 0)
}

/// Every recipe in a user's favorites relation, in the order they were marked
pub fn favorites_for_user(conn: &Connection, user_id: i64) -> DbResult<Vec<Recipe>> {
    collect_by_ids(
        conn,
        "SELECT recipe_id FROM favorites WHERE user_id = ?1 ORDER BY id",
        [user_id],
    )
}

/// Store freshly aggregated nutrition totals for a recipe
pub fn update_cached_nutrition(conn: &Connection, id: i64, nutrition: &Nutrition) -> DbResult<()> {
    conn.execute(
        r#"
        UPDATE recipes SET
            cached_calories = ?1,
            cached_protein = ?2,
            cached_carbs = ?3,
            cached_fat = ?4,
            cached_fiber = ?5,
            cached_sodium = ?6,
            cached_sugar = ?7,
            cached_saturated_fat = ?8,
            cached_cholesterol = ?9,
            updated_at = datetime('now')
        WHERE id = ?10
        "#,
        params![
            nutrition.calories,
            nutrition.protein,
            nutrition.carbs,
            nutrition.fat,
            nutrition.fiber,
            nutrition.sodium,
            nutrition.sugar,
            nutrition.saturated_fat,
            nutrition.cholesterol,
            id,
        ],
    )?;
    Ok(())
}

/// Read the cached nutrition totals for a recipe
pub fn get_cached_nutrition(conn: &Connection, id: i64) -> DbResult<Option<Nutrition>> {
    let mut stmt = conn.prepare(
        "SELECT cached_calories, cached_protein, cached_carbs, cached_fat, cached_fiber,
                cached_sodium, cached_sugar, cached_saturated_fat, cached_cholesterol
         FROM recipes WHERE id = ?1",
    )?;

    match stmt.query_row([id], |row| {
        Ok(Nutrition {
            calories: row.get(0)?,
            protein: row.get(1)?,
            carbs: row.get(2)?,
            fat: row.get(3)?,
            fiber: row.get(4)?,
            sodium: row.get(5)?,
            sugar: row.get(6)?,
            saturated_fat: row.get(7)?,
            cholesterol: row.get(8)?,
        })
    }) {
        Ok(nutrition) => Ok(Some(nutrition)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

fn collect_by_ids<P: rusqlite::Params>(
    conn: &Connection,
    sql: &str,
    params: P,
) -> DbResult<Vec<Recipe>> {
    let ids: Vec<i64> = {
        let mut stmt = conn.prepare(sql)?;
        let rows = stmt.query_map(params, |row| row.get(0))?;
        rows.collect::<Result<Vec<_>, _>>()?
    };

    let mut recipes = Vec::with_capacity(ids.len());
    for id in ids {
        if let Some(recipe) = get_by_id(conn, id)? {
            recipes.push(recipe);
        }
    }
    Ok(recipes)
}

fn insert_children(conn: &Connection, recipe_id: i64, recipe: &Recipe) -> DbResult<()> {
    insert_ingredients(conn, recipe_id, recipe.ingredients())?;
    insert_steps(conn, recipe_id, recipe.steps())?;
    insert_tags(conn, recipe_id, recipe.tags())?;
    for rating in recipe.ratings() {
        add_rating(conn, recipe_id, rating)?;
    }
    Ok(())
}

fn insert_ingredients(
    conn: &Connection,
    recipe_id: i64,
    ingredients: &[Ingredient],
) -> DbResult<()> {
    let mut stmt = conn.prepare(
        "INSERT INTO recipe_ingredients (recipe_id, position, name, quantity, unit, price)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
    )?;
    for (position, ingredient) in ingredients.iter().enumerate() {
        stmt.execute(params![
            recipe_id,
            position as i64,
            ingredient.name(),
            ingredient.quantity(),
            ingredient.unit().to_db_str(),
            ingredient.price(),
        ])?;
    }
    Ok(())
}

fn insert_steps(conn: &Connection, recipe_id: i64, steps: &[Step]) -> DbResult<()> {
    let mut stmt = conn.prepare(
        "INSERT INTO recipe_steps (recipe_id, position, time_minutes, instruction)
         VALUES (?1, ?2, ?3, ?4)",
    )?;
    for (position, step) in steps.iter().enumerate() {
        stmt.execute(params![
            recipe_id,
            position as i64,
            step.time_in_minutes(),
            step.instruction(),
        ])?;
    }
    Ok(())
}

fn insert_tags(conn: &Connection, recipe_id: i64, tags: &[Tag]) -> DbResult<()> {
    let mut stmt =
        conn.prepare("INSERT INTO recipe_tags (recipe_id, name) VALUES (?1, ?2)")?;
    for tag in tags {
        stmt.execute(params![recipe_id, tag.name()])?;
    }
    Ok(())
}

fn ingredients_for(conn: &Connection, recipe_id: i64) -> DbResult<Vec<Ingredient>> {
    let mut stmt = conn.prepare(
        "SELECT name, quantity, unit, price FROM recipe_ingredients
         WHERE recipe_id = ?1 ORDER BY position",
    )?;

    let rows = stmt
        .query_map([recipe_id], |row| {
            Ok((
                row.get::<_, String>("name")?,
                row.get::<_, f64>("quantity")?,
                row.get::<_, String>("unit")?,
                row.get::<_, f64>("price")?,
            ))
        })?
        .collect::<Result<Vec<_>, _>>()?;

    rows.into_iter()
        .map(|(name, quantity, unit, price)| {
            let unit = UnitOfMeasurement::from_str(&unit).ok_or_else(|| {
                DbError::Corrupt(format!("recipe {recipe_id}: unknown unit '{unit}'"))
            })?;
            Ingredient::new(&name, quantity, unit, price)
                .map_err(|e| DbError::Corrupt(format!("recipe {recipe_id}: {e}")))
        })
        .collect()
}

fn steps_for(conn: &Connection, recipe_id: i64) -> DbResult<Vec<Step>> {
    let mut stmt = conn.prepare(
        "SELECT time_minutes, instruction FROM recipe_steps
         WHERE recipe_id = ?1 ORDER BY position",
    )?;

    let rows = stmt
        .query_map([recipe_id], |row| {
            Ok((
                row.get::<_, i64>("time_minutes")?,
                row.get::<_, String>("instruction")?,
            ))
        })?
        .collect::<Result<Vec<_>, _>>()?;

    rows.into_iter()
        .map(|(minutes, instruction)| {
            let minutes = u32::try_from(minutes).map_err(|_| {
                DbError::Corrupt(format!("recipe {recipe_id}: negative step time"))
            })?;
            Step::new(minutes, &instruction)
                .map_err(|e| DbError::Corrupt(format!("recipe {recipe_id}: {e}")))
        })
        .collect()
}

fn tags_for(conn: &Connection, recipe_id: i64) -> DbResult<Vec<Tag>> {
    let mut stmt =
        conn.prepare("SELECT name FROM recipe_tags WHERE recipe_id = ?1 ORDER BY id")?;

    let names = stmt
        .query_map([recipe_id], |row| row.get::<_, String>(0))?
        .collect::<Result<Vec<_>, _>>()?;

    names
        .into_iter()
        .map(|name| {
            Tag::new(&name).map_err(|e| DbError::Corrupt(format!("recipe {recipe_id}: {e}")))
        })
        .collect()
}

fn rating_columns(row: &Row) -> rusqlite::Result<(i64, String, i64, String, String, String)> {
    Ok((
        row.get("stars")?,
        row.get("description")?,
        row.get("author_id")?,
        row.get("author_name")?,
        row.get("author_description")?,
        row.get("password_hash")?,
    ))
}

fn ratings_for(conn: &Connection, recipe_id: i64) -> DbResult<Vec<Rating>> {
    let mut stmt = conn.prepare(
        r#"
        SELECT r.stars, r.description,
               u.id AS author_id, u.name AS author_name,
               u.description AS author_description, u.password_hash
        FROM ratings r
        INNER JOIN users u ON r.user_id = u.id
        WHERE r.recipe_id = ?1
        ORDER BY r.id
        "#,
    )?;

    let rows = stmt
        .query_map([recipe_id], rating_columns)?
        .collect::<Result<Vec<_>, _>>()?;

    rows.into_iter()
        .map(|(stars, description, author_id, author_name, author_description, hash)| {
            let stars = u8::try_from(stars).map_err(|_| {
                DbError::Corrupt(format!("recipe {recipe_id}: rating stars out of range"))
            })?;
            let mut author =
                User::new(&author_name, Some(&author_description), &hash, &[], &[])
                    .map_err(|e| DbError::Corrupt(format!("user {author_id}: {e}")))?;
            author.set_id(author_id);
            Rating::new(stars, Some(&description), &author)
                .map_err(|e| DbError::Corrupt(format!("recipe {recipe_id}: {e}")))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::testing::in_memory;
    use crate::models::{Step, Tag};

    fn stored_user(conn: &Connection, name: &str) -> User {
        let user = User::new(name, None, "$argon2$stub", &[], &[]).unwrap();
        users::create(conn, &user).unwrap()
    }

    fn sample_recipe(author: &User, name: &str) -> Recipe {
        Recipe::new(
            name,
            author,
            Some("test recipe"),
            2,
            &[
                Ingredient::new("Potato", 2.0, UnitOfMeasurement::Amount, 1.0).unwrap(),
                Ingredient::new("Salt", 1.0, UnitOfMeasurement::Teaspoons, 0.1).unwrap(),
            ],
            &[Step::new(10, "Boil").unwrap(), Step::new(5, "Mash").unwrap()],
            &[],
            &[Tag::new("comfort").unwrap()],
        )
        .unwrap()
    }

    #[test]
    fn test_create_round_trips_aggregate() {
        let db = in_memory("store_recipes_create");
        db.with_conn_mut(|conn| {
            let author = stored_user(conn, "cook");
            let stored = create(conn, &sample_recipe(&author, "Mash"))?;
            assert!(stored.id() > 0);

            let loaded = get_by_id(conn, stored.id())?.unwrap();
            assert_eq!(loaded.name(), "Mash");
            assert_eq!(loaded.servings(), 2);
            assert_eq!(loaded.ingredients().len(), 2);
            assert_eq!(loaded.ingredients()[0].name(), "Potato");
            assert_eq!(loaded.steps()[1].instruction(), "Mash");
            assert_eq!(loaded.tags()[0].name(), "comfort");
            assert_eq!(loaded.author(), &author);
            Ok(())
        })
        .unwrap();
    }

    #[test]
    fn test_update_rewrites_children() {
        let db = in_memory("store_recipes_update");
        db.with_conn_mut(|conn| {
            let author = stored_user(conn, "cook");
            let mut stored = create(conn, &sample_recipe(&author, "Mash"))?;

            stored.set_name("Better Mash").unwrap();
            stored
                .set_ingredients(&[
                    Ingredient::new("Sweet Potato", 3.0, UnitOfMeasurement::Amount, 2.0).unwrap()
                ])
                .unwrap();
            assert!(update(conn, &stored)?);

            let loaded = get_by_id(conn, stored.id())?.unwrap();
            assert_eq!(loaded.name(), "Better Mash");
            assert_eq!(loaded.ingredients().len(), 1);
            assert_eq!(loaded.ingredients()[0].name(), "Sweet Potato");
            Ok(())
        })
        .unwrap();
    }

    #[test]
    fn test_delete_cascades() {
        let db = in_memory("store_recipes_delete");
        db.with_conn_mut(|conn| {
            let author = stored_user(conn, "cook");
            let stored = create(conn, &sample_recipe(&author, "Mash"))?;

            assert!(delete(conn, stored.id())?);
            assert!(get_by_id(conn, stored.id())?.is_none());

            let orphans: i64 = conn.query_row(
                "SELECT COUNT(*) FROM recipe_ingredients WHERE recipe_id = ?1",
                [stored.id()],
                |row| row.get(0),
            )?;
            assert_eq!(orphans, 0);
            Ok(())
        })
        .unwrap();
    }

    #[test]
    fn test_favorites_relation() {
        let db = in_memory("store_recipes_favorites");
        db.with_conn_mut(|conn| {
            let author = stored_user(conn, "cook");
            let fan = stored_user(conn, "fan");
            let recipe = create(conn, &sample_recipe(&author, "Mash"))?;

            assert!(add_favorite(conn, fan.id(), recipe.id())?);
            // marking twice is a no-op
            assert!(!add_favorite(conn, fan.id(), recipe.id())?);

            let favorites = favorites_for_user(conn, fan.id())?;
            assert_eq!(favorites.len(), 1);
            assert_eq!(favorites[0].id(), recipe.id());

            assert!(remove_favorite(conn, fan.id(), recipe.id())?);
            assert!(favorites_for_user(conn, fan.id())?.is_empty());
            Ok(())
        })
        .unwrap();
    }

    #[test]
    fn test_ratings_round_trip() {
        let db = in_memory("store_recipes_ratings");
        db.with_conn_mut(|conn| {
            let author = stored_user(conn, "cook");
            let reviewer = stored_user(conn, "reviewer");
            let recipe = create(conn, &sample_recipe(&author, "Mash"))?;

            let rating = Rating::new(4, Some("solid"), &reviewer).unwrap();
            add_rating(conn, recipe.id(), &rating)?;

            let loaded = get_by_id(conn, recipe.id())?.unwrap();
            assert_eq!(loaded.ratings().len(), 1);
            assert_eq!(loaded.ratings()[0].stars(), 4);
            assert_eq!(loaded.ratings()[0].author().name(), "reviewer");
            Ok(())
        })
        .unwrap();
    }

    #[test]
    fn test_cached_nutrition_round_trip() {
        let db = in_memory("store_recipes_nutrition");
        db.with_conn_mut(|conn| {
            let author = stored_user(conn, "cook");
            let recipe = create(conn, &sample_recipe(&author, "Mash"))?;

            let totals = Nutrition {
                calories: 310.0,
                protein: 7.5,
                ..Nutrition::zero()
            };
            update_cached_nutrition(conn, recipe.id(), &totals)?;

            let loaded = get_cached_nutrition(conn, recipe.id())?.unwrap();
            assert_eq!(loaded, totals);
            Ok(())
        })
        .unwrap();
    }
}
