//! Seed the catalog with a demo user and a couple of recipes
//! Usage: cargo run --bin seed_catalog

use std::path::PathBuf;

use tracing_subscriber::EnvFilter;

use pantry::models::{Ingredient, Recipe, Step, Tag, UnitOfMeasurement};
use pantry::services::{RecipeService, UserService};

fn get_database_path() -> PathBuf {
    std::env::var("PANTRY_DATABASE_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let mut path = std::env::current_exe()
                .ok()
                .and_then(|p| p.parent().map(|p| p.to_path_buf()))
                .unwrap_or_else(|| PathBuf::from("."));

            if path.ends_with("release") || path.ends_with("debug") {
                if let Some(parent) = path.parent() {
                    if let Some(grandparent) = parent.parent() {
                        path = grandparent.to_path_buf();
                    }
                }
            }

            path.push("data");
            path.push("pantry.db");
            path
        })
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("pantry=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let db_path = get_database_path();
    println!("Database: {}", db_path.display());

    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let database = pantry::db::Database::new(&db_path)?;
    database.with_conn(|conn| pantry::db::migrations::run_migrations(conn))?;

    let users = UserService::new(database.clone());
    let recipes = RecipeService::new(database.clone());

    let demo = users.register("demo", Some("Seeded demo account"), "demo-password")?;
    println!("Created user '{}' (id {})", demo.name(), demo.id());

    let mash = Recipe::new(
        "Buttery Mash",
        &demo,
        Some("Weeknight mashed potatoes"),
        4,
        &[
            Ingredient::new("Potato", 6.0, UnitOfMeasurement::Amount, 2.4)?,
            Ingredient::new("Butter", 80.0, UnitOfMeasurement::Grams, 1.1)?,
            Ingredient::new("Milk", 1.0, UnitOfMeasurement::Cups, 0.5)?,
        ],
        &[
            Step::new(15, "Boil the potatoes until tender")?,
            Step::new(5, "Mash with butter and warm milk")?,
        ],
        &[],
        &[Tag::new("comfort")?, Tag::new("side")?],
    )?;

    let pancakes = Recipe::new(
        "Sunday Pancakes",
        &demo,
        Some("Fluffy stack for two"),
        2,
        &[
            Ingredient::new("Flour", 2.0, UnitOfMeasurement::Cups, 0.8)?,
            Ingredient::new("Egg", 2.0, UnitOfMeasurement::Amount, 0.6)?,
            Ingredient::new("Sugar", 2.0, UnitOfMeasurement::Spoons, 0.2)?,
        ],
        &[
            Step::new(5, "Whisk the batter")?,
            Step::new(10, "Fry on a hot griddle")?,
        ],
        &[],
        &[Tag::new("breakfast")?],
    )?;

    for recipe in [mash, pancakes] {
        let stored = recipes.create_recipe(&recipe, &demo)?;
        println!(
            "Created recipe '{}' (id {}, {} min, {:.2} total)",
            stored.name(),
            stored.id(),
            stored.time_to_cook(),
            stored.total_price()
        );
    }

    Ok(())
}
