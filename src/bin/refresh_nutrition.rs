//! Recompute cached nutrition totals for recipes
//! Usage: cargo run --bin refresh_nutrition -- [recipe_id]
//!
//! Requires PANTRY_NUTRITION_API_KEY; refreshes every recipe when no id is
//! given.

use std::path::PathBuf;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use pantry::nutrition::{aggregate_for_recipe, CalorieNinjasClient, NutritionLookup};
use pantry::store;

fn get_database_path() -> PathBuf {
    std::env::var("PANTRY_DATABASE_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let mut path = std::env::current_exe()
                .ok()
                .and_then(|p| p.parent().map(|p| p.to_path_buf()))
                .unwrap_or_else(|| PathBuf::from("."));

            // Go up from target/release or target/debug to project root
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

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("pantry=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    pantry::build_info::print_startup_banner();

    let args: Vec<String> = std::env::args().collect();
    let only_id: Option<i64> = args.get(1).map(|s| s.parse()).transpose()?;

    let api_key = std::env::var("PANTRY_NUTRITION_API_KEY")
        .map_err(|_| "PANTRY_NUTRITION_API_KEY is not set")?;
    let client: Arc<dyn NutritionLookup> = Arc::new(CalorieNinjasClient::new(api_key));

    let db_path = get_database_path();
    println!("Database: {}", db_path.display());

    let database = pantry::db::Database::new(&db_path)?;
    database.with_conn(|conn| pantry::db::migrations::run_migrations(conn))?;

    let recipes = database.with_conn(|conn| match only_id {
        Some(id) => Ok(store::recipes::get_by_id(conn, id)?.into_iter().collect()),
        None => store::recipes::list_all(conn),
    })?;

    if recipes.is_empty() {
        println!("No recipes to refresh");
        return Ok(());
    }

    println!(
        "Refreshing {} recipe(s) at {}",
        recipes.len(),
        chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
    );

    for recipe in &recipes {
        println!("\nRecipe {}: {}", recipe.id(), recipe.name());

        let old = database
            .with_conn(|conn| store::recipes::get_cached_nutrition(conn, recipe.id()))?;
        if let Some(old) = old {
            println!("  Old calories: {:.1}", old.calories);
        }

        match aggregate_for_recipe(Arc::clone(&client), recipe).await {
            Ok(totals) => {
                database.with_conn(|conn| {
                    store::recipes::update_cached_nutrition(conn, recipe.id(), &totals)
                })?;
                println!("  New calories: {:.1}", totals.calories);
                println!(
                    "  Per serving:  {:.1}",
                    totals.scale(1.0 / recipe.servings() as f64).calories
                );
            }
            Err(e) => {
                println!("  Skipped: {}", e);
            }
        }
    }

    Ok(())
}
