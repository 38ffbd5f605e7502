//! Recipe-level aggregation
//!
//! One lookup per ingredient, run concurrently under a small cap. A
//! contribution is merged into the running total only after its lookup
//! succeeds; the first failure aborts every in-flight sibling and the whole
//! aggregation fails with no partial sums observable.

use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::models::{Nutrition, Recipe};

use super::client::{LookupError, NutritionLookup};
use super::NutritionError;

/// Upper bound on in-flight lookups for one recipe
pub const MAX_CONCURRENT_LOOKUPS: usize = 4;

/// Sum macro nutrition across every ingredient of the recipe
pub async fn aggregate_for_recipe(
    lookup: Arc<dyn NutritionLookup>,
    recipe: &Recipe,
) -> Result<Nutrition, NutritionError> {
    // The recipe invariant guarantees at least one ingredient
    let queries: Vec<String> = recipe
        .ingredients()
        .iter()
        .map(|ingredient| ingredient.lookup_query())
        .collect();

    let permits = Arc::new(Semaphore::new(MAX_CONCURRENT_LOOKUPS.min(queries.len())));
    let mut lookups: JoinSet<Result<Nutrition, LookupError>> = JoinSet::new();

    for query in queries {
        let lookup = Arc::clone(&lookup);
        let permits = Arc::clone(&permits);
        lookups.spawn(async move {
            let _permit = permits
                .acquire_owned()
                .await
                .map_err(|_| LookupError::Cancelled)?;
            let record = lookup.lookup(&query).await?;
            Ok(Nutrition::from(record))
        });
    }

    let mut totals = Nutrition::zero();
    while let Some(joined) = lookups.join_next().await {
        match joined {
            Ok(Ok(contribution)) => totals = totals + contribution,
            Ok(Err(error)) => {
                lookups.abort_all();
                tracing::warn!(recipe = recipe.name(), %error, "nutrition lookup failed");
                return Err(NutritionError::Unavailable);
            }
            Err(join_error) => {
                lookups.abort_all();
                tracing::warn!(recipe = recipe.name(), %join_error, "nutrition task failed");
                return Err(NutritionError::Unavailable);
            }
        }
    }

    Ok(totals)
}
