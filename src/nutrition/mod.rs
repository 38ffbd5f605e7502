//! Nutrition aggregation
//!
//! Looks up macro nutrition per ingredient against a remote service and sums
//! the results for a whole recipe. Lookup failures are normalized to one
//! opaque error so presentation code can show a plain "facts unavailable"
//! message; details go to the log instead.

mod aggregate;
mod client;

pub use aggregate::{aggregate_for_recipe, MAX_CONCURRENT_LOOKUPS};
pub use client::{CalorieNinjasClient, LookupError, NutrientRecord, NutritionLookup};

use thiserror::Error;

/// Aggregate-level failure surfaced to callers
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NutritionError {
    #[error("Nutrition facts are not available for this recipe")]
    Unavailable,
}
