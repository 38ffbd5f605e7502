//! Catalog search strategies
//!
//! A closed family of criteria-bound filters over caller-supplied recipe and
//! user collections. Criteria are validated when the searcher is built, so a
//! constructed searcher can always be applied.

mod recipes;
mod users;

pub use recipes::{DuplicatePolicy, RecipeSearcher};
pub use users::UserSearcher;
