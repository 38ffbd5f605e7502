//! Persistence for domain aggregates
//!
//! SQL access for users, recipes, ratings, and favorites. Rows are rebuilt
//! through the validating domain constructors, so a row that no longer
//! satisfies the domain invariants surfaces as [`crate::db::DbError::Corrupt`]
//! instead of leaking an invalid entity.

pub mod recipes;
pub mod users;
