//! Pantry Library
//!
//! Core functionality for recipe catalog management and nutrition aggregation.

pub mod auth;
pub mod build_info;
pub mod db;
pub mod models;
pub mod nutrition;
pub mod search;
pub mod services;
pub mod session;
pub mod store;
