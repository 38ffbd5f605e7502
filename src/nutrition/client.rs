//! Nutrition lookup client
//!
//! The remote service answers a free-text query with a JSON document holding
//! an `items` array of nutrient records; only the first record is consumed.
//! Parsing is structural via serde; a missing or empty array is a
//! [`LookupError::NoMatch`], never an index crash.

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

use crate::models::Nutrition;

/// Default API endpoint, overridable via `PANTRY_NUTRITION_API_URL`
pub const DEFAULT_BASE_URL: &str = "https://api.calorieninjas.com";

/// Per-lookup failure
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("Nutrition request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("No nutrient data matched query '{query}'")]
    NoMatch { query: String },

    #[error("Lookup was cancelled")]
    Cancelled,
}

/// One nutrient record as the remote service shapes it
#[derive(Debug, Clone, Deserialize)]
pub struct NutrientRecord {
    pub calories: f64,
    pub fat_total_g: f64,
    pub fat_saturated_g: f64,
    pub protein_g: f64,
    pub sodium_mg: f64,
    pub cholesterol_mg: f64,
    pub carbohydrates_total_g: f64,
    pub fiber_g: f64,
    pub sugar_g: f64,
}

/// Response document wrapping the nutrient array
#[derive(Debug, Deserialize)]
pub(crate) struct LookupResponse {
    pub items: Vec<NutrientRecord>,
}

impl From<NutrientRecord> for Nutrition {
    fn from(record: NutrientRecord) -> Self {
        Nutrition {
            calories: record.calories,
            protein: record.protein_g,
            carbs: record.carbohydrates_total_g,
            fat: record.fat_total_g,
            fiber: record.fiber_g,
            sodium: record.sodium_mg,
            sugar: record.sugar_g,
            saturated_fat: record.fat_saturated_g,
            cholesterol: record.cholesterol_mg,
        }
    }
}

/// Seam for the remote nutrition service; tests substitute a stub
#[async_trait]
pub trait NutritionLookup: Send + Sync {
    /// Resolve one free-text ingredient query to its first nutrient record
    async fn lookup(&self, query: &str) -> Result<NutrientRecord, LookupError>;
}

/// Production client for the CalorieNinjas nutrition API
pub struct CalorieNinjasClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl CalorieNinjasClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        let base_url = std::env::var("PANTRY_NUTRITION_API_URL")
            .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self {
            http: reqwest::Client::new(),
            api_key: api_key.into(),
            base_url,
        }
    }

    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: api_key.into(),
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl NutritionLookup for CalorieNinjasClient {
    async fn lookup(&self, query: &str) -> Result<NutrientRecord, LookupError> {
        let response = self
            .http
            .get(format!("{}/v1/nutrition", self.base_url))
            .query(&[("query", query)])
            .header("X-Api-Key", &self.api_key)
            .send()
            .await?
            .error_for_status()?;

        let document: LookupResponse = response.json().await?;
        document
            .items
            .into_iter()
            .next()
            .ok_or_else(|| LookupError::NoMatch {
                query: query.to_string(),
            })
    }
}
