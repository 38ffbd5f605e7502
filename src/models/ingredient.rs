//! Ingredient model
//!
//! One ingredient line of a recipe: name, quantity, unit, and price.

use serde::{Deserialize, Serialize};

use super::ValidationError;

/// Unit a recipe measures an ingredient in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitOfMeasurement {
    Spoons,
    Grams,
    Cups,
    Teaspoons,
    /// Discrete count (e.g. "2 potatoes")
    Amount,
}

impl UnitOfMeasurement {
    /// Parse from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "spoons" => Some(UnitOfMeasurement::Spoons),
            "grams" => Some(UnitOfMeasurement::Grams),
            "cups" => Some(UnitOfMeasurement::Cups),
            "teaspoons" => Some(UnitOfMeasurement::Teaspoons),
            "amount" => Some(UnitOfMeasurement::Amount),
            _ => None,
        }
    }

    /// Convert to database string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            UnitOfMeasurement::Spoons => "spoons",
            UnitOfMeasurement::Grams => "grams",
            UnitOfMeasurement::Cups => "cups",
            UnitOfMeasurement::Teaspoons => "teaspoons",
            UnitOfMeasurement::Amount => "amount",
        }
    }
}

impl std::fmt::Display for UnitOfMeasurement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.to_db_str())
    }
}

/// A validated ingredient line
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ingredient {
    name: String,
    quantity: f64,
    unit: UnitOfMeasurement,
    price: f64,
}

impl Ingredient {
    /// Validate and build an ingredient
    pub fn new(
        name: &str,
        quantity: f64,
        unit: UnitOfMeasurement,
        price: f64,
    ) -> Result<Self, ValidationError> {
        if name.trim().is_empty() {
            return Err(ValidationError::new("Ingredient name cannot be empty"));
        }
        if !(quantity > 0.0) {
            return Err(ValidationError::new(
                "Ingredient quantity must be greater than 0",
            ));
        }
        if !(price >= 0.0) {
            return Err(ValidationError::new("Ingredient price cannot be negative"));
        }
        Ok(Self {
            name: name.to_string(),
            quantity,
            unit,
            price,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn quantity(&self) -> f64 {
        self.quantity
    }

    pub fn unit(&self) -> UnitOfMeasurement {
        self.unit
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    /// Free-text query sent to the nutrition lookup service
    pub fn lookup_query(&self) -> String {
        format!("{} {} {}", self.quantity, self.unit, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_ingredient() {
        let ing = Ingredient::new("Potato", 2.0, UnitOfMeasurement::Amount, 1.5).unwrap();
        assert_eq!(ing.name(), "Potato");
        assert_eq!(ing.quantity(), 2.0);
        assert_eq!(ing.unit(), UnitOfMeasurement::Amount);
        assert_eq!(ing.price(), 1.5);
    }

    #[test]
    fn test_empty_name_rejected() {
        assert!(Ingredient::new("", 1.0, UnitOfMeasurement::Grams, 0.0).is_err());
        assert!(Ingredient::new("   ", 1.0, UnitOfMeasurement::Grams, 0.0).is_err());
    }

    #[test]
    fn test_nonpositive_quantity_rejected() {
        assert!(Ingredient::new("Flour", 0.0, UnitOfMeasurement::Cups, 1.0).is_err());
        assert!(Ingredient::new("Flour", -1.0, UnitOfMeasurement::Cups, 1.0).is_err());
        assert!(Ingredient::new("Flour", f64::NAN, UnitOfMeasurement::Cups, 1.0).is_err());
    }

    #[test]
    fn test_negative_price_rejected() {
        assert!(Ingredient::new("Flour", 1.0, UnitOfMeasurement::Cups, -0.01).is_err());
    }

    #[test]
    fn test_lookup_query_format() {
        let ing = Ingredient::new("Basmati Rice", 200.0, UnitOfMeasurement::Grams, 3.0).unwrap();
        assert_eq!(ing.lookup_query(), "200 grams Basmati Rice");
    }

    #[test]
    fn test_unit_round_trip() {
        for unit in [
            UnitOfMeasurement::Spoons,
            UnitOfMeasurement::Grams,
            UnitOfMeasurement::Cups,
            UnitOfMeasurement::Teaspoons,
            UnitOfMeasurement::Amount,
        ] {
            assert_eq!(UnitOfMeasurement::from_str(unit.to_db_str()), Some(unit));
        }
        assert_eq!(UnitOfMeasurement::from_str("liters"), None);
    }
}
