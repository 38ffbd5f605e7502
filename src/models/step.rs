//! Step model
//!
//! A single instruction of a recipe with its time estimate.

use serde::Serialize;

use super::ValidationError;

/// A validated recipe step
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Step {
    time_in_minutes: u32,
    instruction: String,
}

impl Step {
    /// Validate and build a step
    pub fn new(time_in_minutes: u32, instruction: &str) -> Result<Self, ValidationError> {
        if time_in_minutes == 0 {
            return Err(ValidationError::new(
                "Step time must be at least one minute",
            ));
        }
        if instruction.trim().is_empty() {
            return Err(ValidationError::new("Step instruction cannot be empty"));
        }
        Ok(Self {
            time_in_minutes,
            instruction: instruction.to_string(),
        })
    }

    pub fn time_in_minutes(&self) -> u32 {
        self.time_in_minutes
    }

    pub fn instruction(&self) -> &str {
        &self.instruction
    }
}
