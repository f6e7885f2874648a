use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{ProfileError, Result, value::DEFAULT_FLOAT_TOLERANCE};

/// Value comparison tuning.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct ComparisonConfig {
    /// Absolute difference under which two floats compare equal.
    #[serde(default = "default_float_tolerance")]
    pub float_tolerance: f64,
}

fn default_float_tolerance() -> f64 {
    DEFAULT_FLOAT_TOLERANCE
}

impl Default for ComparisonConfig {
    fn default() -> Self {
        Self {
            float_tolerance: default_float_tolerance(),
        }
    }
}

impl ComparisonConfig {
    /// Checks that the tolerance is finite and non-negative.
    ///
    /// # Errors
    /// * `ProfileError::ConfigValidation` - If the tolerance is unusable
    pub fn validate(&self) -> Result<()> {
        if !self.float_tolerance.is_finite() || self.float_tolerance < 0.0 {
            return Err(ProfileError::ConfigValidation {
                component: "comparison".to_string(),
                details: format!(
                    "float_tolerance must be finite and non-negative, got {}",
                    self.float_tolerance
                ),
            });
        }

        Ok(())
    }
}
