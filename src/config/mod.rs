//! Configuration schema definitions and validation.
//!
//! Tunes logging and the comparator. All sections are optional in the
//! TOML file and fall back to their defaults.

mod comparison;
mod general;
mod loading;


pub use comparison::ComparisonConfig;
pub use general::{GeneralConfig, LogFormat, LogLevel};

use schemars::{JsonSchema, Schema, schema_for};
use serde::{Deserialize, Serialize};

use crate::value::Comparator;

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Default, PartialEq)]
pub struct Config {
    /// Logging settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Value comparison tuning.
    #[serde(default)]
    pub comparison: ComparisonConfig,
}

impl Config {
    /// Builds the non-strict comparator described by this configuration.
    pub fn comparator(&self) -> Comparator {
        Comparator::new(self.comparison.float_tolerance)
    }

    /// JSON schema of the configuration file, for documentation.
    pub fn schema() -> Schema {
        schema_for!(Config)
    }
}
