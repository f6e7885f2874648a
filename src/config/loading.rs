use std::{fs, path::Path};

use super::Config;
use crate::{ProfileError, Result};

impl Config {
    /// Parses a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The TOML content is invalid
    /// - A section does not match the schema
    /// - The comparison tolerance is negative or not finite
    pub fn from_toml_str(content: &str) -> Result<Config> {
        Self::parse(content, None)
    }

    /// Loads a configuration file.
    ///
    /// A missing file yields the default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The configuration file exists but cannot be read
    /// - The TOML content is invalid
    /// - The resulting configuration fails validation
    pub fn load(path: &Path) -> Result<Config> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path)?;
        Self::parse(&content, Some(path))
    }

    fn parse(content: &str, path: Option<&Path>) -> Result<Config> {
        let config: Config =
            toml::from_str(content).map_err(|e| ProfileError::toml_parse(e, path))?;

        config.comparison.validate()?;
        Ok(config)
    }
}
