use std::{fmt, io, path::Path, result};

use thiserror::Error;

use crate::value::ValueKind;

/// Error types for profile construction, parsing and comparison.
///
/// Validation problems are not errors: `verify` reports them as a list of
/// [`Problem`](crate::setting::Problem)s instead.
#[derive(Error, Debug)]
pub enum ProfileError {
    /// A property name that the setting's schema does not declare
    #[error("setting '{setting}' has no property '{property}'")]
    SchemaViolation {
        /// Setting whose schema was violated
        setting: String,
        /// The undeclared property name
        property: String,
    },

    /// A setting name that is not present in the registry
    #[error("unknown setting type '{0}'")]
    UnknownSettingType(String),

    /// A value whose kind does not match the property's declared kind
    #[error("malformed value for '{setting}.{property}': expected {expected}, got {actual}")]
    MalformedValue {
        /// Setting owning the property
        setting: String,
        /// Property that received the value
        property: String,
        /// Kind declared by the schema
        expected: ValueKind,
        /// Kind of the rejected value
        actual: ValueKind,
    },

    /// Values of a reserved kind reached the comparator
    #[error("comparison of {0} values is not supported")]
    UnsupportedComparison(ValueKind),

    /// Export or import of the generic map failed
    #[error("failed to process {content_type}: {details}")]
    Serialization {
        /// Format being produced or consumed
        content_type: String,
        /// Serializer error details
        details: String,
    },

    /// Configuration validation error
    #[error("configuration validation failed for '{component}': {details}")]
    ConfigValidation {
        /// Component that failed validation
        component: String,
        /// Validation error details
        details: String,
    },

    /// TOML parsing error with location context
    #[error("failed to parse TOML at '{location}': {details}")]
    TomlParseError {
        /// Location of TOML being parsed (file path or "string")
        location: String,
        /// Parse error details
        details: String,
    },

    /// Standard I/O operation error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// A specialized `Result` type for profile operations.
pub type Result<T> = result::Result<T, ProfileError>;

impl ProfileError {
    /// Creates a TOML parsing error with optional file path context.
    ///
    /// # Arguments
    ///
    /// * `error` - The underlying parsing error
    /// * `path` - Optional path to the file that failed to parse
    pub fn toml_parse(error: impl fmt::Display, path: Option<&Path>) -> Self {
        let location = match path {
            Some(p) => {
                let clean_path = p.canonicalize().unwrap_or_else(|_| p.to_path_buf());
                clean_path.to_string_lossy().to_string()
            }
            None => "string".to_string(),
        };

        ProfileError::TomlParseError {
            location,
            details: error.to_string(),
        }
    }

    /// Creates a JSON serialization error.
    pub fn json(error: impl fmt::Display) -> Self {
        ProfileError::Serialization {
            content_type: "json".to_string(),
            details: error.to_string(),
        }
    }
}
