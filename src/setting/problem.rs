use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::Setting;

/// How serious a validation problem is.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// The profile is usable but likely not what the user intended.
    Warning,
    /// The profile cannot be used.
    Fatal,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Fatal => write!(f, "fatal"),
        }
    }
}

/// One validation finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Problem {
    /// How serious the problem is.
    pub severity: Severity,
    /// Setting the problem belongs to.
    pub setting: String,
    /// Offending property, when the problem is about a single property.
    pub property: Option<String>,
    /// Error domain of the setting kind that reported the problem.
    pub domain: String,
    /// Human readable description.
    pub message: String,
}

impl Problem {
    /// Creates a problem attributed to `setting`.
    pub fn new(
        severity: Severity,
        setting: &Setting,
        property: Option<&str>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            setting: setting.name().to_string(),
            property: property.map(str::to_string),
            domain: setting.error_domain().to_string(),
            message: message.into(),
        }
    }

    /// Creates a fatal problem.
    pub fn fatal(setting: &Setting, property: Option<&str>, message: impl Into<String>) -> Self {
        Self::new(Severity::Fatal, setting, property, message)
    }

    /// Creates a warning.
    pub fn warning(setting: &Setting, property: Option<&str>, message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, setting, property, message)
    }

    /// Whether the problem makes the profile unusable.
    pub fn is_fatal(&self) -> bool {
        self.severity == Severity::Fatal
    }
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.property {
            Some(property) => write!(
                f,
                "{}: {}.{}: {}",
                self.severity, self.setting, property, self.message
            ),
            None => write!(f, "{}: {}: {}", self.severity, self.setting, self.message),
        }
    }
}

/// Sibling settings visible to a setting while it verifies itself.
#[derive(Debug, Clone, Default)]
pub struct VerifyContext<'a> {
    settings: Vec<&'a Setting>,
}

impl<'a> VerifyContext<'a> {
    /// Context holding every setting of a connection.
    pub fn new(settings: impl IntoIterator<Item = &'a Setting>) -> Self {
        Self {
            settings: settings.into_iter().collect(),
        }
    }

    /// Context for verifying a setting on its own; cross-setting checks are skipped.
    pub fn standalone() -> Self {
        Self::default()
    }

    /// Whether no sibling settings are available.
    pub fn is_standalone(&self) -> bool {
        self.settings.is_empty()
    }

    /// Finds a sibling setting by name.
    pub fn get(&self, name: &str) -> Option<&'a Setting> {
        self.settings.iter().copied().find(|s| s.name() == name)
    }

    /// Whether a sibling setting with `name` is present.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }
}
