use std::sync::OnceLock;

use regex::Regex;

use crate::setting::{KnownSetting, Problem, PropertySpec, Setting, SettingKind, VerifyContext};

static UUID_PATTERN: OnceLock<Regex> = OnceLock::new();

#[allow(clippy::expect_used)]
fn uuid_pattern() -> &'static Regex {
    UUID_PATTERN.get_or_init(|| {
        Regex::new(r"^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}$")
            .expect("UUID pattern must be a valid regex")
    })
}

/// General profile identity: name, UUID and the base type.
#[derive(Debug)]
pub struct ConnectionSetting {
    properties: Vec<PropertySpec>,
}

impl ConnectionSetting {
    /// Error domain of this kind.
    pub const ERROR_DOMAIN: &'static str = "connection-setting-error";
    /// User visible profile name.
    pub const ID: &'static str = "id";
    /// Universally unique profile identifier.
    pub const UUID: &'static str = "uuid";
    /// Name of the setting describing the base network type.
    pub const TYPE: &'static str = "type";
    /// Whether the profile activates automatically.
    pub const AUTOCONNECT: &'static str = "autoconnect";
    /// Seconds since the epoch of the last successful activation.
    pub const TIMESTAMP: &'static str = "timestamp";
    /// Whether the profile may be modified.
    pub const READ_ONLY: &'static str = "read-only";

    /// Creates the kind with its schema.
    pub fn new() -> Self {
        Self {
            properties: vec![
                PropertySpec::new(Self::ID, ""),
                PropertySpec::new(Self::UUID, "").identity(),
                PropertySpec::new(Self::TYPE, ""),
                PropertySpec::new(Self::AUTOCONNECT, true),
                PropertySpec::new(Self::TIMESTAMP, 0u64).identity(),
                PropertySpec::new(Self::READ_ONLY, false),
            ],
        }
    }
}

impl Default for ConnectionSetting {
    fn default() -> Self {
        Self::new()
    }
}

impl KnownSetting for ConnectionSetting {
    const NAME: &'static str = "connection";
}

impl SettingKind for ConnectionSetting {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn error_domain(&self) -> &str {
        Self::ERROR_DOMAIN
    }

    fn properties(&self) -> &[PropertySpec] {
        &self.properties
    }

    fn verify(&self, setting: &Setting, context: &VerifyContext<'_>) -> Vec<Problem> {
        let mut problems = Vec::new();

        if setting.get_str(Self::ID).unwrap_or_default().is_empty() {
            problems.push(Problem::fatal(setting, Some(Self::ID), "property is missing"));
        }

        let uuid = setting.get_str(Self::UUID).unwrap_or_default();
        if uuid.is_empty() {
            problems.push(Problem::fatal(setting, Some(Self::UUID), "property is missing"));
        } else if !uuid_pattern().is_match(uuid) {
            problems.push(Problem::fatal(
                setting,
                Some(Self::UUID),
                format!("'{uuid}' is not a valid UUID"),
            ));
        }

        let base_type = setting.get_str(Self::TYPE).unwrap_or_default();
        if base_type.is_empty() {
            problems.push(Problem::fatal(setting, Some(Self::TYPE), "property is missing"));
        } else if !context.is_standalone() && !context.contains(base_type) {
            problems.push(Problem::fatal(
                setting,
                Some(Self::TYPE),
                format!("base type '{base_type}' has no matching setting"),
            ));
        }

        problems
    }
}
