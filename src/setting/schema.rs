use std::fmt::Debug;

use bitflags::bitflags;

use super::{Problem, Setting, VerifyContext};
use crate::value::{Value, ValueKind};

bitflags! {
    /// Per-property behaviour flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct PropertyFlags: u32 {
        /// Property holds sensitive data handled through the secrets operations.
        const SECRET = 0x00000001;
        /// Property identifies a profile instance (UUIDs, timestamps, cached
        /// observations) rather than describing the network.
        const IDENTITY = 0x00000002;
    }
}

/// Declaration of a single property in a setting schema.
///
/// The declared kind is taken from the default value.
#[derive(Debug, Clone)]
pub struct PropertySpec {
    name: &'static str,
    default: Value,
    flags: PropertyFlags,
}

impl PropertySpec {
    /// Declares a property with its default value.
    pub fn new(name: &'static str, default: impl Into<Value>) -> Self {
        Self {
            name,
            default: default.into(),
            flags: PropertyFlags::empty(),
        }
    }

    /// Marks the property as secret.
    pub fn secret(mut self) -> Self {
        self.flags |= PropertyFlags::SECRET;
        self
    }

    /// Marks the property as an identity property.
    pub fn identity(mut self) -> Self {
        self.flags |= PropertyFlags::IDENTITY;
        self
    }

    /// Property name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Kind every value of this property must have.
    pub fn kind(&self) -> ValueKind {
        self.default.kind()
    }

    /// Value of the property in a freshly constructed setting.
    pub fn default_value(&self) -> &Value {
        &self.default
    }

    /// Behaviour flags.
    pub fn flags(&self) -> PropertyFlags {
        self.flags
    }

    /// Whether the property is secret.
    pub fn is_secret(&self) -> bool {
        self.flags.contains(PropertyFlags::SECRET)
    }

    /// Whether the property is an identity property.
    pub fn is_identity(&self) -> bool {
        self.flags.contains(PropertyFlags::IDENTITY)
    }
}

/// Behaviour of one setting type.
///
/// Implementors declare the fixed property schema and the type-specific
/// validation rules. A [`Setting`] pairs a kind with the current values.
pub trait SettingKind: Debug + Send + Sync {
    /// Setting name, unique among registered kinds (e.g. `"802-11-wireless"`).
    fn name(&self) -> &str;

    /// Opaque identifier stamped on every problem this kind reports.
    fn error_domain(&self) -> &str;

    /// Property schema, in serialization order.
    fn properties(&self) -> &[PropertySpec];

    /// Checks the setting's values, optionally against its sibling settings.
    ///
    /// Implementations collect every problem instead of stopping at the first.
    fn verify(&self, _setting: &Setting, _context: &VerifyContext<'_>) -> Vec<Problem> {
        Vec::new()
    }

    /// Whether an empty secret must be provided before the profile is usable.
    ///
    /// Only consulted for secret properties whose value is empty.
    fn secret_required(&self, _setting: &Setting, _property: &str) -> bool {
        true
    }
}

/// A setting kind whose name is known at compile time.
///
/// Enables typed lookups such as
/// [`Connection::get_setting_by_type`](crate::connection::Connection::get_setting_by_type).
pub trait KnownSetting: SettingKind {
    /// Setting name, identical to [`SettingKind::name`].
    const NAME: &'static str;
}
