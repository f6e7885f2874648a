//! Settings: named groups of schema-fixed, typed properties.
//!
//! A [`Setting`] pairs a [`SettingKind`] (the schema and its validation
//! rules) with the current property values. Settings are plain values:
//! duplicating one yields an independent deep copy.

pub mod builtin;
mod flags;
mod problem;
mod schema;


pub use flags::{CompareFlags, SerializeFlags};
pub use problem::{Problem, Severity, VerifyContext};
pub use schema::{KnownSetting, PropertyFlags, PropertySpec, SettingKind};

use std::{cmp::Ordering, fmt, sync::Arc};

use tracing::{debug, warn};

use crate::{
    ProfileError, Result,
    value::{Comparator, Value, ValueMap},
};

/// A secret property that currently has no value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecretHint {
    /// Name of the empty secret property.
    pub property: String,
    /// Whether the profile cannot be used until the secret is provided.
    pub required: bool,
}

/// One instance of a setting type with its current property values.
#[derive(Clone)]
pub struct Setting {
    kind: Arc<dyn SettingKind>,
    values: Vec<Value>,
}

impl Setting {
    /// Creates a setting with every property at its default value.
    pub fn new(kind: Arc<dyn SettingKind>) -> Self {
        let values = kind
            .properties()
            .iter()
            .map(|spec| spec.default_value().clone())
            .collect();

        Self { kind, values }
    }

    /// Creates a setting and applies the given properties on top of the defaults.
    ///
    /// # Errors
    /// * `ProfileError::SchemaViolation` - If a property is not in the schema
    /// * `ProfileError::MalformedValue` - If a value has the wrong kind
    pub fn from_property_map(kind: Arc<dyn SettingKind>, properties: &ValueMap) -> Result<Self> {
        let mut setting = Self::new(kind);
        setting.apply_property_map(properties)?;
        Ok(setting)
    }

    /// Setting name.
    pub fn name(&self) -> &str {
        self.kind.name()
    }

    /// Error domain of this setting's kind.
    pub fn error_domain(&self) -> &str {
        self.kind.error_domain()
    }

    /// The kind describing this setting.
    pub fn kind(&self) -> &Arc<dyn SettingKind> {
        &self.kind
    }

    /// Property schema, in serialization order.
    pub fn specs(&self) -> &[PropertySpec] {
        self.kind.properties()
    }

    /// Looks up the schema entry for `property`.
    pub fn spec(&self, property: &str) -> Option<&PropertySpec> {
        self.specs().iter().find(|spec| spec.name() == property)
    }

    /// Iterates over `(property, value)` pairs in schema order.
    pub fn properties(&self) -> impl Iterator<Item = (&str, &Value)> + '_ {
        self.specs()
            .iter()
            .zip(&self.values)
            .map(|(spec, value)| (spec.name(), value))
    }

    /// Iterates over `(property, is_secret)` pairs in schema order.
    pub fn secret_flags(&self) -> impl Iterator<Item = (&str, bool)> + '_ {
        self.specs()
            .iter()
            .map(|spec| (spec.name(), spec.is_secret()))
    }

    /// Returns the current value of `property`.
    ///
    /// # Errors
    /// * `ProfileError::SchemaViolation` - If the property is not in the schema
    pub fn get(&self, property: &str) -> Result<&Value> {
        let index = self.index_of(property)?;
        Ok(&self.values[index])
    }

    /// Returns the string value of `property`, or `None` if it is not a string property.
    pub fn get_str(&self, property: &str) -> Option<&str> {
        self.get(property).ok().and_then(Value::as_str)
    }

    /// Replaces the value of `property`.
    ///
    /// # Errors
    /// * `ProfileError::SchemaViolation` - If the property is not in the schema
    /// * `ProfileError::MalformedValue` - If the value kind differs from the declared kind
    pub fn set(&mut self, property: &str, value: impl Into<Value>) -> Result<()> {
        let value = value.into();
        let index = self.checked_index(property, &value)?;
        self.values[index] = value;
        Ok(())
    }

    /// Builder form of [`Setting::set`].
    ///
    /// # Errors
    /// Same as [`Setting::set`].
    pub fn with(mut self, property: &str, value: impl Into<Value>) -> Result<Self> {
        self.set(property, value)?;
        Ok(self)
    }

    /// Restores `property` to its default value.
    ///
    /// # Errors
    /// * `ProfileError::SchemaViolation` - If the property is not in the schema
    pub fn reset(&mut self, property: &str) -> Result<()> {
        let index = self.index_of(property)?;
        self.values[index] = self.specs()[index].default_value().clone();
        Ok(())
    }

    /// Whether `property` still holds its default value.
    ///
    /// # Errors
    /// * `ProfileError::SchemaViolation` - If the property is not in the schema
    pub fn is_default(&self, property: &str) -> Result<bool> {
        let index = self.index_of(property)?;
        Ok(self.values[index] == *self.specs()[index].default_value())
    }

    /// Whether `property` is flagged secret.
    ///
    /// # Errors
    /// * `ProfileError::SchemaViolation` - If the property is not in the schema
    pub fn is_secret(&self, property: &str) -> Result<bool> {
        let index = self.index_of(property)?;
        Ok(self.specs()[index].is_secret())
    }

    /// Deep copy with independent ownership.
    pub fn duplicate(&self) -> Self {
        self.clone()
    }

    /// Lists the properties whose values differ from `other`, in schema order.
    ///
    /// Settings of different types differ in every compared property.
    pub fn diff(&self, other: &Setting, flags: CompareFlags) -> Vec<String> {
        let comparator = if flags.contains(CompareFlags::STRICT_NUMERIC) {
            Comparator::strict()
        } else {
            Comparator::default()
        };

        self.diff_using(other, flags, &comparator)
    }

    /// Like [`Setting::diff`], with an explicit comparator.
    ///
    /// `CompareFlags::STRICT_NUMERIC` still forces a zero float tolerance.
    pub fn diff_using(
        &self,
        other: &Setting,
        flags: CompareFlags,
        comparator: &Comparator,
    ) -> Vec<String> {
        let strict;
        let comparator = if flags.contains(CompareFlags::STRICT_NUMERIC) {
            strict = Comparator::strict();
            &strict
        } else {
            comparator
        };

        let same_kind = self.name() == other.name();

        self.properties()
            .zip(self.specs())
            .filter(|(_, spec)| !Self::skipped(spec, flags))
            .filter(|((property, value), _)| {
                let theirs = if same_kind {
                    other.get(property).ok()
                } else {
                    None
                };
                comparator.compare_optional(Some(*value), theirs) != Ordering::Equal
            })
            .map(|((property, _), _)| property.to_string())
            .collect()
    }

    /// Whether no property differs from `other` under `flags`.
    pub fn equals(&self, other: &Setting, flags: CompareFlags) -> bool {
        self.diff(other, flags).is_empty()
    }

    /// Collects every validation problem of this setting.
    pub fn verify(&self, context: &VerifyContext<'_>) -> Vec<Problem> {
        self.kind.verify(self, context)
    }

    /// Resets every secret property to its default value.
    pub fn clear_secrets(&mut self) {
        let kind = Arc::clone(&self.kind);
        for (spec, value) in kind.properties().iter().zip(self.values.iter_mut()) {
            if spec.is_secret() {
                *value = spec.default_value().clone();
            }
        }
    }

    /// Merges secret values into this setting and returns how many were applied.
    ///
    /// Keys that are not secret properties of this setting are ignored, as
    /// are values of the wrong kind.
    pub fn update_secrets(&mut self, secrets: &ValueMap) -> usize {
        let mut applied = 0;

        for (property, value) in secrets {
            let Some(index) = self.position(property) else {
                debug!(setting = self.name(), property = %property, "ignoring unknown secret");
                continue;
            };

            let spec = &self.specs()[index];
            if !spec.is_secret() {
                debug!(setting = self.name(), property = %property, "ignoring non-secret property");
                continue;
            }

            if spec.kind() != value.kind() {
                warn!(
                    setting = self.name(),
                    property = %property,
                    expected = %spec.kind(),
                    actual = %value.kind(),
                    "ignoring secret of the wrong kind"
                );
                continue;
            }

            self.values[index] = value.clone();
            applied += 1;
        }

        applied
    }

    /// Lists the secret properties that are still empty.
    pub fn need_secrets(&self) -> Vec<SecretHint> {
        self.properties()
            .zip(self.specs())
            .filter(|((_, value), spec)| spec.is_secret() && value.is_empty())
            .map(|((property, _), _)| SecretHint {
                property: property.to_string(),
                required: self.kind.secret_required(self, property),
            })
            .collect()
    }

    /// Serializes the properties that differ from their defaults.
    ///
    /// An all-default setting serializes its non-secret properties instead,
    /// so the setting still survives a round trip through the generic map.
    pub fn to_property_map(&self, flags: SerializeFlags) -> ValueMap {
        let changed: ValueMap = self
            .specs()
            .iter()
            .zip(&self.values)
            .filter(|(spec, _)| !(flags.contains(SerializeFlags::NO_SECRETS) && spec.is_secret()))
            .filter(|(spec, value)| *value != spec.default_value())
            .map(|(spec, value)| (spec.name().to_string(), value.clone()))
            .collect();

        if !changed.is_empty() {
            return changed;
        }

        self.specs()
            .iter()
            .zip(&self.values)
            .filter(|(spec, _)| !spec.is_secret())
            .map(|(spec, value)| (spec.name().to_string(), value.clone()))
            .collect()
    }

    /// Applies every entry of `properties`, or none of them on error.
    ///
    /// # Errors
    /// * `ProfileError::SchemaViolation` - If a property is not in the schema
    /// * `ProfileError::MalformedValue` - If a value has the wrong kind
    pub fn apply_property_map(&mut self, properties: &ValueMap) -> Result<()> {
        let mut staged = Vec::with_capacity(properties.len());
        for (property, value) in properties {
            staged.push((self.checked_index(property, value)?, value));
        }

        for (index, value) in staged {
            self.values[index] = value.clone();
        }

        Ok(())
    }

    fn skipped(spec: &PropertySpec, flags: CompareFlags) -> bool {
        (flags.contains(CompareFlags::IGNORE_SECRETS) && spec.is_secret())
            || (flags.contains(CompareFlags::IGNORE_ID) && spec.is_identity())
    }

    fn position(&self, property: &str) -> Option<usize> {
        self.specs().iter().position(|spec| spec.name() == property)
    }

    fn index_of(&self, property: &str) -> Result<usize> {
        self.position(property)
            .ok_or_else(|| ProfileError::SchemaViolation {
                setting: self.name().to_string(),
                property: property.to_string(),
            })
    }

    fn checked_index(&self, property: &str, value: &Value) -> Result<usize> {
        let index = self.index_of(property)?;
        let expected = self.specs()[index].kind();

        if expected != value.kind() {
            return Err(ProfileError::MalformedValue {
                setting: self.name().to_string(),
                property: property.to_string(),
                expected,
                actual: value.kind(),
            });
        }

        Ok(index)
    }
}

impl fmt::Debug for Setting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for (property, value) in self.properties() {
            map.entry(&property, value);
        }
        map.finish()
    }
}

impl fmt::Display for Setting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[{}]", self.name())?;
        for (spec, value) in self.specs().iter().zip(&self.values) {
            if spec.is_secret() && !value.is_empty() {
                writeln!(f, "    {} : <hidden>", spec.name())?;
            } else {
                writeln!(f, "    {} : {}", spec.name(), value)?;
            }
        }
        Ok(())
    }
}
