//! Connection profiles: a name-deduplicated collection of settings.
//!
//! A [`Connection`] owns its [`Setting`]s exclusively; sharing a setting
//! with another connection requires duplicating it. Settings iterate in
//! sorted name order, which makes comparison, serialization and traversal
//! deterministic.

mod generic;
mod secrets;
mod verify;

#[cfg(test)]
mod tests;

pub use generic::SettingsMap;
pub use secrets::{SecretsRequest, SubscriptionId};

use std::{collections::BTreeMap, fmt};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    setting::{CompareFlags, KnownSetting, Setting},
    value::{Comparator, Value},
};
use secrets::SecretsSubscribers;

/// Whether a profile applies system-wide or to a single user.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionScope {
    /// Scope has not been determined.
    #[default]
    Unknown,
    /// Available to every user of the system.
    System,
    /// Owned by a single user session.
    User,
}

impl fmt::Display for ConnectionScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectionScope::Unknown => write!(f, "unknown"),
            ConnectionScope::System => write!(f, "system"),
            ConnectionScope::User => write!(f, "user"),
        }
    }
}

/// One network profile.
///
/// `scope` and `path` identify the profile to whoever exports it; they are
/// not part of the profile data and are ignored by comparison and
/// serialization.
pub struct Connection {
    scope: ConnectionScope,
    path: Option<String>,
    settings: BTreeMap<String, Setting>,
    secrets_subscribers: SecretsSubscribers,
}

impl Connection {
    /// Creates an empty connection.
    pub fn new() -> Self {
        Self {
            scope: ConnectionScope::Unknown,
            path: None,
            settings: BTreeMap::new(),
            secrets_subscribers: SecretsSubscribers::default(),
        }
    }

    /// Deep copy of the settings, scope and path.
    ///
    /// Secrets subscribers stay with the original.
    pub fn duplicate(&self) -> Self {
        Self {
            scope: self.scope,
            path: self.path.clone(),
            settings: self.settings.clone(),
            secrets_subscribers: SecretsSubscribers::default(),
        }
    }

    /// Scope of the profile.
    pub fn scope(&self) -> ConnectionScope {
        self.scope
    }

    /// Sets the scope of the profile.
    pub fn set_scope(&mut self, scope: ConnectionScope) {
        self.scope = scope;
    }

    /// External identity handle, if the profile has been exported.
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// Sets or clears the external identity handle.
    pub fn set_path(&mut self, path: Option<String>) {
        self.path = path;
    }

    /// Adds a setting, replacing any setting of the same name wholesale.
    pub fn add_setting(&mut self, setting: Setting) {
        let name = setting.name().to_string();
        if self.settings.insert(name.clone(), setting).is_some() {
            debug!(setting = %name, "replaced existing setting");
        }
    }

    /// Removes the setting called `name` and hands it back to the caller.
    pub fn remove_setting(&mut self, name: &str) -> Option<Setting> {
        self.settings.remove(name)
    }

    /// Returns the setting called `name`.
    pub fn get_setting(&self, name: &str) -> Option<&Setting> {
        self.settings.get(name)
    }

    /// Returns the setting called `name` for modification.
    pub fn get_setting_mut(&mut self, name: &str) -> Option<&mut Setting> {
        self.settings.get_mut(name)
    }

    /// Returns the setting of kind `K`.
    pub fn get_setting_by_type<K: KnownSetting>(&self) -> Option<&Setting> {
        self.settings.get(K::NAME)
    }

    /// Returns the setting of kind `K` for modification.
    pub fn get_setting_by_type_mut<K: KnownSetting>(&mut self) -> Option<&mut Setting> {
        self.settings.get_mut(K::NAME)
    }

    /// Iterates over the settings in name order.
    pub fn settings(&self) -> impl Iterator<Item = &Setting> {
        self.settings.values()
    }

    /// Setting names in sorted order.
    pub fn setting_names(&self) -> impl Iterator<Item = &str> {
        self.settings.keys().map(String::as_str)
    }

    /// Whether the connection holds no settings.
    pub fn is_empty(&self) -> bool {
        self.settings.is_empty()
    }

    /// Whether both connections hold the same settings with equal properties.
    pub fn compare(&self, other: &Connection, flags: CompareFlags) -> bool {
        self.compare_using(other, flags, &Comparator::default())
    }

    /// Like [`Connection::compare`], with an explicit comparator.
    pub fn compare_using(
        &self,
        other: &Connection,
        flags: CompareFlags,
        comparator: &Comparator,
    ) -> bool {
        if self.settings.len() != other.settings.len() {
            return false;
        }

        self.settings.iter().all(|(name, setting)| {
            other
                .settings
                .get(name)
                .is_some_and(|theirs| setting.diff_using(theirs, flags, comparator).is_empty())
        })
    }

    /// Lists the differing properties of each setting.
    ///
    /// A setting present on only one side reports every property of its
    /// schema. Settings without differences are left out.
    pub fn diff(&self, other: &Connection, flags: CompareFlags) -> BTreeMap<String, Vec<String>> {
        self.diff_using(other, flags, &Comparator::default())
    }

    /// Like [`Connection::diff`], with an explicit comparator.
    pub fn diff_using(
        &self,
        other: &Connection,
        flags: CompareFlags,
        comparator: &Comparator,
    ) -> BTreeMap<String, Vec<String>> {
        let mut result = BTreeMap::new();

        for (name, setting) in &self.settings {
            let properties = match other.settings.get(name) {
                Some(theirs) => setting.diff_using(theirs, flags, comparator),
                None => all_property_names(setting),
            };
            if !properties.is_empty() {
                result.insert(name.clone(), properties);
            }
        }

        for (name, setting) in &other.settings {
            if !self.settings.contains_key(name) {
                result.insert(name.clone(), all_property_names(setting));
            }
        }

        result
    }

    /// Lazily walks every `(setting, property, value)` triple.
    ///
    /// Settings are visited in name order and properties in schema order.
    /// Call again to restart the traversal.
    pub fn properties(&self) -> impl Iterator<Item = (&str, &str, &Value)> {
        self.settings.iter().flat_map(|(name, setting)| {
            setting
                .properties()
                .map(move |(property, value)| (name.as_str(), property, value))
        })
    }

    /// Calls `f` for every `(setting, property, value)` triple in traversal order.
    pub fn for_each_property<F>(&self, mut f: F)
    where
        F: FnMut(&str, &str, &Value),
    {
        for (setting, property, value) in self.properties() {
            f(setting, property, value);
        }
    }

    /// Logs the full profile at debug level.
    pub fn dump(&self) {
        debug!("{self}");
    }
}

fn all_property_names(setting: &Setting) -> Vec<String> {
    setting
        .specs()
        .iter()
        .map(|spec| spec.name().to_string())
        .collect()
}

impl Default for Connection {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for Connection {
    fn clone(&self) -> Self {
        self.duplicate()
    }
}

impl fmt::Debug for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connection")
            .field("scope", &self.scope)
            .field("path", &self.path)
            .field("settings", &self.settings)
            .field("secrets_subscribers", &self.secrets_subscribers.len())
            .finish()
    }
}

impl fmt::Display for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Connection (scope: {}, path: {})",
            self.scope,
            self.path.as_deref().unwrap_or("-")
        )?;
        for setting in self.settings.values() {
            write!(f, "{setting}")?;
        }
        Ok(())
    }
}
