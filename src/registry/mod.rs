//! Registry of setting kinds, keyed by setting name.

#[cfg(test)]
mod tests;

use std::{collections::BTreeMap, sync::Arc};

use tracing::{debug, warn};

use crate::{
    ProfileError, Result,
    setting::{Setting, SettingKind, builtin},
};

/// Maps setting names to the kinds that construct them, and error domains
/// back to setting names.
///
/// The registry is an explicit context object: the host builds it once and
/// passes it by reference to every operation that needs to construct
/// settings by name. All `register`/`unregister` calls are expected to
/// finish before lookups begin; concurrent mutation and lookup need an
/// external lock (e.g. `RwLock<SettingRegistry>`).
///
/// Unregistering a kind while connections still hold settings of that kind
/// is allowed but leaves those connections unable to round-trip through the
/// generic map.
#[derive(Debug, Default, Clone)]
pub struct SettingRegistry {
    kinds: BTreeMap<String, Arc<dyn SettingKind>>,
    domains: BTreeMap<String, String>,
}

impl SettingRegistry {
    /// Creates an empty registry.
    ///
    /// Kinds must be added using [`SettingRegistry::register`] before any
    /// connection is parsed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding every built-in kind.
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        for kind in builtin::all() {
            registry.register(kind);
        }
        registry
    }

    /// Registers a kind under its own name.
    ///
    /// A kind already registered under the same name is replaced, along
    /// with its error-domain mapping.
    pub fn register(&mut self, kind: Arc<dyn SettingKind>) {
        let name = kind.name().to_string();

        if let Some(previous) = self.kinds.remove(&name) {
            warn!(setting = %name, "replacing registered setting kind");
            self.release_domain(previous.error_domain(), &name);
        }

        let domain = kind.error_domain().to_string();
        if let Some(owner) = self.domains.get(&domain).filter(|owner| **owner != name) {
            warn!(
                setting = %name,
                domain = %domain,
                previous_owner = %owner,
                "error domain already claimed, it now resolves to the new kind"
            );
        }

        debug!(setting = %name, domain = %domain, "registered setting kind");
        self.domains.insert(domain, name.clone());
        self.kinds.insert(name, kind);
    }

    /// Removes the kind registered under `name` and returns it.
    pub fn unregister(&mut self, name: &str) -> Option<Arc<dyn SettingKind>> {
        let kind = self.kinds.remove(name)?;
        self.release_domain(kind.error_domain(), name);
        debug!(setting = name, "unregistered setting kind");
        Some(kind)
    }

    fn release_domain(&mut self, domain: &str, name: &str) {
        if self.domains.get(domain).is_some_and(|owner| owner == name) {
            self.domains.remove(domain);
        }
    }

    /// Whether a kind is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.kinds.contains_key(name)
    }

    /// Returns the kind registered under `name`.
    pub fn kind(&self, name: &str) -> Option<&Arc<dyn SettingKind>> {
        self.kinds.get(name)
    }

    /// Registered setting names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.kinds.keys().map(String::as_str)
    }

    /// Constructs a setting with default values.
    ///
    /// # Errors
    /// * `ProfileError::UnknownSettingType` - If `name` is not registered
    pub fn create(&self, name: &str) -> Result<Setting> {
        self.kinds
            .get(name)
            .map(|kind| Setting::new(Arc::clone(kind)))
            .ok_or_else(|| ProfileError::UnknownSettingType(name.to_string()))
    }

    /// Alias of [`SettingRegistry::create`].
    ///
    /// # Errors
    /// * `ProfileError::UnknownSettingType` - If `name` is not registered
    pub fn create_setting(&self, name: &str) -> Result<Setting> {
        self.create(name)
    }

    /// Resolves an error domain to the name of the kind that owns it.
    pub fn lookup_type_by_error_domain(&self, domain: &str) -> Option<&str> {
        self.domains.get(domain).map(String::as_str)
    }
}
