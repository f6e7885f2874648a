use std::collections::BTreeMap;

use tracing::debug;

use super::Connection;
use crate::{
    ProfileError, Result,
    registry::SettingRegistry,
    setting::{SerializeFlags, Setting},
    value::ValueMap,
};

/// Interchange form of a profile: setting name to property map.
pub type SettingsMap = BTreeMap<String, ValueMap>;

impl Connection {
    /// Builds a connection from its generic map.
    ///
    /// # Errors
    /// * `ProfileError::UnknownSettingType` - If a setting name is not registered
    /// * `ProfileError::SchemaViolation` - If a property is not in its setting's schema
    /// * `ProfileError::MalformedValue` - If a value has the wrong kind
    pub fn from_generic_map(map: &SettingsMap, registry: &SettingRegistry) -> Result<Self> {
        let mut connection = Self::new();
        connection.settings = stage_settings(map, registry)?;
        Ok(connection)
    }

    /// Serializes every setting that has at least one non-default property.
    pub fn to_generic_map(&self) -> SettingsMap {
        self.to_generic_map_with(SerializeFlags::ALL)
    }

    /// Like [`Connection::to_generic_map`], honouring `flags`.
    pub fn to_generic_map_with(&self, flags: SerializeFlags) -> SettingsMap {
        self.settings
            .iter()
            .filter_map(|(name, setting)| {
                let properties = setting.to_property_map(flags);
                (!properties.is_empty()).then(|| (name.clone(), properties))
            })
            .collect()
    }

    /// Replaces every setting with the ones described by `map`.
    ///
    /// All settings are constructed before any is committed. On error the
    /// connection is left untouched.
    ///
    /// # Errors
    /// Same as [`Connection::from_generic_map`].
    pub fn replace_all_settings(
        &mut self,
        map: &SettingsMap,
        registry: &SettingRegistry,
    ) -> Result<()> {
        let staged = stage_settings(map, registry)?;
        debug!(settings = staged.len(), "replacing all settings");
        self.settings = staged;
        Ok(())
    }

    /// Exports the generic map as pretty-printed JSON.
    ///
    /// # Errors
    /// * `ProfileError::Serialization` - If the map cannot be encoded or a
    ///   value holds a NaN or infinite float, which JSON cannot represent
    pub fn to_json(&self) -> Result<String> {
        let map = self.to_generic_map();

        for (setting, properties) in &map {
            if let Some((property, _)) = properties.iter().find(|(_, value)| !value.is_finite()) {
                return Err(ProfileError::json(format!(
                    "'{setting}.{property}' holds a non-finite float"
                )));
            }
        }

        serde_json::to_string_pretty(&map).map_err(ProfileError::json)
    }

    /// Builds a connection from JSON produced by [`Connection::to_json`].
    ///
    /// # Errors
    /// * `ProfileError::Serialization` - If the JSON cannot be decoded
    /// * Any error of [`Connection::from_generic_map`]
    pub fn from_json(json: &str, registry: &SettingRegistry) -> Result<Self> {
        let map: SettingsMap = serde_json::from_str(json).map_err(ProfileError::json)?;
        Self::from_generic_map(&map, registry)
    }
}

fn stage_settings(
    map: &SettingsMap,
    registry: &SettingRegistry,
) -> Result<BTreeMap<String, Setting>> {
    let mut staged = BTreeMap::new();

    for (name, properties) in map {
        let mut setting = registry.create(name)?;
        setting.apply_property_map(properties)?;
        staged.insert(name.clone(), setting);
    }

    Ok(staged)
}
