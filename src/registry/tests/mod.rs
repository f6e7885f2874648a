//! Unit tests for the setting registry.

#![allow(clippy::panic)]

use std::sync::Arc;

use crate::{
    ProfileError,
    registry::SettingRegistry,
    setting::{
        PropertySpec, SettingKind,
        builtin::{WirelessSecuritySetting, WirelessSetting},
    },
};

#[derive(Debug)]
struct TeamSetting {
    domain: &'static str,
    properties: Vec<PropertySpec>,
}

impl TeamSetting {
    fn with_domain(domain: &'static str) -> Self {
        Self {
            domain,
            properties: vec![PropertySpec::new("runner", "roundrobin")],
        }
    }
}

impl SettingKind for TeamSetting {
    fn name(&self) -> &str {
        "team"
    }

    fn error_domain(&self) -> &str {
        self.domain
    }

    fn properties(&self) -> &[PropertySpec] {
        &self.properties
    }
}

#[test]
fn builtin_registry_knows_every_kind() {
    let registry = SettingRegistry::with_builtin();
    let names: Vec<_> = registry.names().collect();
    assert_eq!(
        names,
        vec![
            "802-11-wireless",
            "802-11-wireless-security",
            "connection",
            "ipv4"
        ]
    );
}

#[test]
fn create_builds_default_setting() {
    let registry = SettingRegistry::with_builtin();
    let setting = registry.create("802-11-wireless").unwrap();
    assert_eq!(setting.name(), "802-11-wireless");
    assert!(setting.is_default("ssid").unwrap());
}

#[test]
fn create_unknown_fails() {
    let registry = SettingRegistry::with_builtin();
    let result = registry.create_setting("bluetooth");
    assert!(matches!(
        result,
        Err(ProfileError::UnknownSettingType(ref name)) if name == "bluetooth"
    ));
}

#[test]
fn custom_kinds_can_be_registered_and_removed() {
    let mut registry = SettingRegistry::new();
    registry.register(Arc::new(TeamSetting::with_domain("team-error")));

    assert!(registry.contains("team"));
    let setting = registry.create("team").unwrap();
    assert_eq!(setting.get_str("runner"), Some("roundrobin"));
    assert_eq!(registry.lookup_type_by_error_domain("team-error"), Some("team"));

    assert!(registry.unregister("team").is_some());
    assert!(!registry.contains("team"));
    assert!(registry.lookup_type_by_error_domain("team-error").is_none());
    assert!(registry.unregister("team").is_none());
}

#[test]
fn re_registering_replaces_domain_mapping() {
    let mut registry = SettingRegistry::new();
    registry.register(Arc::new(TeamSetting::with_domain("old-domain")));
    registry.register(Arc::new(TeamSetting::with_domain("new-domain")));

    assert!(registry.lookup_type_by_error_domain("old-domain").is_none());
    assert_eq!(registry.lookup_type_by_error_domain("new-domain"), Some("team"));
}

#[test]
fn error_domains_resolve_to_type_names() {
    let registry = SettingRegistry::with_builtin();
    assert_eq!(
        registry.lookup_type_by_error_domain(WirelessSetting::ERROR_DOMAIN),
        Some("802-11-wireless")
    );
    assert_eq!(
        registry.lookup_type_by_error_domain(WirelessSecuritySetting::ERROR_DOMAIN),
        Some("802-11-wireless-security")
    );
    assert!(registry.lookup_type_by_error_domain("unknown").is_none());
}

#[test]
fn shared_domain_survives_unregistering_previous_owner() {
    let mut registry = SettingRegistry::with_builtin();
    registry.register(Arc::new(TeamSetting::with_domain(
        WirelessSetting::ERROR_DOMAIN,
    )));

    assert_eq!(
        registry.lookup_type_by_error_domain(WirelessSetting::ERROR_DOMAIN),
        Some("team")
    );

    assert!(registry.unregister("802-11-wireless").is_some());
    assert_eq!(
        registry.lookup_type_by_error_domain(WirelessSetting::ERROR_DOMAIN),
        Some("team")
    );

    assert!(registry.unregister("team").is_some());
    assert!(
        registry
            .lookup_type_by_error_domain(WirelessSetting::ERROR_DOMAIN)
            .is_none()
    );
}
