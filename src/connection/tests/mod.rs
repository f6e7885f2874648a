//! Unit tests for the connection aggregate.

#![allow(clippy::panic)]

use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};

use crate::{
    ProfileError,
    connection::{Connection, ConnectionScope, SettingsMap},
    registry::SettingRegistry,
    setting::{
        CompareFlags, SerializeFlags, Setting, Severity,
        builtin::{ConnectionSetting, Ip4ConfigSetting, WirelessSecuritySetting, WirelessSetting},
    },
    value::{Comparator, Value, ValueMap},
};

const UUID: &str = "0d3e5c1a-8b1f-4c2a-9e7d-3a4b5c6d7e8f";

fn props(entries: &[(&str, Value)]) -> ValueMap {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

fn setting(registry: &SettingRegistry, name: &str, entries: &[(&str, Value)]) -> Setting {
    let mut setting = registry.create(name).unwrap();
    setting.apply_property_map(&props(entries)).unwrap();
    setting
}

fn secured_wifi(registry: &SettingRegistry) -> Connection {
    let mut connection = Connection::new();
    connection.add_setting(setting(
        registry,
        "connection",
        &[
            ("id", Value::from("home")),
            ("uuid", Value::from(UUID)),
            ("type", Value::from("802-11-wireless")),
        ],
    ));
    connection.add_setting(setting(
        registry,
        "802-11-wireless",
        &[
            ("ssid", Value::from("MyNet")),
            ("mode", Value::from("infrastructure")),
            ("security", Value::from("802-11-wireless-security")),
        ],
    ));
    connection.add_setting(setting(
        registry,
        "802-11-wireless-security",
        &[("key-mgmt", Value::from("wpa-psk"))],
    ));
    connection
}

#[test]
fn new_connection_is_empty_with_unknown_scope() {
    let connection = Connection::new();
    assert!(connection.is_empty());
    assert_eq!(connection.scope(), ConnectionScope::Unknown);
    assert_eq!(connection.path(), None);
}

#[test]
fn scope_and_path_accessors() {
    let mut connection = Connection::new();
    connection.set_scope(ConnectionScope::System);
    connection.set_path(Some("/profiles/1".to_string()));

    assert_eq!(connection.scope(), ConnectionScope::System);
    assert_eq!(connection.path(), Some("/profiles/1"));
    assert_eq!(connection.scope().to_string(), "system");
}

#[test]
fn add_setting_replaces_without_merging() {
    let registry = SettingRegistry::with_builtin();
    let mut connection = Connection::new();
    connection.add_setting(setting(
        &registry,
        "802-11-wireless",
        &[("ssid", Value::from("MyNet")), ("mtu", Value::Unsigned(1400))],
    ));
    connection.add_setting(setting(
        &registry,
        "802-11-wireless",
        &[("ssid", Value::from("OtherNet"))],
    ));

    let wireless = connection.get_setting("802-11-wireless").unwrap();
    assert_eq!(wireless.get_str("ssid"), Some("OtherNet"));
    assert!(wireless.is_default("mtu").unwrap());
    assert_eq!(connection.setting_names().count(), 1);
}

#[test]
fn remove_and_typed_lookup() {
    let registry = SettingRegistry::with_builtin();
    let mut connection = secured_wifi(&registry);

    assert!(
        connection
            .get_setting_by_type::<WirelessSetting>()
            .is_some()
    );
    assert!(
        connection
            .get_setting_by_type::<Ip4ConfigSetting>()
            .is_none()
    );

    let removed = connection.remove_setting("802-11-wireless-security").unwrap();
    assert_eq!(removed.get_str("key-mgmt"), Some("wpa-psk"));
    assert!(
        connection
            .get_setting_by_type::<WirelessSecuritySetting>()
            .is_none()
    );
    assert!(connection.remove_setting("802-11-wireless-security").is_none());
}

#[test]
fn compare_requires_same_setting_names() {
    let registry = SettingRegistry::with_builtin();
    let a = secured_wifi(&registry);
    let mut b = a.duplicate();
    assert!(a.compare(&b, CompareFlags::EXACT));

    b.add_setting(registry.create("ipv4").unwrap());
    assert!(!a.compare(&b, CompareFlags::EXACT));
    assert!(!b.compare(&a, CompareFlags::EXACT));
}

#[test]
fn compare_ignores_scope_and_path() {
    let registry = SettingRegistry::with_builtin();
    let a = secured_wifi(&registry);
    let mut b = a.duplicate();
    b.set_scope(ConnectionScope::User);
    b.set_path(Some("/profiles/7".to_string()));
    assert!(a.compare(&b, CompareFlags::EXACT));
}

#[test]
fn compare_flags_propagate_to_settings() {
    let registry = SettingRegistry::with_builtin();
    let a = secured_wifi(&registry);
    let mut b = a.duplicate();
    b.update_secrets("802-11-wireless-security", &props(&[("psk", Value::from("hunter22"))]));
    b.get_setting_mut("connection")
        .unwrap()
        .set("timestamp", 1_700_000_000u64)
        .unwrap();

    assert!(!a.compare(&b, CompareFlags::EXACT));
    assert!(!a.compare(&b, CompareFlags::IGNORE_SECRETS));
    assert!(a.compare(&b, CompareFlags::FUZZY));
}

#[test]
fn diff_reports_per_setting_properties() {
    let registry = SettingRegistry::with_builtin();
    let a = secured_wifi(&registry);
    let mut b = a.duplicate();
    b.get_setting_by_type_mut::<WirelessSetting>()
        .unwrap()
        .set("ssid", "OtherNet")
        .unwrap();
    b.remove_setting("802-11-wireless-security");
    b.add_setting(registry.create("ipv4").unwrap());

    let diff = a.diff(&b, CompareFlags::EXACT);
    assert_eq!(diff.len(), 3);
    assert_eq!(diff["802-11-wireless"], vec!["ssid"]);
    assert_eq!(diff["802-11-wireless-security"].len(), 4);
    assert_eq!(diff["ipv4"].len(), 5);
    assert!(!diff.contains_key("connection"));
}

#[test]
fn generic_map_keeps_all_default_settings() {
    let registry = SettingRegistry::with_builtin();
    let mut connection = secured_wifi(&registry);
    connection.add_setting(registry.create("ipv4").unwrap());

    let map = connection.to_generic_map();
    assert_eq!(map.len(), 4);
    assert_eq!(map["ipv4"].get("method"), Some(&Value::from("auto")));

    let restored = Connection::from_generic_map(&map, &registry).unwrap();
    assert!(restored.compare(&connection, CompareFlags::STRICT_NUMERIC));
}

#[test]
fn generic_map_can_strip_secrets() {
    let registry = SettingRegistry::with_builtin();
    let mut connection = secured_wifi(&registry);
    connection.update_secrets(
        "802-11-wireless-security",
        &props(&[("psk", Value::from("hunter22"))]),
    );

    let full = connection.to_generic_map();
    let stripped = connection.to_generic_map_with(SerializeFlags::NO_SECRETS);
    assert!(full["802-11-wireless-security"].contains_key("psk"));
    assert!(!stripped["802-11-wireless-security"].contains_key("psk"));
}

#[test]
fn from_generic_map_rejects_unknown_setting() {
    let registry = SettingRegistry::with_builtin();
    let mut map = SettingsMap::new();
    map.insert("bluetooth".to_string(), props(&[("bdaddr", Value::from("x"))]));

    let result = Connection::from_generic_map(&map, &registry);
    assert!(matches!(
        result,
        Err(ProfileError::UnknownSettingType(ref name)) if name == "bluetooth"
    ));
}

#[test]
fn from_generic_map_rejects_malformed_values() {
    let registry = SettingRegistry::with_builtin();
    let mut map = SettingsMap::new();
    map.insert("802-11-wireless".to_string(), props(&[("mtu", Value::Integer(1500))]));

    assert!(matches!(
        Connection::from_generic_map(&map, &registry),
        Err(ProfileError::MalformedValue { .. })
    ));
}

#[test]
fn replace_all_settings_commits_everything() {
    let registry = SettingRegistry::with_builtin();
    let mut connection = secured_wifi(&registry);
    connection.set_path(Some("/profiles/3".to_string()));

    let mut map = SettingsMap::new();
    map.insert("ipv4".to_string(), props(&[("method", Value::from("disabled"))]));
    connection.replace_all_settings(&map, &registry).unwrap();

    let names: Vec<_> = connection.setting_names().collect();
    assert_eq!(names, vec!["ipv4"]);
    assert_eq!(connection.path(), Some("/profiles/3"));
}

#[test]
fn replace_all_settings_is_atomic() {
    let registry = SettingRegistry::with_builtin();
    let mut connection = secured_wifi(&registry);
    let before = connection.to_generic_map();

    let mut map = SettingsMap::new();
    map.insert(
        "802-11-wireless".to_string(),
        props(&[("ssid", Value::from("Changed"))]),
    );
    map.insert(
        "connection".to_string(),
        props(&[("no-such-property", Value::Bool(true))]),
    );

    let result = connection.replace_all_settings(&map, &registry);
    assert!(matches!(result, Err(ProfileError::SchemaViolation { .. })));
    assert_eq!(connection.to_generic_map(), before);
}

#[test]
fn verify_requires_connection_setting() {
    let registry = SettingRegistry::with_builtin();
    let mut connection = Connection::new();
    connection.add_setting(setting(&registry, "ipv4", &[]));

    let problems = connection.verify();
    assert_eq!(problems.len(), 1);
    assert_eq!(problems[0].setting, "connection");
    assert!(problems[0].is_fatal());
    assert!(!connection.is_valid());
}

#[test]
fn verify_checks_base_type_and_companions() {
    let registry = SettingRegistry::with_builtin();
    let mut connection = secured_wifi(&registry);
    assert!(connection.verify().is_empty());
    assert!(connection.is_valid());

    connection.remove_setting("802-11-wireless-security");
    connection.remove_setting("802-11-wireless");
    connection.add_setting(setting(
        &registry,
        "802-11-wireless",
        &[
            ("ssid", Value::from("MyNet")),
            ("security", Value::from("802-11-wireless-security")),
        ],
    ));
    let problems = connection.verify();
    assert_eq!(problems.len(), 1);
    assert_eq!(problems[0].property.as_deref(), Some("security"));

    connection.remove_setting("802-11-wireless");
    let problems = connection.verify();
    assert_eq!(problems.len(), 1);
    assert_eq!(problems[0].property.as_deref(), Some("type"));
}

#[test]
fn warnings_do_not_invalidate() {
    let registry = SettingRegistry::with_builtin();
    let mut connection = secured_wifi(&registry);
    connection.add_setting(setting(
        &registry,
        "ipv4",
        &[
            ("method", Value::from("disabled")),
            ("dns", Value::StringList(vec!["1.1.1.1".to_string()])),
        ],
    ));

    let problems = connection.verify();
    assert_eq!(problems.len(), 1);
    assert_eq!(problems[0].severity, Severity::Warning);
    assert!(connection.is_valid());
}

#[test]
fn problem_domains_resolve_through_registry() {
    let registry = SettingRegistry::with_builtin();
    let mut connection = secured_wifi(&registry);
    connection
        .get_setting_by_type_mut::<ConnectionSetting>()
        .unwrap()
        .set("uuid", "bogus")
        .unwrap();

    let problems = connection.verify();
    assert_eq!(problems.len(), 1);
    assert_eq!(
        registry.lookup_type_by_error_domain(&problems[0].domain),
        Some("connection")
    );
}

#[test]
fn need_secrets_aggregates_settings() {
    let registry = SettingRegistry::with_builtin();
    let mut connection = secured_wifi(&registry);

    let requests = connection.need_secrets();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].setting, "802-11-wireless-security");
    assert!(requests[0].is_required());

    connection.update_secrets(
        "802-11-wireless-security",
        &props(&[("psk", Value::from("hunter22"))]),
    );
    assert!(connection.need_secrets().iter().all(|r| !r.is_required()));

    connection.clear_secrets();
    assert!(connection.need_secrets()[0].is_required());
}

#[test]
fn update_secrets_notifies_subscribers() {
    let registry = SettingRegistry::with_builtin();
    let mut connection = secured_wifi(&registry);
    let seen = Arc::new(Mutex::new(Vec::new()));
    let calls = Arc::new(AtomicUsize::new(0));

    let seen_by_listener = Arc::clone(&seen);
    connection.subscribe_secrets_updated(move |setting| {
        if let Ok(mut seen) = seen_by_listener.lock() {
            seen.push(setting.to_string());
        }
    });
    let counter = Arc::clone(&calls);
    let id = connection.subscribe_secrets_updated(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    let psk = props(&[("psk", Value::from("hunter22"))]);
    assert!(connection.update_secrets("802-11-wireless-security", &psk));
    assert!(!connection.update_secrets("vpn", &psk));
    assert!(connection.unsubscribe_secrets_updated(id));
    assert!(!connection.unsubscribe_secrets_updated(id));
    assert!(connection.update_secrets("802-11-wireless-security", &psk));

    assert_eq!(
        *seen.lock().unwrap(),
        vec!["802-11-wireless-security", "802-11-wireless-security"]
    );
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn duplicate_drops_subscribers() {
    let registry = SettingRegistry::with_builtin();
    let mut connection = secured_wifi(&registry);
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    connection.subscribe_secrets_updated(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    let mut copy = connection.duplicate();
    copy.update_secrets(
        "802-11-wireless-security",
        &props(&[("psk", Value::from("hunter22"))]),
    );

    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert!(!connection.compare(&copy, CompareFlags::EXACT));
}

#[test]
fn property_traversal_is_ordered_and_restartable() {
    let registry = SettingRegistry::with_builtin();
    let connection = secured_wifi(&registry);

    let first: Vec<_> = connection
        .properties()
        .map(|(setting, property, _)| format!("{setting}.{property}"))
        .collect();
    let second: Vec<_> = connection
        .properties()
        .map(|(setting, property, _)| format!("{setting}.{property}"))
        .collect();

    assert_eq!(first, second);
    assert_eq!(first[0], "802-11-wireless.ssid");
    assert_eq!(first.last().map(String::as_str), Some("connection.read-only"));
    assert_eq!(first.len(), 8 + 4 + 6);

    let mut ssid = None;
    connection.for_each_property(|setting, property, value| {
        if setting == "802-11-wireless" && property == "ssid" {
            ssid = value.as_str().map(str::to_string);
        }
    });
    assert_eq!(ssid.as_deref(), Some("MyNet"));
}

#[test]
fn json_export_round_trips() {
    let registry = SettingRegistry::with_builtin();
    let connection = secured_wifi(&registry);

    let json = connection.to_json().unwrap();
    let parsed = Connection::from_json(&json, &registry).unwrap();
    assert!(parsed.compare(&connection, CompareFlags::STRICT_NUMERIC));

    assert!(matches!(
        Connection::from_json("{not json", &registry),
        Err(ProfileError::Serialization { .. })
    ));
}

fn weighted_address(weight: f64) -> Value {
    let mut address = ValueMap::new();
    address.insert("address".to_string(), Value::from("192.0.2.10"));
    address.insert("weight".to_string(), Value::Float(weight));
    Value::List(vec![Value::Map(address)])
}

#[test]
fn diff_honours_explicit_comparator() {
    let registry = SettingRegistry::with_builtin();
    let mut a = secured_wifi(&registry);
    let mut b = a.duplicate();
    a.add_setting(setting(&registry, "ipv4", &[("addresses", weighted_address(1.0))]));
    b.add_setting(setting(&registry, "ipv4", &[("addresses", weighted_address(1.0005))]));

    let loose = Comparator::new(0.01);
    assert!(a.compare_using(&b, CompareFlags::EXACT, &loose));
    assert!(a.diff_using(&b, CompareFlags::EXACT, &loose).is_empty());

    assert!(!a.compare(&b, CompareFlags::EXACT));
    assert_eq!(a.diff(&b, CompareFlags::EXACT)["ipv4"], vec!["addresses"]);
}

#[test]
fn json_export_rejects_non_finite_floats() {
    let registry = SettingRegistry::with_builtin();
    let mut connection = secured_wifi(&registry);

    connection.add_setting(setting(&registry, "ipv4", &[("addresses", weighted_address(f64::NAN))]));

    let result = connection.to_json();
    assert!(matches!(
        result,
        Err(ProfileError::Serialization { ref details, .. }) if details.contains("ipv4.addresses")
    ));
}

#[test]
fn display_lists_every_setting() {
    let registry = SettingRegistry::with_builtin();
    let mut connection = secured_wifi(&registry);
    connection.set_scope(ConnectionScope::User);

    let rendered = connection.to_string();
    assert!(rendered.starts_with("Connection (scope: user, path: -)"));
    assert!(rendered.contains("[802-11-wireless]"));
    assert!(rendered.contains("ssid : 'MyNet'"));
    connection.dump();
}
