use crate::{
    setting::{KnownSetting, Problem, PropertySpec, Setting, SettingKind, VerifyContext},
    value::Value,
};

const METHODS: &[&str] = &["auto", "manual", "link-local", "shared", "disabled"];
const MAX_PREFIX: u64 = 32;

/// IPv4 addressing.
///
/// `addresses` is a list of maps, each with an `address` string and a
/// `prefix` length.
#[derive(Debug)]
pub struct Ip4ConfigSetting {
    properties: Vec<PropertySpec>,
}

impl Ip4ConfigSetting {
    /// Error domain of this kind.
    pub const ERROR_DOMAIN: &'static str = "ip4-config-setting-error";
    /// Address configuration method.
    pub const METHOD: &'static str = "method";
    /// Static addresses.
    pub const ADDRESSES: &'static str = "addresses";
    /// DNS servers.
    pub const DNS: &'static str = "dns";
    /// Metric of the default route, -1 for the default metric.
    pub const ROUTE_METRIC: &'static str = "route-metric";
    /// Whether the profile may activate without IPv4.
    pub const MAY_FAIL: &'static str = "may-fail";

    /// Creates the kind with its schema.
    pub fn new() -> Self {
        Self {
            properties: vec![
                PropertySpec::new(Self::METHOD, "auto"),
                PropertySpec::new(Self::ADDRESSES, Vec::<Value>::new()),
                PropertySpec::new(Self::DNS, Vec::<String>::new()),
                PropertySpec::new(Self::ROUTE_METRIC, -1i64),
                PropertySpec::new(Self::MAY_FAIL, true),
            ],
        }
    }

    fn address_problem(address: &Value) -> Option<String> {
        let Some(entry) = address.as_map() else {
            return Some(format!("expected a map, got {}", address.kind()));
        };

        if entry.get("address").and_then(Value::as_str).is_none() {
            return Some("entry has no 'address' string".to_string());
        }

        match entry.get("prefix").and_then(Value::as_u64) {
            Some(prefix) if prefix <= MAX_PREFIX => None,
            Some(prefix) => Some(format!("prefix {prefix} exceeds {MAX_PREFIX}")),
            None => Some("entry has no 'prefix' length".to_string()),
        }
    }
}

impl Default for Ip4ConfigSetting {
    fn default() -> Self {
        Self::new()
    }
}

impl KnownSetting for Ip4ConfigSetting {
    const NAME: &'static str = "ipv4";
}

impl SettingKind for Ip4ConfigSetting {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn error_domain(&self) -> &str {
        Self::ERROR_DOMAIN
    }

    fn properties(&self) -> &[PropertySpec] {
        &self.properties
    }

    fn verify(&self, setting: &Setting, _context: &VerifyContext<'_>) -> Vec<Problem> {
        let mut problems = Vec::new();

        let method = setting.get_str(Self::METHOD).unwrap_or_default();
        if !METHODS.contains(&method) {
            problems.push(Problem::fatal(
                setting,
                Some(Self::METHOD),
                format!("unknown method '{method}'"),
            ));
        }

        let addresses = setting
            .get(Self::ADDRESSES)
            .ok()
            .and_then(Value::as_list)
            .unwrap_or_default();
        if method == "manual" && addresses.is_empty() {
            problems.push(Problem::fatal(
                setting,
                Some(Self::ADDRESSES),
                "manual method requires at least one address",
            ));
        }
        for (index, address) in addresses.iter().enumerate() {
            if let Some(message) = Self::address_problem(address) {
                problems.push(Problem::fatal(
                    setting,
                    Some(Self::ADDRESSES),
                    format!("address {index}: {message}"),
                ));
            }
        }

        let dns = setting
            .get(Self::DNS)
            .ok()
            .and_then(Value::as_string_list)
            .unwrap_or_default();
        if method == "disabled" && !dns.is_empty() {
            problems.push(Problem::warning(
                setting,
                Some(Self::DNS),
                "DNS servers are ignored when IPv4 is disabled",
            ));
        }

        problems
    }
}
