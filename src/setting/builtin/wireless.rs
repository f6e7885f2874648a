use crate::{
    setting::{KnownSetting, Problem, PropertySpec, Setting, SettingKind, VerifyContext},
    value::Value,
};

const MAX_SSID_LEN: usize = 32;
const MAC_ADDRESS_LEN: usize = 6;
const MODES: &[&str] = &["", "infrastructure", "adhoc", "ap"];
const BANDS: &[&str] = &["", "a", "bg"];

/// 802.11 radio parameters.
#[derive(Debug)]
pub struct WirelessSetting {
    properties: Vec<PropertySpec>,
}

impl WirelessSetting {
    /// Error domain of this kind.
    pub const ERROR_DOMAIN: &'static str = "wireless-setting-error";
    /// Network name.
    pub const SSID: &'static str = "ssid";
    /// Operating mode: infrastructure, adhoc or ap.
    pub const MODE: &'static str = "mode";
    /// Frequency band: a or bg.
    pub const BAND: &'static str = "band";
    /// Channel number, meaningful only together with a band.
    pub const CHANNEL: &'static str = "channel";
    /// Hardware address the profile is locked to.
    pub const MAC_ADDRESS: &'static str = "mac-address";
    /// Maximum transmission unit, 0 for automatic.
    pub const MTU: &'static str = "mtu";
    /// Access points this profile has been seen on.
    pub const SEEN_BSSIDS: &'static str = "seen-bssids";
    /// Name of the companion security setting.
    pub const SECURITY: &'static str = "security";

    /// Creates the kind with its schema.
    pub fn new() -> Self {
        Self {
            properties: vec![
                PropertySpec::new(Self::SSID, ""),
                PropertySpec::new(Self::MODE, ""),
                PropertySpec::new(Self::BAND, ""),
                PropertySpec::new(Self::CHANNEL, 0u64),
                PropertySpec::new(Self::MAC_ADDRESS, Vec::<u8>::new()),
                PropertySpec::new(Self::MTU, 0u64),
                PropertySpec::new(Self::SEEN_BSSIDS, Vec::<String>::new()).identity(),
                PropertySpec::new(Self::SECURITY, ""),
            ],
        }
    }
}

impl Default for WirelessSetting {
    fn default() -> Self {
        Self::new()
    }
}

impl KnownSetting for WirelessSetting {
    const NAME: &'static str = "802-11-wireless";
}

impl SettingKind for WirelessSetting {
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

        let ssid = setting.get_str(Self::SSID).unwrap_or_default();
        if ssid.is_empty() {
            problems.push(Problem::fatal(setting, Some(Self::SSID), "property is missing"));
        } else if ssid.len() > MAX_SSID_LEN {
            problems.push(Problem::fatal(
                setting,
                Some(Self::SSID),
                format!("longer than {MAX_SSID_LEN} bytes"),
            ));
        }

        let mode = setting.get_str(Self::MODE).unwrap_or_default();
        if !MODES.contains(&mode) {
            problems.push(Problem::fatal(
                setting,
                Some(Self::MODE),
                format!("unknown mode '{mode}'"),
            ));
        }

        let band = setting.get_str(Self::BAND).unwrap_or_default();
        if !BANDS.contains(&band) {
            problems.push(Problem::fatal(
                setting,
                Some(Self::BAND),
                format!("unknown band '{band}'"),
            ));
        }

        let channel = setting
            .get(Self::CHANNEL)
            .ok()
            .and_then(Value::as_u64)
            .unwrap_or_default();
        if channel != 0 && band.is_empty() {
            problems.push(Problem::warning(
                setting,
                Some(Self::CHANNEL),
                "channel is ignored without a band",
            ));
        }

        let mac = setting
            .get(Self::MAC_ADDRESS)
            .ok()
            .and_then(Value::as_bytes)
            .unwrap_or_default();
        if !mac.is_empty() && mac.len() != MAC_ADDRESS_LEN {
            problems.push(Problem::fatal(
                setting,
                Some(Self::MAC_ADDRESS),
                format!("expected {MAC_ADDRESS_LEN} bytes, got {}", mac.len()),
            ));
        }

        let security = setting.get_str(Self::SECURITY).unwrap_or_default();
        if !security.is_empty() && !context.is_standalone() && !context.contains(security) {
            problems.push(Problem::fatal(
                setting,
                Some(Self::SECURITY),
                format!("security setting '{security}' is not present"),
            ));
        }

        problems
    }
}
