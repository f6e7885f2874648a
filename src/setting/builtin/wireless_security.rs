use crate::setting::{KnownSetting, Problem, PropertySpec, Setting, SettingKind, VerifyContext};

const KEY_MANAGEMENT: &[&str] = &["none", "ieee8021x", "wpa-none", "wpa-psk", "wpa-eap"];
const MIN_PSK_LEN: usize = 8;

/// 802.11 authentication and its secrets.
#[derive(Debug)]
pub struct WirelessSecuritySetting {
    properties: Vec<PropertySpec>,
}

impl WirelessSecuritySetting {
    /// Error domain of this kind.
    pub const ERROR_DOMAIN: &'static str = "wireless-security-setting-error";
    /// Key management scheme.
    pub const KEY_MGMT: &'static str = "key-mgmt";
    /// WPA pre-shared key.
    pub const PSK: &'static str = "psk";
    /// First static WEP key.
    pub const WEP_KEY0: &'static str = "wep-key0";
    /// LEAP password.
    pub const LEAP_PASSWORD: &'static str = "leap-password";

    /// Creates the kind with its schema.
    pub fn new() -> Self {
        Self {
            properties: vec![
                PropertySpec::new(Self::KEY_MGMT, ""),
                PropertySpec::new(Self::PSK, "").secret(),
                PropertySpec::new(Self::WEP_KEY0, "").secret(),
                PropertySpec::new(Self::LEAP_PASSWORD, "").secret(),
            ],
        }
    }
}

impl Default for WirelessSecuritySetting {
    fn default() -> Self {
        Self::new()
    }
}

impl KnownSetting for WirelessSecuritySetting {
    const NAME: &'static str = "802-11-wireless-security";
}

impl SettingKind for WirelessSecuritySetting {
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

        let key_mgmt = setting.get_str(Self::KEY_MGMT).unwrap_or_default();
        if key_mgmt.is_empty() {
            problems.push(Problem::fatal(setting, Some(Self::KEY_MGMT), "property is missing"));
        } else if !KEY_MANAGEMENT.contains(&key_mgmt) {
            problems.push(Problem::fatal(
                setting,
                Some(Self::KEY_MGMT),
                format!("unknown key management '{key_mgmt}'"),
            ));
        }

        let psk = setting.get_str(Self::PSK).unwrap_or_default();
        if !psk.is_empty() && psk.len() < MIN_PSK_LEN {
            problems.push(Problem::warning(
                setting,
                Some(Self::PSK),
                format!("shorter than {MIN_PSK_LEN} characters"),
            ));
        }

        problems
    }

    fn secret_required(&self, setting: &Setting, property: &str) -> bool {
        let key_mgmt = setting.get_str(Self::KEY_MGMT).unwrap_or_default();
        match property {
            Self::PSK => key_mgmt == "wpa-psk",
            Self::WEP_KEY0 => key_mgmt == "none",
            _ => false,
        }
    }
}
