//! Setting kinds shipped with the crate.
//!
//! These carry just enough of each schema to describe a basic Wi-Fi profile.

mod connection;
mod ip4_config;
mod wireless;
mod wireless_security;

pub use connection::ConnectionSetting;
pub use ip4_config::Ip4ConfigSetting;
pub use wireless::WirelessSetting;
pub use wireless_security::WirelessSecuritySetting;

use std::sync::Arc;

use super::SettingKind;

/// Every built-in kind, ready to register.
pub fn all() -> Vec<Arc<dyn SettingKind>> {
    vec![
        Arc::new(ConnectionSetting::new()),
        Arc::new(WirelessSetting::new()),
        Arc::new(WirelessSecuritySetting::new()),
        Arc::new(Ip4ConfigSetting::new()),
    ]
}
