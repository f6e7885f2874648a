use super::Connection;
use crate::setting::{
    KnownSetting, Problem, Severity, VerifyContext, builtin::ConnectionSetting,
};

impl Connection {
    /// Collects every problem of every setting plus cross-setting checks.
    ///
    /// Problems of a setting are reported in the setting's own order,
    /// settings in name order, connection-level problems first.
    pub fn verify(&self) -> Vec<Problem> {
        let mut problems = Vec::new();

        if !self.settings.contains_key(ConnectionSetting::NAME) {
            problems.push(Problem {
                severity: Severity::Fatal,
                setting: ConnectionSetting::NAME.to_string(),
                property: None,
                domain: ConnectionSetting::ERROR_DOMAIN.to_string(),
                message: "setting is missing".to_string(),
            });
        }

        let context = VerifyContext::new(self.settings.values());
        for setting in self.settings.values() {
            problems.extend(setting.verify(&context));
        }

        problems
    }

    /// Whether the profile has no fatal problems.
    pub fn is_valid(&self) -> bool {
        !self.verify().iter().any(Problem::is_fatal)
    }
}
