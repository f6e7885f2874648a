use tracing::{debug, warn};

use super::Connection;
use crate::{setting::SecretHint, value::ValueMap};

type SecretsListener = Box<dyn Fn(&str) + Send + Sync>;

/// Handle returned by [`Connection::subscribe_secrets_updated`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Empty secrets of one setting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecretsRequest {
    /// Setting holding the empty secrets.
    pub setting: String,
    /// The empty secret properties.
    pub hints: Vec<SecretHint>,
}

impl SecretsRequest {
    /// Whether any of the hints must be satisfied before the profile is usable.
    pub fn is_required(&self) -> bool {
        self.hints.iter().any(|hint| hint.required)
    }
}

#[derive(Default)]
pub(super) struct SecretsSubscribers {
    next_id: u64,
    listeners: Vec<(SubscriptionId, SecretsListener)>,
}

impl SecretsSubscribers {
    fn subscribe(&mut self, listener: SecretsListener) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, listener));
        id
    }

    fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    fn notify(&self, setting: &str) {
        for (_, listener) in &self.listeners {
            listener(setting);
        }
    }

    pub(super) fn len(&self) -> usize {
        self.listeners.len()
    }
}

impl Connection {
    /// Lists the settings that still have empty secrets, in name order.
    pub fn need_secrets(&self) -> Vec<SecretsRequest> {
        self.settings
            .iter()
            .filter_map(|(name, setting)| {
                let hints = setting.need_secrets();
                (!hints.is_empty()).then(|| SecretsRequest {
                    setting: name.clone(),
                    hints,
                })
            })
            .collect()
    }

    /// Resets every secret of every setting to its default value.
    pub fn clear_secrets(&mut self) {
        for setting in self.settings.values_mut() {
            setting.clear_secrets();
        }
    }

    /// Merges `secrets` into the setting called `setting_name`.
    ///
    /// Non-secret keys are ignored. Returns `false` when the connection has
    /// no such setting; subscribers are notified otherwise.
    pub fn update_secrets(&mut self, setting_name: &str, secrets: &ValueMap) -> bool {
        let Some(setting) = self.settings.get_mut(setting_name) else {
            warn!(setting = setting_name, "secrets for a setting the connection does not have");
            return false;
        };

        let applied = setting.update_secrets(secrets);
        debug!(setting = setting_name, applied, "updated secrets");
        self.secrets_subscribers.notify(setting_name);
        true
    }

    /// Registers `listener` to be called with the setting name after each
    /// successful [`Connection::update_secrets`].
    pub fn subscribe_secrets_updated<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        self.secrets_subscribers.subscribe(Box::new(listener))
    }

    /// Removes a listener. Returns `false` if it was not registered.
    pub fn unsubscribe_secrets_updated(&mut self, id: SubscriptionId) -> bool {
        self.secrets_subscribers.unsubscribe(id)
    }
}
