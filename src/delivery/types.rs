use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Device registration token issued by the push provider.
///
/// The provider may legitimately report that no token exists yet, so the
/// absent case is part of the type rather than a nullable string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum RegistrationToken {
    #[default]
    Absent,
    Issued(String),
}

impl RegistrationToken {
    pub fn issued(token: impl Into<String>) -> Self {
        RegistrationToken::Issued(token.into())
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, RegistrationToken::Absent)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            RegistrationToken::Issued(token) => Some(token.as_str()),
            RegistrationToken::Absent => None,
        }
    }

    /// Short prefix for logging. Tokens are per-install credentials and are
    /// never written out in full: at most half the token is kept, capped at
    /// eight characters.
    pub fn elided(&self) -> String {
        match self {
            RegistrationToken::Issued(token) => {
                let keep = (token.chars().count() / 2).min(8);
                let prefix: String = token.chars().take(keep).collect();
                format!("{}…", prefix)
            }
            RegistrationToken::Absent => "<absent>".to_string(),
        }
    }
}

/// Notification delivered by the OS push runtime while the app is active.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomingNotification {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub payload: HashMap<String, serde_json::Value>,
}

impl IncomingNotification {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: None,
            category: None,
            payload: HashMap::new(),
        }
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }
}

/// Presentation options for one foreground delivery. Ephemeral, computed
/// fresh per event, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeliveryDecision {
    pub alert: bool,
    pub badge: bool,
    pub sound: bool,
}

impl DeliveryDecision {
    pub fn allow_all() -> Self {
        Self { alert: true, badge: true, sound: true }
    }

    pub fn suppress_all() -> Self {
        Self { alert: false, badge: false, sound: false }
    }
}

impl Default for DeliveryDecision {
    fn default() -> Self {
        Self::allow_all()
    }
}

/// Static foreground presentation policy.
///
/// The baseline decision applies to every notification; per-category
/// overrides are the extension point for later suppression rules. The ZuaChat
/// baseline ships with no overrides, so every foreground delivery alerts,
/// badges and sounds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct DeliveryPolicy {
    #[serde(default)]
    pub baseline: DeliveryDecision,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub category_overrides: HashMap<String, DeliveryDecision>,
}

impl DeliveryPolicy {
    /// Classifies a notification. Pure and instantaneous: no locks, no I/O,
    /// no suspension point, because the host enforces a presentation
    /// deadline on the calling callback.
    pub fn decide(&self, notification: &IncomingNotification) -> DeliveryDecision {
        notification
            .category
            .as_deref()
            .and_then(|category| self.category_overrides.get(category).copied())
            .unwrap_or(self.baseline)
    }
}
