use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ChannelImportance {
    Low,
    #[default]
    Default,
    High,
}

/// Sound attached to a channel. Most installs keep the system default; a
/// custom URI is resolved by the host platform, not by this crate.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ChannelSound {
    #[default]
    SystemDefault,
    Custom(String),
}

/// Declarative description of an OS notification channel.
///
/// Channels are created once and live for the OS installation's lifetime.
/// On platforms that require channels, the properties are immutable after
/// creation: re-registering the same `channel_id` with different fields is a
/// platform-level no-op, which [`ensure`](super::NotificationChannelRegistrar::ensure)
/// deliberately does not try to work around.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationChannel {
    pub channel_id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub importance: ChannelImportance,
    #[serde(default)]
    pub sound: ChannelSound,
    #[serde(default)]
    pub vibration_enabled: bool,
}

impl NotificationChannel {
    pub fn new(channel_id: impl Into<String>, name: impl Into<String>, importance: ChannelImportance) -> Self {
        Self {
            channel_id: channel_id.into(),
            name: name.into(),
            description: None,
            importance,
            sound: ChannelSound::SystemDefault,
            vibration_enabled: false,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_sound(mut self, sound: ChannelSound) -> Self {
        self.sound = sound;
        self
    }

    pub fn with_vibration(mut self, enabled: bool) -> Self {
        self.vibration_enabled = enabled;
        self
    }
}

/// What `ensure` actually did against the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChannelRegistration {
    /// The channel did not exist and was created.
    Registered,
    /// A channel with this id already exists; the host keeps its original
    /// properties even if the requested ones differ.
    Unchanged,
    /// The host platform predates channel support; registration was skipped.
    Skipped,
}
