use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use tracing::{debug, info, warn};

use super::errors::ChannelRegistrationError;
use super::types::{ChannelRegistration, NotificationChannel};

/// Seam to the OS notification service.
///
/// Implementations adapt whatever the platform exposes for channel
/// management. Platforms that predate channels report `false` from
/// [`supports_channels`](Self::supports_channels) and never see a create call.
pub trait NotificationChannelHost: Send + Sync {
    fn supports_channels(&self) -> bool;

    /// The channel currently registered under `channel_id`, if any.
    fn channel(&self, channel_id: &str) -> Option<NotificationChannel>;

    fn create_channel(&self, channel: &NotificationChannel) -> Result<(), String>;
}

/// Guarantees a notification channel exists before the first notification
/// could plausibly be delivered.
pub trait NotificationChannelRegistrar: Send + Sync {
    /// Idempotently registers `channel` with the host.
    ///
    /// Safe to call on every process start. If the host already has a channel
    /// with this id, the call reports [`ChannelRegistration::Unchanged`] and
    /// the existing channel keeps its original properties; channel properties
    /// are immutable post-creation on the platforms that require channels,
    /// and this registrar does not attempt to delete-and-recreate. A host
    /// without channel support yields [`ChannelRegistration::Skipped`], which
    /// is a capability outcome, not an error.
    fn ensure(&self, channel: &NotificationChannel) -> Result<ChannelRegistration, ChannelRegistrationError>;
}

pub struct DefaultChannelRegistrar {
    host: Arc<dyn NotificationChannelHost>,
}

impl DefaultChannelRegistrar {
    pub fn new(host: Arc<dyn NotificationChannelHost>) -> Self {
        Self { host }
    }
}

impl NotificationChannelRegistrar for DefaultChannelRegistrar {
    fn ensure(&self, channel: &NotificationChannel) -> Result<ChannelRegistration, ChannelRegistrationError> {
        if channel.channel_id.is_empty() {
            return Err(ChannelRegistrationError::InvalidChannelConfig {
                field: "channel_id".to_string(),
                reason: "must not be empty".to_string(),
            });
        }

        if !self.host.supports_channels() {
            debug!("Host platform has no channel support, skipping registration of '{}'", channel.channel_id);
            return Ok(ChannelRegistration::Skipped);
        }

        if let Some(existing) = self.host.channel(&channel.channel_id) {
            if existing != *channel {
                warn!(
                    "Channel '{}' already registered with different properties; host channels are immutable, keeping the existing ones",
                    channel.channel_id
                );
            }
            return Ok(ChannelRegistration::Unchanged);
        }

        self.host
            .create_channel(channel)
            .map_err(|reason| ChannelRegistrationError::Host {
                channel_id: channel.channel_id.clone(),
                reason,
            })?;
        info!(
            "Registered notification channel '{}' (importance: {:?})",
            channel.channel_id, channel.importance
        );
        Ok(ChannelRegistration::Registered)
    }
}

/// Host backed by process memory. Mirrors the create-once semantics of the
/// real platforms: a second create for an existing id leaves the stored
/// channel untouched.
#[derive(Default)]
pub struct InMemoryChannelHost {
    channels: RwLock<HashMap<String, NotificationChannel>>,
}

impl InMemoryChannelHost {
    pub fn new() -> Self {
        Self::default()
    }
}

impl NotificationChannelHost for InMemoryChannelHost {
    fn supports_channels(&self) -> bool {
        true
    }

    fn channel(&self, channel_id: &str) -> Option<NotificationChannel> {
        // Registration is a non-critical enhancement; a poisoned map is
        // recovered rather than allowed to panic into the host app.
        self.channels
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(channel_id)
            .cloned()
    }

    fn create_channel(&self, channel: &NotificationChannel) -> Result<(), String> {
        let mut channels = self.channels.write().unwrap_or_else(PoisonError::into_inner);
        channels
            .entry(channel.channel_id.clone())
            .or_insert_with(|| channel.clone());
        Ok(())
    }
}
