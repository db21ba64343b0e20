//! Composition root for the push bootstrap.
//!
//! Runs once at process start: ensure the durable notification channel
//! exists, then attach one [`DeliveryPolicyBridge`] as the process-wide
//! foreground delegate and token listener. There is no global state here;
//! the constructed bridge is handed to the host registration ports
//! explicitly and returned to the caller.

use std::sync::Arc;

use tracing::info;

use crate::channel::errors::ChannelRegistrationError;
use crate::channel::registrar::{DefaultChannelRegistrar, NotificationChannelHost, NotificationChannelRegistrar};
use crate::channel::types::{ChannelImportance, ChannelRegistration, ChannelSound, NotificationChannel};
use crate::delivery::bridge::{DeliveryPolicyBridge, NotificationCenter, PushProviderClient, TokenRegistrationEndpoint};
use crate::delivery::types::DeliveryPolicy;

pub const DEFAULT_CHANNEL_ID: &str = "zuachat_default";
const DEFAULT_CHANNEL_NAME: &str = "ZuaChat Notifications";
const DEFAULT_CHANNEL_DESCRIPTION: &str = "Notifications de ZuaChat";

/// The channel ZuaChat registers on every start. High importance is required
/// for the platforms that gate alerting sound and vibration by importance.
pub fn default_channel() -> NotificationChannel {
    NotificationChannel::new(DEFAULT_CHANNEL_ID, DEFAULT_CHANNEL_NAME, ChannelImportance::High)
        .with_description(DEFAULT_CHANNEL_DESCRIPTION)
        .with_sound(ChannelSound::SystemDefault)
        .with_vibration(true)
}

/// Handles produced by [`bootstrap`].
pub struct PushBootstrap {
    pub bridge: Arc<DeliveryPolicyBridge>,
    /// What the registrar did for the startup channel. `Skipped` means the
    /// host platform predates channel support, which is not a failure.
    pub channel: ChannelRegistration,
}

/// Mounts the push policy components against the host ports.
///
/// Call exactly once at startup, from within a tokio runtime (token
/// forwarding spawns onto it). The only error surface is a malformed channel
/// configuration; every runtime failure mode past this point degrades to
/// "no notification enhancement" instead of reaching the caller.
pub fn bootstrap(
    channel: &NotificationChannel,
    policy: DeliveryPolicy,
    host: Arc<dyn NotificationChannelHost>,
    center: &dyn NotificationCenter,
    provider: &dyn PushProviderClient,
    endpoint: Arc<dyn TokenRegistrationEndpoint>,
) -> Result<PushBootstrap, ChannelRegistrationError> {
    let registrar = DefaultChannelRegistrar::new(host);
    let outcome = registrar.ensure(channel)?;

    let bridge = Arc::new(DeliveryPolicyBridge::new(policy, endpoint));
    bridge.clone().attach(center, provider);

    info!("Push bootstrap complete (channel '{}': {:?})", channel.channel_id, outcome);
    Ok(PushBootstrap { bridge, channel: outcome })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;

    use async_trait::async_trait;

    use crate::channel::registrar::InMemoryChannelHost;
    use crate::delivery::bridge::{ForegroundDeliveryHandler, PushTokenListener};
    use crate::delivery::types::{DeliveryDecision, IncomingNotification, RegistrationToken};

    #[derive(Default)]
    struct FakeCenter {
        delegate: Mutex<Option<Arc<dyn ForegroundDeliveryHandler>>>,
    }

    impl NotificationCenter for FakeCenter {
        fn set_delegate(&self, delegate: Arc<dyn ForegroundDeliveryHandler>) {
            *self.delegate.lock().unwrap() = Some(delegate);
        }
    }

    #[derive(Default)]
    struct FakeProvider {
        listener: Mutex<Option<Arc<dyn PushTokenListener>>>,
        remote_registrations: AtomicUsize,
    }

    impl FakeProvider {
        /// Drives the provider side of the contract: issue a token to
        /// whichever listener is currently registered.
        fn issue_token(&self, token: RegistrationToken) {
            let listener = self.listener.lock().unwrap().clone().expect("no listener registered");
            listener.on_token_received(token);
        }
    }

    impl PushProviderClient for FakeProvider {
        fn set_token_listener(&self, listener: Arc<dyn PushTokenListener>) {
            *self.listener.lock().unwrap() = Some(listener);
        }
        fn register_for_remote_notifications(&self) {
            self.remote_registrations.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[derive(Default)]
    struct FakeEndpoint {
        tokens: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl TokenRegistrationEndpoint for FakeEndpoint {
        async fn register_token(&self, token: &str) -> Result<(), String> {
            self.tokens.lock().unwrap().push(token.to_string());
            Ok(())
        }
    }

    #[tokio::test]
    async fn bootstrap_wires_channel_and_bridge() {
        let host = Arc::new(InMemoryChannelHost::new());
        let center = FakeCenter::default();
        let provider = FakeProvider::default();
        let endpoint = Arc::new(FakeEndpoint::default());

        let handles = bootstrap(
            &default_channel(),
            DeliveryPolicy::default(),
            host.clone(),
            &center,
            &provider,
            endpoint.clone(),
        )
        .unwrap();

        assert_eq!(handles.channel, ChannelRegistration::Registered);
        let registered = host.channel(DEFAULT_CHANNEL_ID).unwrap();
        assert_eq!(registered.importance, ChannelImportance::High);
        assert!(registered.vibration_enabled);

        assert!(handles.bridge.is_attached());
        assert!(center.delegate.lock().unwrap().is_some());
        assert_eq!(provider.remote_registrations.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn second_start_reuses_existing_channel() {
        let host = Arc::new(InMemoryChannelHost::new());

        let first = bootstrap(
            &default_channel(),
            DeliveryPolicy::default(),
            host.clone(),
            &FakeCenter::default(),
            &FakeProvider::default(),
            Arc::new(FakeEndpoint::default()),
        )
        .unwrap();
        assert_eq!(first.channel, ChannelRegistration::Registered);

        // Process restart: same channel id, registration must be a no-op.
        let second = bootstrap(
            &default_channel(),
            DeliveryPolicy::default(),
            host.clone(),
            &FakeCenter::default(),
            &FakeProvider::default(),
            Arc::new(FakeEndpoint::default()),
        )
        .unwrap();
        assert_eq!(second.channel, ChannelRegistration::Unchanged);
    }

    #[tokio::test]
    async fn provider_token_flows_through_attached_bridge() {
        let host = Arc::new(InMemoryChannelHost::new());
        let center = FakeCenter::default();
        let provider = FakeProvider::default();
        let endpoint = Arc::new(FakeEndpoint::default());

        let handles = bootstrap(
            &default_channel(),
            DeliveryPolicy::default(),
            host,
            &center,
            &provider,
            endpoint.clone(),
        )
        .unwrap();

        provider.issue_token(RegistrationToken::issued("abc123"));
        provider.issue_token(RegistrationToken::issued("xyz789"));

        assert_eq!(handles.bridge.current_token(), RegistrationToken::issued("xyz789"));
        for _ in 0..200 {
            if endpoint.tokens.lock().unwrap().len() >= 2 {
                break;
            }
            tokio::time::sleep(Duration::from_millis(2)).await;
        }
        assert_eq!(*endpoint.tokens.lock().unwrap(), vec!["abc123".to_string(), "xyz789".to_string()]);
    }

    #[tokio::test]
    async fn delegate_decides_foreground_presentation() {
        let center = FakeCenter::default();
        let provider = FakeProvider::default();

        bootstrap(
            &default_channel(),
            DeliveryPolicy::default(),
            Arc::new(InMemoryChannelHost::new()),
            &center,
            &provider,
            Arc::new(FakeEndpoint::default()),
        )
        .unwrap();

        let delegate = center.delegate.lock().unwrap().clone().unwrap();
        let decision = delegate.on_foreground_notification(
            &IncomingNotification::new("Hello").with_body("World"),
        );
        assert_eq!(decision, DeliveryDecision { alert: true, badge: true, sound: true });
    }
}
