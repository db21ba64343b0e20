use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use async_trait::async_trait;
use tokio::runtime::Handle;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use super::types::{DeliveryDecision, DeliveryPolicy, IncomingNotification, RegistrationToken};
use crate::events::PushRuntimeEvent;

const EVENT_CHANNEL_CAPACITY: usize = 16;

/// Decides presentation options for a notification delivered while the app
/// is in the foreground. Invoked synchronously by the OS push runtime under
/// its presentation deadline, so implementations must not block or await.
pub trait ForegroundDeliveryHandler: Send + Sync {
    fn on_foreground_notification(&self, notification: &IncomingNotification) -> DeliveryDecision;
}

/// Receives token issuance and rotation events from the push provider.
pub trait PushTokenListener: Send + Sync {
    fn on_token_received(&self, token: RegistrationToken);
}

/// Seam to the OS notification center. `set_delegate` has set semantics:
/// a second call replaces the previous delegate, it never stacks handlers.
pub trait NotificationCenter: Send + Sync {
    fn set_delegate(&self, delegate: Arc<dyn ForegroundDeliveryHandler>);
}

/// Seam to the push provider SDK.
pub trait PushProviderClient: Send + Sync {
    /// Set semantics, like [`NotificationCenter::set_delegate`].
    fn set_token_listener(&self, listener: Arc<dyn PushTokenListener>);

    /// Asks the provider to begin remote registration; token issuance arrives
    /// later through the registered listener.
    fn register_for_remote_notifications(&self);
}

/// Application backend endpoint that tokens are forwarded to.
///
/// Retries and backoff for failed registrations belong to the endpoint
/// implementation; the bridge fires one call per issued token and does not
/// wait for the outcome.
#[async_trait]
pub trait TokenRegistrationEndpoint: Send + Sync {
    async fn register_token(&self, token: &str) -> Result<(), String>;
}

/// Bridges push-provider lifecycle events to OS-level presentation decisions
/// and token bookkeeping.
///
/// One bridge instance is constructed at the composition root and attached
/// exactly once; the host process owns its lifetime, so there is no detach.
pub struct DeliveryPolicyBridge {
    policy: DeliveryPolicy,
    current_token: RwLock<RegistrationToken>,
    endpoint: Arc<dyn TokenRegistrationEndpoint>,
    attached: AtomicBool,
    event_publisher: broadcast::Sender<PushRuntimeEvent>,
    /// Runtime that token forwarding tasks are spawned onto. Captured at
    /// construction because provider callbacks arrive on the provider's own
    /// thread, which carries no runtime context of its own.
    runtime: Option<Handle>,
}

impl DeliveryPolicyBridge {
    /// Construct from within a tokio runtime when possible; the runtime in
    /// scope here is the one token forwarding runs on, no matter which
    /// thread the provider later delivers its callbacks from.
    pub fn new(policy: DeliveryPolicy, endpoint: Arc<dyn TokenRegistrationEndpoint>) -> Self {
        let (event_publisher, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            policy,
            current_token: RwLock::new(RegistrationToken::Absent),
            endpoint,
            attached: AtomicBool::new(false),
            event_publisher,
            runtime: Handle::try_current().ok(),
        }
    }

    /// Registers this bridge as the singular foreground delegate and token
    /// listener, then kicks off remote registration with the provider.
    ///
    /// Both ports replace any previously registered handler, so a re-attach
    /// (activity recreation on some platforms) swaps the registration instead
    /// of stacking a second handler per event.
    pub fn attach(self: Arc<Self>, center: &dyn NotificationCenter, provider: &dyn PushProviderClient) {
        if self.attached.swap(true, Ordering::SeqCst) {
            warn!("Delivery policy bridge attached again; replacing previously registered handlers");
        }
        center.set_delegate(self.clone());
        provider.set_token_listener(self.clone());
        provider.register_for_remote_notifications();
        info!("Delivery policy bridge attached as foreground delegate and token listener");
        self.publish_event(PushRuntimeEvent::BridgeAttached);
    }

    pub fn is_attached(&self) -> bool {
        self.attached.load(Ordering::SeqCst)
    }

    /// The most recently issued token, or `Absent` before the first issuance.
    pub fn current_token(&self) -> RegistrationToken {
        // The cell holds a plain replaceable value, so a poisoned lock is
        // recovered rather than allowed to take the host app down.
        self.current_token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<PushRuntimeEvent> {
        self.event_publisher.subscribe()
    }

    fn publish_event(&self, event: PushRuntimeEvent) {
        // Send only fails when no subscriber is listening, which is fine.
        let _ = self.event_publisher.send(event);
    }
}

impl PushTokenListener for DeliveryPolicyBridge {
    /// Replaces the held token, last writer wins. An `Absent` token is a
    /// valid "no token available yet" event and leaves the held token
    /// untouched. Forwarding to the registration endpoint happens on a
    /// separately spawned task and is never awaited here; the task runs on
    /// the runtime captured at construction (or the calling thread's, if it
    /// has one). Without any runtime the token is still held, only the
    /// forward is skipped.
    fn on_token_received(&self, token: RegistrationToken) {
        let RegistrationToken::Issued(raw) = token else {
            debug!("Push provider reports no registration token yet");
            return;
        };
        let token = RegistrationToken::Issued(raw.clone());
        debug!("Registration token received: {}", token.elided());

        *self
            .current_token
            .write()
            .unwrap_or_else(PoisonError::into_inner) = token.clone();
        self.publish_event(PushRuntimeEvent::TokenChanged { token: token.clone() });

        let Some(runtime) = self.runtime.clone().or_else(|| Handle::try_current().ok()) else {
            warn!("No tokio runtime available; token {} held but not forwarded", token.elided());
            return;
        };
        let endpoint = Arc::clone(&self.endpoint);
        runtime.spawn(async move {
            if let Err(reason) = endpoint.register_token(&raw).await {
                // The endpoint owns retries; the bridge only records the failure.
                warn!("Token forwarding to registration endpoint failed: {}", reason);
            }
        });
    }
}

impl ForegroundDeliveryHandler for DeliveryPolicyBridge {
    fn on_foreground_notification(&self, notification: &IncomingNotification) -> DeliveryDecision {
        let decision = self.policy.decide(notification);
        debug!(
            "Foreground notification '{}' -> alert: {}, badge: {}, sound: {}",
            notification.title, decision.alert, decision.badge, decision.sound
        );
        self.publish_event(PushRuntimeEvent::ForegroundDecision {
            title: notification.title.clone(),
            decision,
        });
        decision
    }
}
