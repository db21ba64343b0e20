// Foreground delivery policy: token bookkeeping and per-notification
// presentation decisions, bridged between the push provider and the OS
// notification center.

pub mod bridge;
pub mod types;

pub use bridge::{
    DeliveryPolicyBridge, ForegroundDeliveryHandler, NotificationCenter, PushProviderClient,
    PushTokenListener, TokenRegistrationEndpoint,
};
pub use types::{DeliveryDecision, DeliveryPolicy, IncomingNotification, RegistrationToken};
