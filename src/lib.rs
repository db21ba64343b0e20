//! Push-notification delivery policy bootstrap for the ZuaChat application.
//!
//! This crate owns the policy and registration layer between the OS-level
//! notification service and the push provider, and nothing else. It mounts
//! two components once at process start:
//!
//! - a channel registrar that idempotently ensures the durable notification
//!   channel (importance, sound, vibration) exists on platforms that require
//!   explicit channel registration,
//! - a delivery policy bridge that holds the current push registration token,
//!   forwards each issued token to the application's backend registration
//!   endpoint, and decides per foreground notification whether to alert,
//!   badge and sound.
//!
//! The application shell, the push provider backend, deep-linking and all
//! business logic are external collaborators reached through the port traits
//! in [`channel`] and [`delivery`].

pub mod bootstrap;
pub mod channel;
pub mod delivery;
pub mod events;

pub use bootstrap::{bootstrap, default_channel, PushBootstrap, DEFAULT_CHANNEL_ID};
pub use channel::{
    ChannelImportance, ChannelRegistration, ChannelRegistrationError, ChannelSound,
    DefaultChannelRegistrar, InMemoryChannelHost, NotificationChannel, NotificationChannelHost,
    NotificationChannelRegistrar,
};
pub use delivery::{
    DeliveryDecision, DeliveryPolicy, DeliveryPolicyBridge, ForegroundDeliveryHandler,
    IncomingNotification, NotificationCenter, PushProviderClient, PushTokenListener,
    RegistrationToken, TokenRegistrationEndpoint,
};
pub use events::PushRuntimeEvent;
