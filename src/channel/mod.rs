// Channel registration: make sure a channel with the required sound and
// vibration policy exists before the first notification can be shown.

pub mod errors;
pub mod registrar;
pub mod types;

pub use errors::ChannelRegistrationError;
pub use registrar::{
    DefaultChannelRegistrar, InMemoryChannelHost, NotificationChannelHost, NotificationChannelRegistrar,
};
pub use types::{ChannelImportance, ChannelRegistration, ChannelSound, NotificationChannel};
