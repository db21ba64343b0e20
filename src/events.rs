//! Lifecycle events published by the bootstrap components.
//!
//! Observation only: nothing in the crate reacts to these events, they exist
//! so the application shell can watch registration and delivery activity
//! without being in the callback path.

use serde::{Deserialize, Serialize};

use crate::delivery::types::{DeliveryDecision, RegistrationToken};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PushRuntimeEvent {
    BridgeAttached,
    TokenChanged {
        token: RegistrationToken,
    },
    ForegroundDecision {
        title: String,
        decision: DeliveryDecision,
    },
}
