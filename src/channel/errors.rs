use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChannelRegistrationError {
    #[error("Invalid channel configuration for field '{field}': {reason}")]
    InvalidChannelConfig { field: String, reason: String },

    #[error("Notification host rejected channel '{channel_id}': {reason}")]
    Host { channel_id: String, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages_display() {
        assert_eq!(
            format!(
                "{}",
                ChannelRegistrationError::InvalidChannelConfig {
                    field: "channel_id".to_string(),
                    reason: "must not be empty".to_string(),
                }
            ),
            "Invalid channel configuration for field 'channel_id': must not be empty"
        );
        assert_eq!(
            format!(
                "{}",
                ChannelRegistrationError::Host {
                    channel_id: "chat".to_string(),
                    reason: "service unavailable".to_string(),
                }
            ),
            "Notification host rejected channel 'chat': service unavailable"
        );
    }
}
