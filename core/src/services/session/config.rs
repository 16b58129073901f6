//! Configuration for the session state machine.

use crate::domain::entities::otp_session::{DEFAULT_EXPIRY_SECONDS, DEFAULT_RESEND_COOLDOWN_SECONDS};

/// Configuration for the session state machine
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Seconds before an issued code stops being accepted
    pub expiry_seconds: u32,
    /// Minimum seconds between consecutive send requests
    pub resend_cooldown_seconds: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            expiry_seconds: DEFAULT_EXPIRY_SECONDS,
            resend_cooldown_seconds: DEFAULT_RESEND_COOLDOWN_SECONDS,
        }
    }
}
