//! Types published by the session state machine.

use crate::domain::entities::otp_session::{OtpSession, SessionState};

/// Read-only view of the session, published to the UI after every mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    /// Current lifecycle state
    pub state: SessionState,
    /// Digits entered so far, concatenated
    pub code: String,
    /// Slot that should hold input focus
    pub focus_index: usize,
    /// Seconds until the issued code stops being accepted
    pub expiry_seconds_remaining: u32,
    /// Seconds until another send request is allowed
    pub resend_cooldown_seconds_remaining: u32,
    /// Most recent human-readable status or error
    pub last_message: Option<String>,
    /// Whether the send action is currently available
    pub can_send: bool,
    /// Whether the verify action is currently available
    pub can_verify: bool,
}

impl SessionSnapshot {
    pub(crate) fn of(session: &OtpSession) -> Self {
        Self {
            state: session.state,
            code: session.code(),
            focus_index: session.digits.focus_index(),
            expiry_seconds_remaining: session.expiry_seconds_remaining,
            resend_cooldown_seconds_remaining: session.resend_cooldown_seconds_remaining,
            last_message: session.last_message.clone(),
            can_send: session.can_send(),
            can_verify: session.can_verify(),
        }
    }
}

impl Default for SessionSnapshot {
    fn default() -> Self {
        Self::of(&OtpSession::new())
    }
}
