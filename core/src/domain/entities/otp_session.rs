//! OTP session aggregate root.

use super::digit_entry::{DigitEntry, CODE_LENGTH};

/// Seconds before an issued code stops being accepted (2 minutes)
pub const DEFAULT_EXPIRY_SECONDS: u32 = 120;

/// Minimum seconds between consecutive send requests (2 minutes)
pub const DEFAULT_RESEND_COOLDOWN_SECONDS: u32 = 120;

/// Lifecycle states of a single verification attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No code has been requested yet.
    Idle,
    /// A send request is in flight; further sends are gated off.
    Sending,
    /// A code was issued and the user is entering digits.
    AwaitingCode,
    /// A verify request is in flight; further verifies are gated off.
    Verifying,
    /// The server confirmed the code. Terminal.
    Verified,
    /// The expiry window elapsed before a valid code was submitted.
    Expired,
    /// The workflow ended in an unrecoverable failure. Reserved for
    /// callers that want to render a distinct terminal error screen;
    /// the machine itself always reverts to a stable retryable state.
    Failed,
}

/// Aggregate root for one verification attempt.
///
/// Mutated only by the session state machine, in response to user events
/// and timer ticks. All countdown bookkeeping is plain integers here; the
/// timers that drive them live in the service layer.
#[derive(Debug, Clone)]
pub struct OtpSession {
    /// Target identity, normalized (trimmed, lower-cased) before any request.
    pub email: String,
    /// Current lifecycle state.
    pub state: SessionState,
    /// Per-slot digit input; meaningful in `AwaitingCode`/`Verifying`.
    pub digits: DigitEntry,
    /// Seconds until the issued code stops being accepted.
    pub expiry_seconds_remaining: u32,
    /// Seconds until another send request is allowed.
    pub resend_cooldown_seconds_remaining: u32,
    /// Most recent human-readable status or error.
    pub last_message: Option<String>,
}

impl Default for OtpSession {
    fn default() -> Self {
        Self::new()
    }
}

impl OtpSession {
    /// Creates a fresh idle session.
    pub fn new() -> Self {
        Self {
            email: String::new(),
            state: SessionState::Idle,
            digits: DigitEntry::new(),
            expiry_seconds_remaining: 0,
            resend_cooldown_seconds_remaining: 0,
            last_message: None,
        }
    }

    /// Accumulated code entered so far.
    pub fn code(&self) -> String {
        self.digits.code()
    }

    /// Whether a send request is currently allowed.
    ///
    /// Gated off while the cooldown runs, while a request is in flight,
    /// and once the session reached its terminal `Verified` state.
    pub fn can_send(&self) -> bool {
        self.resend_cooldown_seconds_remaining == 0
            && !matches!(
                self.state,
                SessionState::Sending | SessionState::Verifying | SessionState::Verified
            )
    }

    /// Whether a verify request is currently allowed.
    ///
    /// Requires an unexpired code window, a fully entered code, and no
    /// verify already in flight.
    pub fn can_verify(&self) -> bool {
        self.state == SessionState::AwaitingCode
            && self.expiry_seconds_remaining > 0
            && self.digits.code().len() == CODE_LENGTH
    }

    /// Returns the session to its initial state, clearing all fields.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

/// Normalizes an email for use as the target identity: trims surrounding
/// whitespace and lower-cases. No format validation beyond non-emptiness
/// is performed anywhere in this core; the server is authoritative.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
