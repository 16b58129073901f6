//! Domain entities for the OTP verification workflow.

pub mod digit_entry;
pub mod otp_session;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use digit_entry::{DigitEntry, CODE_LENGTH};
pub use otp_session::{
    normalize_email, OtpSession, SessionState, DEFAULT_EXPIRY_SECONDS,
    DEFAULT_RESEND_COOLDOWN_SECONDS,
};
