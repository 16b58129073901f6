//! Session state machine for the OTP verification workflow.
//!
//! This module owns the lifecycle of a single verification attempt:
//! - requesting a code and handling send failures
//! - the two independent countdowns (code expiry, resend cooldown)
//! - digit-by-digit code entry with a single verification trigger point
//! - converting transport errors into user-facing messages

mod config;
mod service;
mod traits;
mod types;

#[cfg(test)]
mod tests;

pub use config::SessionConfig;
pub use service::SessionService;
pub use traits::{IdentityProvider, OtpTransport};
pub use types::SessionSnapshot;
