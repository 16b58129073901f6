//! Services driving the verification workflow.

pub mod countdown;
pub mod session;

// Re-export commonly used types
pub use countdown::Countdown;
pub use session::{
    IdentityProvider, OtpTransport, SessionConfig, SessionService, SessionSnapshot,
};
