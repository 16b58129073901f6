//! # OtpKit Core
//!
//! Core logic for the time-boxed OTP verification workflow.
//! This crate contains the session aggregate, the session state machine
//! with its two countdown timers, the digit-entry aggregator, and the
//! trait seams for external collaborators (transport, identity provider).

pub mod domain;
pub mod services;
pub mod errors;

// Re-export commonly used types for convenience
pub use domain::*;
pub use services::*;
pub use errors::*;
