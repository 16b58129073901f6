//! Error and outcome types for the OTP verification workflow.

use thiserror::Error;

/// Errors produced by the transport layer when talking to the OTP endpoints.
///
/// These are protocol-level failures. A rejected code is *not* a transport
/// error; `verify_code` reports it as `Ok(false)` so callers can tell
/// "retry possible" apart from "cannot retry".
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// The configured base URL or the joined endpoint path is not a valid URL.
    #[error("Invalid URL.")]
    InvalidEndpoint,

    /// The server answered with a non-2xx status and no parsable error payload.
    #[error("Server error ({0}).")]
    HttpStatus(u16),

    /// The response body could not be decoded into the expected shape.
    #[error("Response decoding failed.")]
    DecodeFailure,

    /// The server returned a structured error payload; preferred over
    /// `HttpStatus` when present.
    #[error("{0}")]
    ServerMessage(String),

    /// Connection-level failure (DNS, TLS, refused, dropped mid-flight).
    #[error("Network error: {0}")]
    NetworkFailure(String),
}

/// Expected, non-exceptional outcomes of the verification workflow.
///
/// These surface as session state plus `last_message`, never as errors:
/// the user can always recover from them without leaving the flow.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainOutcome {
    /// The server rejected the submitted code.
    #[error("Invalid or expired OTP")]
    CodeMismatch,

    /// The expiry window elapsed before a valid code was submitted.
    #[error("Code expired")]
    CodeExpired,

    /// A send was requested while the resend cooldown is still running.
    #[error("Please wait {seconds_remaining} seconds before requesting a new code")]
    RateLimited { seconds_remaining: u32 },
}
