//! Trait seams for the external collaborators of the session machine.

use async_trait::async_trait;

use crate::errors::TransportError;

/// Transport for the two OTP network operations.
///
/// Implementations perform exactly one network call per method; retry
/// policy belongs to the caller, not this layer.
#[async_trait]
pub trait OtpTransport: Send + Sync {
    /// Ask the server to generate a code and dispatch it out-of-band.
    async fn request_code(&self, email: &str) -> Result<(), TransportError>;

    /// Submit a fully entered code for verification.
    ///
    /// Returns `Ok(false)` for a rejected code so the caller can tell
    /// "retry possible" apart from "cannot retry"; only protocol-level
    /// failures are errors.
    async fn verify_code(&self, email: &str, code: &str) -> Result<bool, TransportError>;
}

/// Opaque identity provider that completes before the OTP flow starts.
///
/// The session machine never calls these itself; the seam exists so an
/// application can hand the same collaborator surface to its auth screens.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Register a new account with the identity provider.
    async fn create_account(&self, email: &str, password: &str) -> Result<(), TransportError>;

    /// Authenticate an existing account.
    async fn sign_in(&self, email: &str, password: &str) -> Result<(), TransportError>;
}
