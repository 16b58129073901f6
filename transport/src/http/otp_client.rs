//! reqwest-based implementation of the OTP transport seam.

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;
use tracing;

use otpkit_core::errors::TransportError;
use otpkit_core::services::session::OtpTransport;

/// Response shape shared by both OTP endpoints.
///
/// Error responses reuse the same shape; `error` is preferred over
/// `message` when both are present.
#[derive(Debug, Clone, Deserialize)]
pub struct OtpServerResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl OtpServerResponse {
    fn error_text(self) -> Option<String> {
        self.error.or(self.message)
    }
}

/// HTTP transport for the two OTP operations.
///
/// Performs exactly one request per call; no retries and no timeout beyond
/// the client's own defaults - retry and timeout policy belong to the caller.
pub struct HttpOtpTransport {
    http: Client,
    base_url: Url,
}

impl HttpOtpTransport {
    /// Create a transport against `base_url` with a default client.
    pub fn new(base_url: &str) -> Result<Self, TransportError> {
        Self::with_client(Client::new(), base_url)
    }

    /// Create a transport with a caller-configured `reqwest::Client`.
    pub fn with_client(http: Client, base_url: &str) -> Result<Self, TransportError> {
        let base_url = Url::parse(base_url).map_err(|_| TransportError::InvalidEndpoint)?;
        Ok(Self { http, base_url })
    }

    async fn call(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<OtpServerResponse, TransportError> {
        let url = self
            .base_url
            .join(path)
            .map_err(|_| TransportError::InvalidEndpoint)?;

        tracing::debug!(endpoint = path, "Calling OTP endpoint");

        let response = self
            .http
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|e| TransportError::NetworkFailure(e.to_string()))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| TransportError::NetworkFailure(e.to_string()))?;

        parse_response(status, &body)
    }
}

/// Maps an HTTP status and body to the transport result.
///
/// Non-2xx statuses first try to decode the standard error payload so the
/// server's own wording wins over a bare status code.
fn parse_response(status: StatusCode, body: &[u8]) -> Result<OtpServerResponse, TransportError> {
    if !status.is_success() {
        if let Ok(payload) = serde_json::from_slice::<OtpServerResponse>(body) {
            if let Some(text) = payload.error_text() {
                return Err(TransportError::ServerMessage(text));
            }
        }
        return Err(TransportError::HttpStatus(status.as_u16()));
    }

    serde_json::from_slice(body).map_err(|_| TransportError::DecodeFailure)
}

#[async_trait]
impl OtpTransport for HttpOtpTransport {
    async fn request_code(&self, email: &str) -> Result<(), TransportError> {
        self.call("send-otp", &[("email", email)]).await?;
        Ok(())
    }

    async fn verify_code(&self, email: &str, code: &str) -> Result<bool, TransportError> {
        let response = self
            .call("verify-otp", &[("email", email), ("otp", code)])
            .await?;
        Ok(response.success)
    }
}
