//! HTTP client for the OTP endpoints.

mod otp_client;

pub use otp_client::{HttpOtpTransport, OtpServerResponse};
