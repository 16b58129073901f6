//! # OtpKit Transport
//!
//! HTTP implementation of the [`OtpTransport`](otpkit_core::OtpTransport)
//! seam: two GET endpoints, query-parameter based, returning a small
//! `{success, message?, error?}` JSON shape.

pub mod http;

pub use http::{HttpOtpTransport, OtpServerResponse};
