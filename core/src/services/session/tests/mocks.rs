//! Mock implementations for testing the session state machine

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use crate::errors::TransportError;
use crate::services::session::traits::OtpTransport;

// Mock transport for testing; responses are configurable per call site
// and every call is recorded.
pub struct MockTransport {
    send_response: Mutex<Result<(), TransportError>>,
    verify_response: Mutex<Result<bool, TransportError>>,
    verify_delay: Mutex<Option<Duration>>,
    pub send_calls: AtomicUsize,
    pub verify_calls: AtomicUsize,
    pub requested_emails: Mutex<Vec<String>>,
    pub verified_codes: Mutex<Vec<(String, String)>>,
}

impl MockTransport {
    /// A transport that accepts every send and every code.
    pub fn new() -> Self {
        Self {
            send_response: Mutex::new(Ok(())),
            verify_response: Mutex::new(Ok(true)),
            verify_delay: Mutex::new(None),
            send_calls: AtomicUsize::new(0),
            verify_calls: AtomicUsize::new(0),
            requested_emails: Mutex::new(Vec::new()),
            verified_codes: Mutex::new(Vec::new()),
        }
    }

    pub fn set_send_response(&self, response: Result<(), TransportError>) {
        *self.send_response.lock().unwrap() = response;
    }

    pub fn set_verify_response(&self, response: Result<bool, TransportError>) {
        *self.verify_response.lock().unwrap() = response;
    }

    /// Makes `verify_code` suspend for `delay` before answering, so tests
    /// can let timers fire while a verify is in flight.
    pub fn set_verify_delay(&self, delay: Duration) {
        *self.verify_delay.lock().unwrap() = Some(delay);
    }

    pub fn send_count(&self) -> usize {
        self.send_calls.load(Ordering::SeqCst)
    }

    pub fn verify_count(&self) -> usize {
        self.verify_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl OtpTransport for MockTransport {
    async fn request_code(&self, email: &str) -> Result<(), TransportError> {
        self.send_calls.fetch_add(1, Ordering::SeqCst);
        self.requested_emails.lock().unwrap().push(email.to_string());
        self.send_response.lock().unwrap().clone()
    }

    async fn verify_code(&self, email: &str, code: &str) -> Result<bool, TransportError> {
        self.verify_calls.fetch_add(1, Ordering::SeqCst);
        let delay = *self.verify_delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        self.verified_codes
            .lock()
            .unwrap()
            .push((email.to_string(), code.to_string()));
        self.verify_response.lock().unwrap().clone()
    }
}
