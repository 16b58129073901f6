//! Session state machine implementation.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use tokio::sync::watch;
use tracing;

use crate::domain::entities::otp_session::{normalize_email, OtpSession, SessionState};
use crate::errors::DomainOutcome;
use crate::services::countdown::Countdown;

use super::config::SessionConfig;
use super::traits::OtpTransport;
use super::types::SessionSnapshot;

/// Which of the two independent session timers a callback belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimerKind {
    Expiry,
    Cooldown,
}

/// Session state shared between the machine and its timer tasks.
///
/// Every mutation happens under the one mutex and ends with a snapshot
/// publish, which is the serialized event stream the workflow requires.
/// Each timer carries the epoch current when it was started; a tick whose
/// epoch no longer matches was cancelled while already scheduled and must
/// not touch the session.
struct SharedSession {
    session: Mutex<OtpSession>,
    expiry_epoch: AtomicU64,
    cooldown_epoch: AtomicU64,
    publisher: watch::Sender<SessionSnapshot>,
}

impl SharedSession {
    fn new() -> Self {
        let (publisher, _) = watch::channel(SessionSnapshot::default());
        Self {
            session: Mutex::new(OtpSession::new()),
            expiry_epoch: AtomicU64::new(0),
            cooldown_epoch: AtomicU64::new(0),
            publisher,
        }
    }

    fn lock(&self) -> MutexGuard<'_, OtpSession> {
        // A panic while holding this lock leaves no broken invariant worth
        // propagating; recover the guard instead of poisoning the session.
        self.session.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Runs `f` against the session and publishes the resulting snapshot.
    fn with<R>(&self, f: impl FnOnce(&mut OtpSession) -> R) -> R {
        let mut session = self.lock();
        let result = f(&mut session);
        self.publisher.send_replace(SessionSnapshot::of(&session));
        result
    }

    /// Like [`with`], but a no-op when `epoch` is stale for `kind`.
    fn with_timer(&self, kind: TimerKind, epoch: u64, f: impl FnOnce(&mut OtpSession)) {
        let mut session = self.lock();
        if self.epoch(kind).load(Ordering::SeqCst) != epoch {
            return;
        }
        f(&mut session);
        self.publisher.send_replace(SessionSnapshot::of(&session));
    }

    fn epoch(&self, kind: TimerKind) -> &AtomicU64 {
        match kind {
            TimerKind::Expiry => &self.expiry_epoch,
            TimerKind::Cooldown => &self.cooldown_epoch,
        }
    }

    /// Invalidates every tick scheduled under the current epoch of `kind`
    /// and returns the fresh epoch for a restart.
    fn advance_epoch(&self, kind: TimerKind) -> u64 {
        self.epoch(kind).fetch_add(1, Ordering::SeqCst) + 1
    }
}

/// State machine owning the lifecycle of a single verification attempt.
///
/// All session mutations are serialized through one lock; network calls
/// release it while suspended and the gating states (`Sending`,
/// `Verifying`) reject re-entrant triggers in the meantime.
pub struct SessionService<T: OtpTransport> {
    transport: Arc<T>,
    config: SessionConfig,
    shared: Arc<SharedSession>,
    expiry_timer: Mutex<Countdown>,
    cooldown_timer: Mutex<Countdown>,
}

impl<T: OtpTransport> SessionService<T> {
    /// Create a new session state machine
    ///
    /// # Arguments
    ///
    /// * `transport` - Transport implementation for the OTP endpoints
    /// * `config` - Timer windows for this session
    pub fn new(transport: Arc<T>, config: SessionConfig) -> Self {
        Self {
            transport,
            config,
            shared: Arc::new(SharedSession::new()),
            expiry_timer: Mutex::new(Countdown::new()),
            cooldown_timer: Mutex::new(Countdown::new()),
        }
    }

    /// Current read-only view of the session.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot::of(&self.shared.lock())
    }

    /// Subscribe to snapshot updates; one value per session mutation,
    /// including timer ticks.
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.shared.publisher.subscribe()
    }

    /// Request a verification code for `email`.
    ///
    /// The email is normalized (trimmed, lower-cased) first. The resend
    /// cooldown starts on every attempt that reaches the transport,
    /// success or failure - the rate limit is consumed either way. The
    /// expiry window starts only when the send succeeds.
    pub async fn send(&self, email: &str) -> SessionSnapshot {
        let email = normalize_email(email);

        let proceed = self.shared.with(|s| {
            if email.is_empty() {
                s.last_message = Some("Please enter your email".to_string());
                return false;
            }
            if matches!(
                s.state,
                SessionState::Sending | SessionState::Verifying | SessionState::Verified
            ) {
                return false;
            }
            if s.resend_cooldown_seconds_remaining > 0 {
                let outcome = DomainOutcome::RateLimited {
                    seconds_remaining: s.resend_cooldown_seconds_remaining,
                };
                tracing::warn!(
                    email = %s.email,
                    cooldown_remaining = s.resend_cooldown_seconds_remaining,
                    event = "rate_limit_exceeded",
                    "Send requested while resend cooldown is running"
                );
                s.last_message = Some(outcome.to_string());
                return false;
            }

            s.email = email.clone();
            s.state = SessionState::Sending;
            s.digits.clear();
            s.expiry_seconds_remaining = 0;
            true
        });
        if !proceed {
            return self.snapshot();
        }

        // A re-issued send invalidates whatever code window was running.
        self.stop_timer(TimerKind::Expiry);

        tracing::info!(
            email = %email,
            event = "otp_send_requested",
            "Requesting verification code"
        );
        let result = self.transport.request_code(&email).await;

        self.start_cooldown();

        match result {
            Ok(()) => {
                tracing::info!(
                    email = %email,
                    event = "otp_sent",
                    "Verification code dispatched"
                );
                self.shared.with(|s| {
                    s.state = SessionState::AwaitingCode;
                    s.expiry_seconds_remaining = self.config.expiry_seconds;
                    s.last_message = Some(format!("OTP sent to {}", s.email));
                });
                self.start_expiry();
            }
            Err(error) => {
                tracing::warn!(
                    email = %email,
                    error = %error,
                    event = "otp_send_failed",
                    "Failed to request verification code"
                );
                self.shared.with(|s| {
                    s.state = SessionState::Idle;
                    s.last_message = Some(error.to_string());
                });
            }
        }

        self.snapshot()
    }

    /// Apply a digit-slot change from the UI.
    ///
    /// This is the single verification trigger point: once the change
    /// completes all six slots - and the code window has not expired -
    /// the machine moves to `Verifying` and submits the code exactly once.
    pub async fn digit_changed(&self, index: usize, value: &str) -> SessionSnapshot {
        let submission = self.shared.with(|s| {
            if s.state != SessionState::AwaitingCode {
                return None;
            }
            let complete = s.digits.set_digit(index, value);
            // Expiry wins a same-tick race with digit completion: the
            // window is checked synchronously before verify is issued.
            if complete && s.expiry_seconds_remaining > 0 {
                s.state = SessionState::Verifying;
                return Some((s.email.clone(), s.digits.code()));
            }
            None
        });

        if let Some((email, code)) = submission {
            self.verify(&email, &code).await;
        }
        self.snapshot()
    }

    /// Abandon the current attempt: cancels both timers and clears all
    /// session fields. Safe from any state.
    pub fn reset(&self) -> SessionSnapshot {
        self.stop_timer(TimerKind::Expiry);
        self.stop_timer(TimerKind::Cooldown);
        self.shared.with(|s| s.reset());
        self.snapshot()
    }

    async fn verify(&self, email: &str, code: &str) {
        tracing::info!(
            email = %email,
            event = "otp_verify_requested",
            "Submitting verification code"
        );

        match self.transport.verify_code(email, code).await {
            Ok(true) => {
                tracing::info!(
                    email = %email,
                    event = "otp_verified",
                    "Verification code accepted"
                );
                // Terminal: no further send or verify on this session,
                // so neither timer has anything left to count.
                self.stop_timer(TimerKind::Expiry);
                self.stop_timer(TimerKind::Cooldown);
                self.shared.with(|s| {
                    s.state = SessionState::Verified;
                    s.digits.clear();
                    s.expiry_seconds_remaining = 0;
                    s.resend_cooldown_seconds_remaining = 0;
                    s.last_message = Some("OTP verified successfully!".to_string());
                });
            }
            Ok(false) => {
                tracing::warn!(
                    email = %email,
                    event = "otp_verification_rejected",
                    "Verification code rejected by server"
                );
                self.shared.with(|s| {
                    s.digits.clear();
                    Self::revert_after_verify(s, DomainOutcome::CodeMismatch.to_string());
                });
            }
            Err(error) => {
                tracing::warn!(
                    email = %email,
                    error = %error,
                    event = "otp_verification_failed",
                    "Transport failure while verifying code"
                );
                self.shared
                    .with(|s| Self::revert_after_verify(s, error.to_string()));
            }
        }
    }

    /// Returns a non-accepted verify to its stable state.
    ///
    /// Normally that is `AwaitingCode`, but if the expiry window closed
    /// while the verify was in flight the zero-tick left the state alone
    /// (`Verifying` is not `AwaitingCode`), so the transition to `Expired`
    /// happens here instead.
    fn revert_after_verify(s: &mut OtpSession, message: String) {
        if s.expiry_seconds_remaining == 0 {
            s.state = SessionState::Expired;
            s.last_message = Some(DomainOutcome::CodeExpired.to_string());
        } else {
            s.state = SessionState::AwaitingCode;
            s.last_message = Some(message);
        }
    }

    fn start_cooldown(&self) {
        let seconds = self.config.resend_cooldown_seconds;
        let epoch = self.shared.advance_epoch(TimerKind::Cooldown);
        self.shared
            .with(|s| s.resend_cooldown_seconds_remaining = seconds);

        let on_tick = {
            let shared = Arc::clone(&self.shared);
            move |remaining| {
                shared.with_timer(TimerKind::Cooldown, epoch, |s| {
                    s.resend_cooldown_seconds_remaining = remaining;
                });
            }
        };
        let on_zero = {
            let shared = Arc::clone(&self.shared);
            move || {
                shared.with_timer(TimerKind::Cooldown, epoch, |s| {
                    s.resend_cooldown_seconds_remaining = 0;
                });
            }
        };
        self.timer(TimerKind::Cooldown)
            .start(seconds, on_tick, on_zero);
    }

    fn start_expiry(&self) {
        let seconds = self.config.expiry_seconds;
        let epoch = self.shared.advance_epoch(TimerKind::Expiry);

        let on_tick = {
            let shared = Arc::clone(&self.shared);
            move |remaining| {
                shared.with_timer(TimerKind::Expiry, epoch, |s| {
                    s.expiry_seconds_remaining = remaining;
                });
            }
        };
        let on_zero = {
            let shared = Arc::clone(&self.shared);
            move || {
                shared.with_timer(TimerKind::Expiry, epoch, |s| {
                    s.expiry_seconds_remaining = 0;
                    if s.state == SessionState::AwaitingCode {
                        s.state = SessionState::Expired;
                        s.last_message = Some(DomainOutcome::CodeExpired.to_string());
                    }
                });
            }
        };
        self.timer(TimerKind::Expiry).start(seconds, on_tick, on_zero);
    }

    /// Synchronously invalidates and cancels one timer; any tick of the
    /// old run that is already scheduled becomes a no-op on delivery.
    fn stop_timer(&self, kind: TimerKind) {
        self.shared.advance_epoch(kind);
        self.timer(kind).cancel();
    }

    fn timer(&self, kind: TimerKind) -> MutexGuard<'_, Countdown> {
        let timer = match kind {
            TimerKind::Expiry => &self.expiry_timer,
            TimerKind::Cooldown => &self.cooldown_timer,
        };
        timer.lock().unwrap_or_else(|e| e.into_inner())
    }
}
