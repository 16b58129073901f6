//! Unit tests for the session aggregate

use crate::domain::entities::otp_session::{normalize_email, OtpSession, SessionState};

#[test]
fn new_session_is_idle_and_ready_to_send() {
    let session = OtpSession::new();
    assert_eq!(session.state, SessionState::Idle);
    assert!(session.can_send());
    assert!(!session.can_verify());
}

#[test]
fn cooldown_blocks_send() {
    let mut session = OtpSession::new();
    session.resend_cooldown_seconds_remaining = 30;
    assert!(!session.can_send());

    session.resend_cooldown_seconds_remaining = 0;
    assert!(session.can_send());
}

#[test]
fn in_flight_states_block_send() {
    let mut session = OtpSession::new();
    for state in [
        SessionState::Sending,
        SessionState::Verifying,
        SessionState::Verified,
    ] {
        session.state = state;
        assert!(!session.can_send(), "send must be gated in {:?}", state);
    }
    for state in [SessionState::Idle, SessionState::AwaitingCode, SessionState::Expired] {
        session.state = state;
        assert!(session.can_send(), "send must be allowed in {:?}", state);
    }
}

#[test]
fn verify_requires_full_code_and_open_window() {
    let mut session = OtpSession::new();
    session.state = SessionState::AwaitingCode;
    session.expiry_seconds_remaining = 60;
    for (index, digit) in "123456".chars().enumerate() {
        session.digits.set_digit(index, &digit.to_string());
    }
    assert!(session.can_verify());

    session.expiry_seconds_remaining = 0;
    assert!(!session.can_verify());

    session.expiry_seconds_remaining = 60;
    session.digits.set_digit(5, "");
    assert!(!session.can_verify());
}

#[test]
fn reset_clears_all_fields() {
    let mut session = OtpSession::new();
    session.email = "a@b.com".to_string();
    session.state = SessionState::Expired;
    session.expiry_seconds_remaining = 0;
    session.resend_cooldown_seconds_remaining = 42;
    session.last_message = Some("Code expired".to_string());
    session.digits.set_digit(0, "1");

    session.reset();

    assert_eq!(session.email, "");
    assert_eq!(session.state, SessionState::Idle);
    assert_eq!(session.code(), "");
    assert_eq!(session.resend_cooldown_seconds_remaining, 0);
    assert_eq!(session.last_message, None);
}

#[test]
fn email_normalization_trims_and_lowercases() {
    assert_eq!(normalize_email("  User@Example.COM "), "user@example.com");
    assert_eq!(normalize_email("\ta@b.com\n"), "a@b.com");
    assert_eq!(normalize_email("   "), "");
}
