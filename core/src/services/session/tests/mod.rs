//! Unit tests for the session state machine.

mod mocks;
