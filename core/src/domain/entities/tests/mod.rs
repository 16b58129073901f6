//! Unit tests for domain entities.

mod session_tests;
