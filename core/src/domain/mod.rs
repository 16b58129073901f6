//! Domain layer containing the session aggregate and its value objects.

pub mod entities;

// Re-export commonly used domain types
pub use entities::*;
