//! Cancelable one-second countdown timer.

mod timer;

#[cfg(test)]
mod tests;

pub use timer::Countdown;
