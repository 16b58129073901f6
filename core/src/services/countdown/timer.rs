//! Generic cancelable repeating one-second tick primitive.
//!
//! Both session timers (code expiry and resend cooldown) are instances of
//! this type. They must stay fully independent, so each `Countdown` owns
//! its own spawned task and cancellation flag.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

/// A restartable countdown that ticks once per elapsed second.
///
/// `start` counts down from `initial_seconds`, invoking `on_tick(remaining)`
/// after each elapsed second and `on_zero` once the count reaches zero.
/// Restarting cancels the previous run first, so a `Countdown` never
/// double-ticks. `cancel` is idempotent and synchronous: once it returns,
/// any tick that was already scheduled is a no-op on delivery.
///
/// Dropping a `Countdown` cancels it, so a timer owned by a session cannot
/// outlive the session and fire into freed state.
#[derive(Debug, Default)]
pub struct Countdown {
    task: Option<JoinHandle<()>>,
    cancelled: Arc<AtomicBool>,
}

impl Countdown {
    /// Creates an idle countdown.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts (or restarts) the countdown from `initial_seconds`.
    ///
    /// `on_tick` receives the remaining seconds after each elapsed second,
    /// down to and including zero; `on_zero` runs after the final tick.
    /// If `initial_seconds` is zero, `on_zero` fires on the next task poll
    /// without any `on_tick` call.
    pub fn start<T, Z>(&mut self, initial_seconds: u32, mut on_tick: T, on_zero: Z)
    where
        T: FnMut(u32) + Send + 'static,
        Z: FnOnce() + Send + 'static,
    {
        self.cancel();

        let cancelled = Arc::new(AtomicBool::new(false));
        self.cancelled = Arc::clone(&cancelled);

        self.task = Some(tokio::spawn(async move {
            let period = Duration::from_secs(1);
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            let mut remaining = initial_seconds;
            while remaining > 0 {
                ticker.tick().await;
                // A cancel racing with an elapsed tick must win: the flag is
                // set synchronously before the owner releases its state.
                if cancelled.load(Ordering::SeqCst) {
                    return;
                }
                remaining -= 1;
                on_tick(remaining);
            }
            if !cancelled.load(Ordering::SeqCst) {
                on_zero();
            }
        }));
    }

    /// Stops the countdown. Safe to call from any state, any number of
    /// times, including after the countdown already reached zero.
    pub fn cancel(&mut self) {
        self.cancelled.store(true, Ordering::SeqCst);
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }

    /// True while a started countdown has neither finished nor been cancelled.
    pub fn is_running(&self) -> bool {
        self.task
            .as_ref()
            .map(|task| !task.is_finished())
            .unwrap_or(false)
    }
}

impl Drop for Countdown {
    fn drop(&mut self) {
        self.cancel();
    }
}
