//! Unit tests for the countdown timer

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use super::Countdown;

struct Recorder {
    ticks: Arc<Mutex<Vec<u32>>>,
    zeroed: Arc<AtomicBool>,
}

impl Recorder {
    fn new() -> Self {
        Self {
            ticks: Arc::new(Mutex::new(Vec::new())),
            zeroed: Arc::new(AtomicBool::new(false)),
        }
    }

    fn on_tick(&self) -> impl FnMut(u32) + Send + 'static {
        let ticks = Arc::clone(&self.ticks);
        move |remaining| ticks.lock().unwrap().push(remaining)
    }

    fn on_zero(&self) -> impl FnOnce() + Send + 'static {
        let zeroed = Arc::clone(&self.zeroed);
        move || zeroed.store(true, Ordering::SeqCst)
    }

    fn ticks(&self) -> Vec<u32> {
        self.ticks.lock().unwrap().clone()
    }

    fn zeroed(&self) -> bool {
        self.zeroed.load(Ordering::SeqCst)
    }
}

async fn settle() {
    for _ in 0..5 {
        tokio::task::yield_now().await;
    }
}

async fn advance_secs(seconds: u32) {
    for _ in 0..seconds {
        tokio::time::advance(Duration::from_secs(1)).await;
        settle().await;
    }
}

#[tokio::test(start_paused = true)]
async fn ticks_once_per_elapsed_second_down_to_zero() {
    let recorder = Recorder::new();
    let mut countdown = Countdown::new();
    countdown.start(3, recorder.on_tick(), recorder.on_zero());
    settle().await;

    assert_eq!(recorder.ticks(), Vec::<u32>::new());

    advance_secs(1).await;
    assert_eq!(recorder.ticks(), vec![2]);
    assert!(!recorder.zeroed());

    advance_secs(1).await;
    assert_eq!(recorder.ticks(), vec![2, 1]);

    advance_secs(1).await;
    assert_eq!(recorder.ticks(), vec![2, 1, 0]);
    assert!(recorder.zeroed());

    // Finished: no further ticks
    advance_secs(3).await;
    assert_eq!(recorder.ticks(), vec![2, 1, 0]);
}

#[tokio::test(start_paused = true)]
async fn cancel_stops_future_ticks() {
    let recorder = Recorder::new();
    let mut countdown = Countdown::new();
    countdown.start(5, recorder.on_tick(), recorder.on_zero());
    settle().await;

    advance_secs(1).await;
    countdown.cancel();

    advance_secs(5).await;
    assert_eq!(recorder.ticks(), vec![4]);
    assert!(!recorder.zeroed());
    assert!(!countdown.is_running());
}

#[tokio::test(start_paused = true)]
async fn cancel_is_idempotent_and_safe_after_zero() {
    let recorder = Recorder::new();
    let mut countdown = Countdown::new();

    // Cancel before any start is a no-op
    countdown.cancel();

    countdown.start(1, recorder.on_tick(), recorder.on_zero());
    settle().await;
    advance_secs(1).await;
    assert!(recorder.zeroed());

    countdown.cancel();
    countdown.cancel();
    assert_eq!(recorder.ticks(), vec![0]);
}

#[tokio::test(start_paused = true)]
async fn restart_cancels_previous_run() {
    let first = Recorder::new();
    let second = Recorder::new();
    let mut countdown = Countdown::new();

    countdown.start(10, first.on_tick(), first.on_zero());
    settle().await;
    advance_secs(1).await;
    assert_eq!(first.ticks(), vec![9]);

    countdown.start(2, second.on_tick(), second.on_zero());
    settle().await;

    advance_secs(2).await;
    // No double-ticking: the first run stopped at its last pre-restart tick
    assert_eq!(first.ticks(), vec![9]);
    assert!(!first.zeroed());
    assert_eq!(second.ticks(), vec![1, 0]);
    assert!(second.zeroed());
}

#[tokio::test(start_paused = true)]
async fn drop_cancels_the_running_timer() {
    let recorder = Recorder::new();
    {
        let mut countdown = Countdown::new();
        countdown.start(5, recorder.on_tick(), recorder.on_zero());
        settle().await;
        advance_secs(1).await;
    }

    advance_secs(5).await;
    assert_eq!(recorder.ticks(), vec![4]);
    assert!(!recorder.zeroed());
}

#[tokio::test(start_paused = true)]
async fn zero_initial_seconds_fires_on_zero_immediately() {
    let recorder = Recorder::new();
    let mut countdown = Countdown::new();
    countdown.start(0, recorder.on_tick(), recorder.on_zero());
    settle().await;

    assert_eq!(recorder.ticks(), Vec::<u32>::new());
    assert!(recorder.zeroed());
}
