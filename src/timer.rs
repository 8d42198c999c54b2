//! Elapsed-time reporting around decode and encode calls.

use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

#[derive(Debug)]
struct State {
    start: Instant,
    /// Time banked by earlier laps.
    banked: Duration,
}

/// A running stopwatch, safe to share between threads.
#[derive(Debug)]
pub struct Stopwatch {
    state: Mutex<State>,
}

impl Default for Stopwatch {
    fn default() -> Self {
        Self::start()
    }
}

impl Stopwatch {
    /// Start a stopwatch now.
    pub fn start() -> Self {
        Self {
            state: Mutex::new(State {
                start: Instant::now(),
                banked: Duration::ZERO,
            }),
        }
    }

    /// Restart from zero.
    pub fn reset(&self) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.start = Instant::now();
        state.banked = Duration::ZERO;
    }

    /// Total elapsed time; the stopwatch keeps running.
    pub fn elapsed(&self) -> Duration {
        let state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.banked + state.start.elapsed()
    }

    /// Bank the time since the last lap and log the running total.
    pub fn lap(&self, label: &str) -> Duration {
        let mut guard = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        let state = &mut *guard;
        let now = Instant::now();
        state.banked += now - state.start;
        state.start = now;
        let total = state.banked;
        drop(guard);
        tracing::debug!(label, elapsed_ms = total.as_secs_f64() * 1000.0, "elapsed");
        total
    }
}
