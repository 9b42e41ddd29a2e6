//! Interval ticker with an explicit start/stop lifecycle.
//!
//! The app loop is cooperative: there are no background timer threads.
//! A `Ticker` is a scoped resource owned by the component whose display it
//! drives: acquired (`start`) when the owning condition becomes true and
//! released (`stop`, or drop) when it becomes false or the view is torn
//! down. The elapsed-time sampler and the token countdown each own their
//! own `Ticker`; they never share one.

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct Ticker {
    interval: Duration,
    next_due: Option<Instant>,
}

impl Ticker {
    pub fn new(interval: Duration) -> Self {
        Self { interval, next_due: None }
    }

    /// The standard one-second display tick.
    pub fn one_second() -> Self {
        Self::new(Duration::from_millis(crate::config::TICK_INTERVAL_MS))
    }

    /// Begin ticking. The first fire is one full interval after `now`.
    pub fn start(&mut self, now: Instant) {
        self.next_due = Some(now + self.interval);
    }

    /// Stop ticking. `poll` never fires again until the next `start`.
    pub fn stop(&mut self) {
        self.next_due = None;
    }

    pub fn is_running(&self) -> bool {
        self.next_due.is_some()
    }

    /// Fire at most once per call. If the loop stalled past several
    /// intervals, the missed ticks are coalesced into one fire.
    pub fn poll(&mut self, now: Instant) -> bool {
        let Some(due) = self.next_due else {
            return false;
        };
        if now < due {
            return false;
        }
        let mut next = due + self.interval;
        while next <= now {
            next += self.interval;
        }
        self.next_due = Some(next);
        true
    }
}
