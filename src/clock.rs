use std::time::{Duration, Instant};

use chrono::{DateTime, Local};

/// Host clock capability: "current point in time" on demand.
pub trait WallClock: Send {
    fn now(&self) -> DateTime<Local>;
}

/// The real host clock.
pub struct SystemClock;

impl WallClock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Frozen clock for tests: always reports the instant it was built with.
#[cfg(test)]
pub struct FixedClock(pub DateTime<Local>);

#[cfg(test)]
impl WallClock for FixedClock {
    fn now(&self) -> DateTime<Local> {
        self.0
    }
}

/// Repeating-tick gate. Owns its interval and the next deadline; whoever owns
/// the ticker owns the tick stream, so dropping the owner cancels it. Missed
/// deadlines are skipped, never replayed: after a stall the next fire lands
/// on the first deadline in the future.
#[derive(Debug)]
pub struct Ticker {
    interval: Duration,
    next_due: Instant,
}

impl Ticker {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_due: Instant::now() + interval,
        }
    }

    /// True exactly once per elapsed deadline. Advances the anchor past `at`
    /// so a stalled event loop produces one tick, not a burst.
    pub fn poll(&mut self, at: Instant) -> bool {
        if at < self.next_due {
            return false;
        }
        while self.next_due <= at {
            self.next_due += self.interval;
        }
        true
    }

    /// Time left until the next deadline, for repaint scheduling.
    pub fn until_next(&self, at: Instant) -> Duration {
        self.next_due.saturating_duration_since(at)
    }
}
