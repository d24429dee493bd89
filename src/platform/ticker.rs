//! Frame ticker: paces the console loop at a fixed interval.
//!
//! Deadline based: each tick is scheduled one interval after the previous
//! deadline, so a slow frame does not shift the whole schedule. A loop that
//! falls more than one interval behind re-anchors instead of bursting.

use std::thread;
use std::time::{Duration, Instant};

/// A tick, returned once the deadline has passed.
#[derive(Debug, Clone, Copy)]
pub struct Tick {
    /// Frame number (monotonically increasing).
    pub frame: u64,
    /// Time elapsed since the ticker was created.
    pub elapsed: Duration,
}

/// Blocking fixed-interval ticker.
#[derive(Debug)]
pub struct FrameTicker {
    interval: Duration,
    start: Instant,
    next_tick: Instant,
    frame: u64,
}

impl FrameTicker {
    /// Create a ticker whose first deadline is one interval from now.
    pub fn new(interval: Duration) -> Self {
        let start = Instant::now();
        Self {
            interval,
            start,
            next_tick: start + interval,
            frame: 0,
        }
    }

    /// Interval between ticks.
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Block until the next deadline.
    pub fn wait(&mut self) -> Tick {
        let now = Instant::now();
        if now < self.next_tick {
            thread::sleep(self.next_tick - now);
        }

        let now = Instant::now();
        let tick = Tick {
            frame: self.frame,
            elapsed: now - self.start,
        };

        self.frame += 1;
        self.next_tick += self.interval;
        if self.next_tick < now {
            self.next_tick = now + self.interval;
        }

        tick
    }
}
