//! Monotonic clocks and frame timing

use std::cell::Cell;
use std::time::Instant;

use crate::sim::FrameTime;

/// Monotonically increasing millisecond clock
pub trait Clock {
    fn now_ms(&self) -> u64;
}

/// Wall clock measured from construction
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    start: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }
}

/// Clock advanced by hand (headless runs, tests)
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<u64>,
}

impl ManualClock {
    pub fn new(start_ms: u64) -> Self {
        Self {
            now: Cell::new(start_ms),
        }
    }

    pub fn advance(&self, ms: u64) {
        self.now.set(self.now.get() + ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.get()
    }
}

/// Turns consecutive clock samples into [`FrameTime`]s
#[derive(Debug, Clone)]
pub struct FrameTimer {
    last_ms: Option<u64>,
    max_dt: f32,
}

impl FrameTimer {
    pub fn new(max_dt: f32) -> Self {
        Self {
            last_ms: None,
            max_dt,
        }
    }

    /// Sample the clock once for this frame. The first frame has `dt = 0`;
    /// long stalls are clamped to `max_dt`.
    pub fn advance<C: Clock + ?Sized>(&mut self, clock: &C) -> FrameTime {
        let now_ms = clock.now_ms();
        let dt = match self.last_ms {
            Some(last) => now_ms.saturating_sub(last) as f32 / 1000.0,
            None => 0.0,
        };
        self.last_ms = Some(now_ms);
        FrameTime {
            now_ms,
            dt: dt.min(self.max_dt),
        }
    }
}
