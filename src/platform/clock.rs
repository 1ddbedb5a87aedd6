//! Frame tick sources
//!
//! The host loop asks its clock for a timestamp once per frame and hands it
//! to the session, which turns consecutive stamps into a clamped `dt`.

use std::time::Instant;

/// Millisecond timestamps for frame callbacks
pub trait Clock {
    fn now_ms(&mut self) -> f64;
}

/// Monotonic wall clock, starting at 0 when created
#[derive(Debug, Clone)]
pub struct SteadyClock {
    origin: Instant,
}

impl Default for SteadyClock {
    fn default() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl SteadyClock {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Clock for SteadyClock {
    fn now_ms(&mut self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}

/// Stepped clock for tests and headless runs.
///
/// Each read advances by `step_ms` plus a repeating jitter pattern, which
/// stands in for the uneven spacing of real display refreshes.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: f64,
    step_ms: f64,
    jitter_ms: f64,
    reads: u64,
}

impl ManualClock {
    pub fn new(step_ms: f64) -> Self {
        Self {
            now: 0.0,
            step_ms,
            jitter_ms: 0.0,
            reads: 0,
        }
    }

    /// Vary successive frame lengths by up to `jitter_ms` either way
    pub fn with_jitter(mut self, jitter_ms: f64) -> Self {
        self.jitter_ms = jitter_ms.abs();
        self
    }

    /// Jump ahead without producing a frame (a stalled tab, say)
    pub fn advance(&mut self, ms: f64) {
        self.now += ms;
    }

    pub fn peek(&self) -> f64 {
        self.now
    }
}

impl Clock for ManualClock {
    fn now_ms(&mut self) -> f64 {
        // -1, 0, +1, 0, ... times the jitter
        let wobble = match self.reads % 4 {
            0 => -1.0,
            2 => 1.0,
            _ => 0.0,
        };
        self.reads += 1;
        self.now += (self.step_ms + wobble * self.jitter_ms).max(0.0);
        self.now
    }
}
