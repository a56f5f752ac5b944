//! Platform helpers shared by every front end
//!
//! - Fixed-step tick scheduling
//! - Input latching between ticks
//! - Stop requests from another thread

pub mod input;

pub use input::{InputLatch, Key};

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::consts::MAX_SUBSTEPS;

/// Accumulator-based fixed tick scheduler.
///
/// Feed it wall-clock frame deltas; it says how many simulation ticks to run
/// this frame, at most `MAX_SUBSTEPS`.
#[derive(Debug, Clone)]
pub struct FixedStepClock {
    step_millis: f64,
    accumulator: f64,
    max_substeps: u32,
}

impl FixedStepClock {
    pub fn new(step_millis: u64) -> Self {
        Self {
            step_millis: step_millis.max(1) as f64,
            accumulator: 0.0,
            max_substeps: MAX_SUBSTEPS,
        }
    }

    pub fn step_millis(&self) -> f64 {
        self.step_millis
    }

    /// Add elapsed time and return the number of ticks due
    pub fn advance(&mut self, elapsed_millis: f64) -> u32 {
        // Never bank more than one frame's worth of catch-up
        let cap = self.step_millis * self.max_substeps as f64;
        self.accumulator = (self.accumulator + elapsed_millis.max(0.0)).min(cap);

        let mut ticks = 0;
        while self.accumulator >= self.step_millis && ticks < self.max_substeps {
            self.accumulator -= self.step_millis;
            ticks += 1;
        }
        ticks
    }

    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}

/// Shareable stop request, observed by the game loop between ticks
#[derive(Debug, Clone, Default)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request_stop(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn stop_requested(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}
