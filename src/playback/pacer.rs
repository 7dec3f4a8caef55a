// SPDX-License-Identifier: MPL-2.0
//! Frame pacing by residual sleep.
//!
//! Sleeping a fixed `1/fps` every iteration would compound every bit of
//! per-frame processing cost (decode, color conversion, sink write
//! latency) into cumulative drift. Instead the pacer measures the elapsed
//! time since its last tic and sleeps only the residual
//! `max(0, 1/fps - elapsed)`. When processing already exceeds the frame
//! budget the residual is zero and the loop proceeds immediately -
//! best-effort pacing, never indefinite blocking.

use std::time::{Duration, Instant};

/// Computes the residual sleep for one frame interval.
///
/// `sleep = max(0, 1/nominal_fps - elapsed)`. Never negative.
#[must_use]
pub fn residual_sleep(elapsed: Duration, nominal_fps: f64) -> Duration {
    let budget = Duration::from_secs_f64(1.0 / nominal_fps);
    budget.saturating_sub(elapsed)
}

/// Per-stream frame pacer.
///
/// Holds the pacing tic: the wall-clock timestamp recorded immediately
/// after the previous frame was delivered (or after the previous sleep).
/// Mutated every loop iteration; never shared across streams.
#[derive(Debug)]
pub struct FramePacer {
    last_tic: Instant,
}

impl FramePacer {
    /// Creates a pacer with its tic set to now.
    #[must_use]
    pub fn new() -> Self {
        Self {
            last_tic: Instant::now(),
        }
    }

    /// Sleeps the residual frame budget and advances the tic.
    ///
    /// Returns the duration actually requested from the sleep (zero when
    /// the budget was already spent), which callers may log.
    pub fn pace(&mut self, nominal_fps: f64) -> Duration {
        let elapsed = self.last_tic.elapsed();
        let wait = residual_sleep(elapsed, nominal_fps);
        if !wait.is_zero() {
            std::thread::sleep(wait);
        }
        self.last_tic = Instant::now();
        wait
    }
}

impl Default for FramePacer {
    fn default() -> Self {
        Self::new()
    }
}
