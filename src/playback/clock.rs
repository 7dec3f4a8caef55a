// SPDX-License-Identifier: MPL-2.0
//! The session's master clock.
//!
//! Exactly one master clock instant exists per session: the wall-clock
//! moment the audio loop began producing output. It is set once and
//! read-only thereafter, which is the only synchronization the video loop
//! and the background loops need - no locks, no message passing.

use std::time::{Duration, Instant};

/// Converts elapsed master-clock time into a target frame index.
///
/// `target_index = floor(elapsed * fps)`. Monotonically non-decreasing as
/// wall-clock time advances; recomputed every tick, never stored.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn target_frame_index(elapsed: Duration, nominal_fps: f64) -> u64 {
    (elapsed.as_secs_f64() * nominal_fps).floor() as u64
}

/// Immutable wall-clock reference for one playback session.
#[derive(Debug, Clone, Copy)]
pub struct MasterClock {
    /// The instant the audio loop was judged to have begun playback.
    start: Instant,
}

impl MasterClock {
    /// Creates a master clock anchored at the given start instant.
    #[must_use]
    pub fn new(start: Instant) -> Self {
        Self { start }
    }

    /// Elapsed master-clock time.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// The frame index the stream should currently be at.
    #[must_use]
    pub fn target_frame_index(&self, nominal_fps: f64) -> u64 {
        target_frame_index(self.elapsed(), nominal_fps)
    }
}
