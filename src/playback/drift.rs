// SPDX-License-Identifier: MPL-2.0
//! Drift correction: the per-tick skip-or-deliver decision.
//!
//! On every tick the elapsed master-clock time is converted into a target
//! frame index and compared against the frames already consumed. The
//! policy only ever skips forward to catch up; it never rewinds or
//! duplicates frames to slow delivery down - slow-down is handled entirely
//! by the frame pacer's sleep.
//!
//! A skip is an expected, recoverable event (the session is merely
//! starving the sink of one frame), so it is surfaced as a debug-level
//! diagnostic and never as an error.

use std::time::Duration;

use crate::playback::clock::target_frame_index;

/// Decides whether the current frame must be skipped.
///
/// Computes `target_index = floor(elapsed * nominal_fps)` and compares it
/// against `frames_already_read`:
///
/// - `target_index <= frames_already_read`: skip - re-read the next frame
///   without delivering the current one, so the video catches up to where
///   the audio already is. Equality counts as "not yet due", biasing
///   toward catching up rather than front-running the audio.
/// - `target_index > frames_already_read`: deliver.
#[must_use]
pub fn should_skip(elapsed: Duration, nominal_fps: f64, frames_already_read: u64) -> bool {
    target_frame_index(elapsed, nominal_fps) <= frames_already_read
}
