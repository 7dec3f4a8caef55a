// SPDX-License-Identifier: MPL-2.0
//! Real-time playback synchronization engine.
//!
//! Replays a pre-recorded video (and optionally a screen-capture video and
//! an audio track) through virtual device sinks so a live viewer sees
//! correctly paced, audio-locked video - a live feed, not a file replay.
//!
//! # Synchronization Strategy
//!
//! Audio playback drives the timing because:
//! - Audio discontinuities are more noticeable than video frame drops
//! - The audio loop's start instant provides a stable wall-clock reference
//! - Video frames can be dropped to match the audio timeline
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐    start instant     ┌──────────────┐
//! │ Microphone   │─────────────────────▶│ Master Clock │
//! │ loop (helper)│                      └──────┬───────┘
//! └──────────────┘                             │ target frame index
//!                                              ▼
//! ┌──────────────┐    ┌────────────┐    ┌──────────────┐    ┌────────┐
//! │ Frame Source │───▶│ Drift      │───▶│ Frame Pacer  │───▶│ Camera │
//! │ (FFmpeg)     │    │ Corrector  │    │ (residual    │    │ sink   │
//! └──────────────┘    │ (skip?)    │    │  sleep)      │    └────────┘
//!                     └────────────┘    └──────────────┘
//! ```
//!
//! A single control thread drives the video loop; the audio and screen
//! loops are independently scheduled helper processes. The only shared
//! state is the immutable master clock instant captured once at start.

pub mod clock;
pub mod convert;
pub mod drift;
pub mod pacer;
pub mod session;

pub use clock::{target_frame_index, MasterClock};
pub use drift::should_skip;
pub use pacer::FramePacer;
pub use session::{Session, SessionOutcome, SessionState};
