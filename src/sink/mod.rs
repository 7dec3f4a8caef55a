// SPDX-License-Identifier: MPL-2.0
//! Device sink ports and their virtual-device adapters.
//!
//! Three sinks exist per session, each exclusively owned by one loop:
//!
//! - the virtual **camera** ([`V4l2Camera`](camera::V4l2Camera)), fed frame
//!   by frame from the paced video loop;
//! - the virtual **microphone** ([`MicrophoneLoop`](microphone::MicrophoneLoop)),
//!   driven by an independently scheduled audio-play helper process;
//! - the optional **screen** output ([`ScreenLoop`](screen::ScreenLoop)),
//!   driven by a video-play helper process.
//!
//! The helper-backed sinks capture the wall-clock instant their playback
//! began; the microphone's instant becomes the session's master clock.

pub mod camera;
pub mod helper;
pub mod microphone;
pub mod screen;

pub use camera::V4l2Camera;
pub use helper::PlayHelper;
pub use microphone::MicrophoneLoop;
pub use screen::ScreenLoop;

use crate::domain::VideoFrame;
use crate::error::PlaybackError;

/// Port for the virtual camera device.
///
/// `schedule_frame` is a best-effort enqueue of one frame; the device (not
/// this interface) decides when OS-level consumers see it.
pub trait CameraSink: Send {
    /// Enqueues one frame for the virtual camera device.
    ///
    /// # Errors
    ///
    /// Returns [`PlaybackError::SinkWriteFailure`] if the device rejects the
    /// write. This is fatal: the session cannot continue without device
    /// access.
    fn schedule_frame(&mut self, frame: &VideoFrame) -> Result<(), PlaybackError>;
}

/// Port for an externally spawned playback helper process.
///
/// The orchestrator signals termination on failed sessions so helpers
/// cannot outlive the session holding virtual device handles open.
pub trait HelperProcess: Send {
    /// Human-readable helper name for diagnostics.
    fn name(&self) -> &str;

    /// Sends a termination signal to the helper. Idempotent.
    fn terminate(&mut self);
}
