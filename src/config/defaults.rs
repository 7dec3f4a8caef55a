// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for session configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the session. Constants are organized by category.

// ==========================================================================
// Device Defaults
// ==========================================================================

/// Default virtual camera device node (v4l2-loopback).
pub const DEFAULT_CAMERA_DEVICE: &str = "/dev/video2";

/// Default virtual microphone sink path (named pipe consumed by the
/// loopback microphone module).
pub const DEFAULT_MICROPHONE_DEVICE: &str = "/tmp/virtmic";

// ==========================================================================
// Timing Defaults
// ==========================================================================

/// Fallback frame rate when the container reports none.
pub const FALLBACK_FPS: f64 = 30.0;

// ==========================================================================
// Helper Process Defaults
// ==========================================================================

/// Program used by the audio-play helper loop.
pub const AUDIO_PLAY_HELPER: &str = "ffmpeg";

/// Program used by the video-play (screen) helper loop.
pub const VIDEO_PLAY_HELPER: &str = "ffplay";
