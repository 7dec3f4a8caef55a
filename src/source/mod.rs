// SPDX-License-Identifier: MPL-2.0
//! Frame source port definition.
//!
//! This module defines the [`FrameSource`] trait the playback loop consumes.
//! Infrastructure adapters (like `FFmpeg`) implement this trait.
//!
//! # Design Notes
//!
//! - The source is **stateful** - it maintains a monotonic read cursor
//! - Reading may block on I/O or decoding; that cost is absorbed into the
//!   pacer's elapsed-time measurement rather than scheduled explicitly
//! - Audio playback is handled separately by the microphone loop

pub mod ffmpeg;

pub use ffmpeg::FfmpegFrameSource;

use crate::domain::VideoFrame;
use crate::error::PlaybackError;

/// Port for reading decoded video frames on demand.
///
/// # Thread Safety
///
/// Implementations must be `Send` for use across threads. The source is
/// **not** required to be `Sync`; it is exclusively owned by the video loop
/// for the session lifetime.
///
/// # Lifecycle
///
/// 1. Open the source (adapter-specific constructor, so dimensions and
///    frame rate are known before any background loop starts)
/// 2. Call `read()` repeatedly until it returns `Ok(None)`
/// 3. Call `release()` at teardown - on every exit path, exactly once in
///    effect (the call itself is idempotent)
pub trait FrameSource: Send {
    /// Reads the next decoded frame.
    ///
    /// Returns `Ok(Some(frame))` for each decoded frame, or `Ok(None)` when
    /// the end of the stream is reached. Each successful read advances the
    /// cursor reported by [`frames_read`](Self::frames_read).
    ///
    /// # Errors
    ///
    /// Returns [`PlaybackError::DecodeFailure`] if decoding fails. This is
    /// fatal for the session.
    fn read(&mut self) -> Result<Option<VideoFrame>, PlaybackError>;

    /// Nominal frame rate of the stream.
    fn fps(&self) -> f64;

    /// Output frame width in pixels.
    fn width(&self) -> u32;

    /// Output frame height in pixels.
    fn height(&self) -> u32;

    /// Number of frames read so far (monotonically increasing).
    fn frames_read(&self) -> u64;

    /// Releases the underlying decoder resources.
    ///
    /// Idempotent: calling it a second time produces no error and no
    /// duplicate side effects.
    fn release(&mut self);
}

#[cfg(test)]
mod tests {
    use super::*;

    // Test that the trait is object-safe
    fn _assert_object_safe(_: &dyn FrameSource) {}

    struct MockSource {
        remaining: u32,
        cursor: u64,
        released: u32,
    }

    impl MockSource {
        fn new(frames: u32) -> Self {
            Self {
                remaining: frames,
                cursor: 0,
                released: 0,
            }
        }
    }

    impl FrameSource for MockSource {
        fn read(&mut self) -> Result<Option<VideoFrame>, PlaybackError> {
            if self.remaining == 0 {
                return Ok(None);
            }
            self.remaining -= 1;
            self.cursor += 1;
            Ok(Some(VideoFrame::from_rgb(2, 2, vec![0u8; 12])))
        }

        fn fps(&self) -> f64 {
            30.0
        }

        fn width(&self) -> u32 {
            2
        }

        fn height(&self) -> u32 {
            2
        }

        fn frames_read(&self) -> u64 {
            self.cursor
        }

        fn release(&mut self) {
            if self.released == 0 {
                self.released = 1;
            }
        }
    }

    #[test]
    fn mock_source_lifecycle() {
        let mut source = MockSource::new(2);
        assert_eq!(source.frames_read(), 0);

        assert!(source.read().unwrap().is_some());
        assert_eq!(source.frames_read(), 1);

        assert!(source.read().unwrap().is_some());
        assert!(source.read().unwrap().is_none(), "source should be exhausted");
        assert_eq!(source.frames_read(), 2);
    }

    #[test]
    fn release_is_idempotent() {
        let mut source = MockSource::new(0);
        source.release();
        source.release();
        assert_eq!(source.released, 1);
    }
}
