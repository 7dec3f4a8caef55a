// SPDX-License-Identifier: MPL-2.0
//! `FFmpeg` adapter implementing the [`FrameSource`] port trait.
//!
//! This module provides [`FfmpegFrameSource`], a synchronous frame reader
//! that wraps `FFmpeg` for on-demand video decoding.
//!
//! # Design Notes
//!
//! - The adapter provides a simple synchronous interface; pacing happens in
//!   the playback loop, never here
//! - Output frames are scaled to `RGB24`, optionally to a forced size
//! - The reported frame rate can be overridden, since some screen-capture
//!   containers carry a bogus nominal rate

use std::path::Path;
use std::sync::Once;

use crate::domain::VideoFrame;
use crate::error::PlaybackError;
use crate::source::FrameSource;

/// Static flag to ensure FFmpeg is initialized only once.
static FFMPEG_INIT: Once = Once::new();

/// Initialize FFmpeg with appropriate log level.
///
/// This function is safe to call multiple times - initialization will only
/// happen once thanks to `std::sync::Once`. It sets the FFmpeg log level
/// to ERROR to suppress warning messages during long playback sessions.
pub fn init_ffmpeg() -> Result<(), PlaybackError> {
    let mut init_result: Result<(), PlaybackError> = Ok(());

    FFMPEG_INIT.call_once(|| {
        if let Err(e) = ffmpeg_next::init() {
            init_result = Err(PlaybackError::SourceUnavailable(format!(
                "FFmpeg initialization failed: {e}"
            )));
            return;
        }

        // SAFETY: av_log_set_level is thread-safe and only affects logging
        unsafe {
            ffmpeg_next::ffi::av_log_set_level(ffmpeg_next::ffi::AV_LOG_ERROR);
        }
    });

    init_result
}

/// Options applied when opening a frame source.
#[derive(Debug, Clone, Copy, Default)]
pub struct SourceOptions {
    /// Scale output frames to this size instead of the native size.
    pub forced_size: Option<(u32, u32)>,
    /// Report this frame rate instead of the container's nominal rate.
    pub forced_fps: Option<f64>,
}

/// Internal decoder state that holds `FFmpeg` contexts.
///
/// This is kept separate so release() can drop all contexts at once while
/// the source itself stays usable for attribute reads.
struct DecoderState {
    /// Input format context.
    input_context: ffmpeg_next::format::context::Input,
    /// Video decoder.
    decoder: ffmpeg_next::decoder::Video,
    /// Video stream index.
    video_stream_index: usize,
    /// Source pixel format (for scaler creation).
    src_format: ffmpeg_next::format::Pixel,
    /// Native decoder dimensions (scaler input side).
    src_width: u32,
    src_height: u32,
}

// SAFETY: DecoderState contains FFmpeg types with internal raw pointers.
// These are safe to send between threads because:
// 1. FFmpeg's decoder/format contexts are thread-safe for single-threaded access per instance
// 2. We maintain exclusive access through Rust's ownership model
// 3. The source is only used from one thread at a time (move semantics)
unsafe impl Send for DecoderState {}

/// `FFmpeg`-based frame source implementing the [`FrameSource`] trait.
///
/// # Thread Safety
///
/// This type is `Send` but not `Sync` due to internal mutable state.
/// Create separate instances for concurrent streams.
pub struct FfmpegFrameSource {
    /// Decoder state; `None` once released.
    state: Option<DecoderState>,
    /// Output frame width in pixels.
    width: u32,
    /// Output frame height in pixels.
    height: u32,
    /// Nominal (or forced) frame rate.
    fps: f64,
    /// Frames read so far.
    frames_read: u64,
}

impl FfmpegFrameSource {
    /// Opens a video file for on-demand frame reading.
    ///
    /// # Errors
    ///
    /// Returns [`PlaybackError::SourceUnavailable`] if the file cannot be
    /// opened, contains no video stream, or the decoder cannot be created.
    pub fn open<P: AsRef<Path>>(path: P, options: SourceOptions) -> Result<Self, PlaybackError> {
        init_ffmpeg()?;

        let path = path.as_ref();
        let input_context = ffmpeg_next::format::input(path).map_err(|e| {
            PlaybackError::SourceUnavailable(format!("Failed to open {}: {e}", path.display()))
        })?;

        let video_stream = input_context
            .streams()
            .best(ffmpeg_next::media::Type::Video)
            .ok_or_else(|| {
                PlaybackError::SourceUnavailable(format!(
                    "No video stream found in {}",
                    path.display()
                ))
            })?;
        let video_stream_index = video_stream.index();

        // Get frame rate, falling back when the container reports none
        let rate = video_stream.avg_frame_rate();
        let nominal_fps = if rate.denominator() != 0 {
            f64::from(rate.numerator()) / f64::from(rate.denominator())
        } else {
            crate::config::defaults::FALLBACK_FPS
        };
        let fps = options.forced_fps.unwrap_or(nominal_fps);

        let context_decoder =
            ffmpeg_next::codec::context::Context::from_parameters(video_stream.parameters())
                .map_err(|e| {
                    PlaybackError::SourceUnavailable(format!("Failed to create codec context: {e}"))
                })?;
        let decoder = context_decoder.decoder().video().map_err(|e| {
            PlaybackError::SourceUnavailable(format!("Failed to create video decoder: {e}"))
        })?;

        let src_width = decoder.width();
        let src_height = decoder.height();
        if src_width == 0 || src_height == 0 {
            return Err(PlaybackError::SourceUnavailable(format!(
                "Invalid video dimensions: {src_width}x{src_height} (possibly unsupported format)"
            )));
        }
        let src_format = decoder.format();

        let (width, height) = options.forced_size.unwrap_or((src_width, src_height));

        Ok(Self {
            state: Some(DecoderState {
                input_context,
                decoder,
                video_stream_index,
                src_format,
                src_width,
                src_height,
            }),
            width,
            height,
            fps,
            frames_read: 0,
        })
    }

    /// Creates a fresh scaler for RGB conversion at the output size.
    fn create_scaler(
        src_format: ffmpeg_next::format::Pixel,
        src_width: u32,
        src_height: u32,
        dst_width: u32,
        dst_height: u32,
    ) -> Result<ffmpeg_next::software::scaling::Context, PlaybackError> {
        ffmpeg_next::software::scaling::Context::get(
            src_format,
            src_width,
            src_height,
            ffmpeg_next::format::Pixel::RGB24,
            dst_width,
            dst_height,
            ffmpeg_next::software::scaling::Flags::BILINEAR,
        )
        .map_err(|e| PlaybackError::DecodeFailure(format!("Failed to create scaler: {e}")))
    }

    /// Extracts RGB data from a scaled frame, handling stride correctly.
    #[allow(clippy::cast_possible_truncation)] // stride is always < u32::MAX for video frames
    fn extract_rgb_data(frame: &ffmpeg_next::frame::Video) -> Vec<u8> {
        let width = frame.width();
        let height = frame.height();
        let data = frame.data(0);
        let stride = frame.stride(0);

        let mut rgb_bytes = Vec::with_capacity((width * height * 3) as usize);
        for y in 0..height {
            let row_start = (y * stride as u32) as usize;
            let row_end = row_start + (width * 3) as usize;
            rgb_bytes.extend_from_slice(&data[row_start..row_end]);
        }

        rgb_bytes
    }

    /// Scales a decoded frame to the output size and wraps it for delivery.
    ///
    /// This is a static method to avoid borrow checker issues when both
    /// the decoder state and the cursor need to be touched in `read`.
    fn convert_frame_static(
        decoded_frame: &ffmpeg_next::frame::Video,
        scaler: &mut ffmpeg_next::software::scaling::Context,
        width: u32,
        height: u32,
    ) -> Result<VideoFrame, PlaybackError> {
        let mut rgb_frame = ffmpeg_next::frame::Video::empty();
        scaler
            .run(decoded_frame, &mut rgb_frame)
            .map_err(|e| PlaybackError::DecodeFailure(format!("Scaling failed: {e}")))?;

        let rgb_data = Self::extract_rgb_data(&rgb_frame);
        Ok(VideoFrame::from_rgb(width, height, rgb_data))
    }
}

impl FrameSource for FfmpegFrameSource {
    fn read(&mut self) -> Result<Option<VideoFrame>, PlaybackError> {
        // Extract scaler inputs up front so the state borrow stays short
        let (src_format, src_width, src_height, video_stream_index) = match self.state.as_ref() {
            Some(state) => (
                state.src_format,
                state.src_width,
                state.src_height,
                state.video_stream_index,
            ),
            // Released sources report end-of-stream rather than erroring so
            // a late read on the teardown path stays harmless.
            None => return Ok(None),
        };

        // Scaler is recreated per read (cheap relative to decode) so the
        // FFmpeg contexts stay droppable as one unit in release().
        let mut scaler =
            Self::create_scaler(src_format, src_width, src_height, self.width, self.height)?;

        // First try to drain a buffered frame
        let mut decoded_frame = ffmpeg_next::frame::Video::empty();
        {
            let state = self.state.as_mut().unwrap(); // Safe: checked above
            if state.decoder.receive_frame(&mut decoded_frame).is_ok() {
                let frame =
                    Self::convert_frame_static(&decoded_frame, &mut scaler, self.width, self.height)?;
                self.frames_read += 1;
                return Ok(Some(frame));
            }
        }

        // Process packets until we get a frame or reach end of stream
        loop {
            let state = self.state.as_mut().unwrap(); // Safe: checked above
            let packet_opt = state
                .input_context
                .packets()
                .find(|(stream, _)| stream.index() == video_stream_index);

            match packet_opt {
                Some((_, packet)) => {
                    if let Err(e) = state.decoder.send_packet(&packet) {
                        return Err(PlaybackError::DecodeFailure(format!(
                            "Packet send failed: {e}"
                        )));
                    }

                    if state.decoder.receive_frame(&mut decoded_frame).is_ok() {
                        let frame = Self::convert_frame_static(
                            &decoded_frame,
                            &mut scaler,
                            self.width,
                            self.height,
                        )?;
                        self.frames_read += 1;
                        return Ok(Some(frame));
                    }
                }
                None => {
                    // End of stream
                    return Ok(None);
                }
            }
        }
    }

    fn fps(&self) -> f64 {
        self.fps
    }

    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn frames_read(&self) -> u64 {
        self.frames_read
    }

    fn release(&mut self) {
        // Dropping the state closes the input and decoder contexts; a
        // second call finds None and does nothing.
        self.state = None;
    }
}
