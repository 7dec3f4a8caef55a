// SPDX-License-Identifier: MPL-2.0
//! Session lifecycle: startup ordering, the video pacing loop, and scoped
//! teardown.
//!
//! Startup order is significant and fixed: the frame source is opened
//! first (so dimensions and rate are known), then the screen loop (if
//! configured) and the microphone loop are started and their start
//! instants captured, and only then does the video pacing loop begin.
//!
//! State machine: `Starting -> Streaming -> {Completed | Failed}`. Every
//! exit path runs the same scoped teardown: the frame source is released,
//! and on failure the spawned helper processes are additionally signalled
//! to terminate so they do not outlive the session holding the virtual
//! devices open. There is no automatic retry; a failed session is surfaced
//! to the operator and must be restarted externally.

use crate::config::SessionConfig;
use crate::domain::StreamKind;
use crate::error::{Error, PlaybackError, Result};
use crate::playback::clock::MasterClock;
use crate::playback::convert;
use crate::playback::drift;
use crate::playback::pacer::FramePacer;
use crate::sink::{CameraSink, HelperProcess, MicrophoneLoop, ScreenLoop, V4l2Camera};
use crate::source::ffmpeg::SourceOptions;
use crate::source::{FfmpegFrameSource, FrameSource};

/// Lifecycle state of a playback session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Collaborators are being opened and background loops started.
    Starting,
    /// The video pacing loop is running.
    Streaming,
    /// The frame source was exhausted; graceful exit.
    Completed,
    /// An unrecoverable error halted the session.
    Failed,
}

/// Terminal status of a finished session.
#[derive(Debug, Clone)]
pub enum SessionOutcome {
    /// The frame source was exhausted.
    Completed,
    /// An unrecoverable error halted the session.
    Failed(PlaybackError),
}

/// One playback session: owns the frame source, the camera sink, the
/// helper-process handles, and the master clock for its whole lifetime.
pub struct Session {
    source: Box<dyn FrameSource>,
    camera: Box<dyn CameraSink>,
    helpers: Vec<Box<dyn HelperProcess>>,
    master_clock: MasterClock,
    pacer: FramePacer,
    nominal_fps: f64,
    skip_enabled: bool,
    frames_delivered: u64,
    state: SessionState,
}

impl Session {
    /// Opens all collaborators in the fixed startup order and returns a
    /// session ready to [`run`](Self::run).
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration names no video source, or if
    /// any source, device, or helper process cannot be opened. All such
    /// failures are fatal; nothing is retried.
    pub fn start(config: &SessionConfig) -> Result<Self> {
        // 1. Frame source first: dimensions and rate gate everything else.
        let video_path = config
            .video_source
            .as_ref()
            .ok_or_else(|| Error::Config("no video source configured".to_string()))?;
        let options = SourceOptions {
            forced_size: config.forced_size,
            forced_fps: config.forced_fps,
        };
        let source = FfmpegFrameSource::open(video_path, options)?;
        log::info!(
            "opened {} ({}x{} @ {:.3} fps)",
            video_path.display(),
            source.width(),
            source.height(),
            source.fps()
        );

        let camera = V4l2Camera::open(config.camera_device(), source.width(), source.height())?;
        log::info!("camera sink ready on {}", camera.device_path().display());

        let mut helpers: Vec<Box<dyn HelperProcess>> = Vec::new();

        // 2. Screen loop (dual-stream variant) before the microphone loop.
        if let Some(screen_path) = &config.screen_source {
            let screen = ScreenLoop::start(screen_path)?;
            let (_, helper) = screen.into_helper();
            helpers.push(Box::new(helper));
            log::info!(
                "{} loop started for {}",
                StreamKind::Screen,
                screen_path.display()
            );
        }

        // 3. Microphone loop: its start instant is the master clock.
        let audio_path = config
            .audio_source()
            .ok_or_else(|| Error::Config("no audio source configured".to_string()))?;
        let microphone = MicrophoneLoop::start(&audio_path, config.microphone_device())?;
        let (start_instant, helper) = microphone.into_helper();
        helpers.push(Box::new(helper));
        log::info!(
            "{} loop started for {}; master clock anchored",
            StreamKind::Audio,
            audio_path.display()
        );

        let nominal_fps = source.fps();
        Ok(Self::assemble(
            Box::new(source),
            Box::new(camera),
            helpers,
            MasterClock::new(start_instant),
            nominal_fps,
            config.skip_enabled,
        ))
    }

    /// Wires a session from already-started collaborators.
    ///
    /// [`start`](Self::start) is the production path; this constructor
    /// exists so the loop and teardown logic can be exercised against
    /// substitute sources and sinks.
    #[must_use]
    pub fn assemble(
        source: Box<dyn FrameSource>,
        camera: Box<dyn CameraSink>,
        helpers: Vec<Box<dyn HelperProcess>>,
        master_clock: MasterClock,
        nominal_fps: f64,
        skip_enabled: bool,
    ) -> Self {
        Self {
            source,
            camera,
            helpers,
            master_clock,
            pacer: FramePacer::new(),
            nominal_fps,
            skip_enabled,
            frames_delivered: 0,
            state: SessionState::Starting,
        }
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Frames delivered to the camera sink so far.
    #[must_use]
    pub fn frames_delivered(&self) -> u64 {
        self.frames_delivered
    }

    /// Drives the video pacing loop to its terminal state.
    ///
    /// Runs until the frame source is exhausted (`Completed`) or an
    /// unrecoverable error occurs (`Failed`), then performs the scoped
    /// teardown for that exit path.
    pub fn run(&mut self) -> SessionOutcome {
        self.state = SessionState::Streaming;
        log::info!(
            "{} stream running at {:.3} fps",
            StreamKind::Webcam,
            self.nominal_fps
        );

        match self.stream_loop() {
            Ok(()) => {
                self.state = SessionState::Completed;
                log::info!(
                    "completed: {} frames read, {} delivered",
                    self.source.frames_read(),
                    self.frames_delivered
                );
                self.teardown(false);
                SessionOutcome::Completed
            }
            Err(err) => {
                self.state = SessionState::Failed;
                log::error!("session failed: {err}");
                self.teardown(true);
                SessionOutcome::Failed(err)
            }
        }
    }

    /// The hot loop. Its only suspension point is the pacer's bounded
    /// sleep; frame reads may block on decoding but that cost is absorbed
    /// into the pacer's elapsed measurement.
    fn stream_loop(&mut self) -> std::result::Result<(), PlaybackError> {
        loop {
            let frame = match self.source.read()? {
                Some(frame) => frame,
                None => return Ok(()),
            };

            if self.skip_enabled
                && drift::should_skip(
                    self.master_clock.elapsed(),
                    self.nominal_fps,
                    self.frames_delivered,
                )
            {
                log::debug!(
                    "skipping frame (read {}, delivered {})",
                    self.source.frames_read(),
                    self.frames_delivered
                );
                continue;
            }

            // Convert only frames that survive the skip decision; the cost
            // lands before the pacer's tic so it is absorbed into the
            // residual-sleep measurement.
            let frame = convert::rgb_to_bgr(&frame);
            let wait = self.pacer.pace(self.nominal_fps);
            self.camera.schedule_frame(&frame)?;
            self.frames_delivered += 1;
            log::trace!(
                "delivered frame {} after {:?} wait",
                self.frames_delivered,
                wait
            );
        }
    }

    /// Scoped teardown, guaranteed to run on every exit path.
    ///
    /// Releases the frame source; on failure additionally signals every
    /// spawned helper process to terminate.
    fn teardown(&mut self, failed: bool) {
        self.source.release();
        if failed {
            for helper in &mut self.helpers {
                log::info!("signalling {} helper to terminate", helper.name());
                helper.terminate();
            }
        }
    }
}
