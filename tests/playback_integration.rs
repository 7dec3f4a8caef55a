// SPDX-License-Identifier: MPL-2.0
//! Integration tests for the playback session lifecycle.
//!
//! These drive a full session through the public API with substitute
//! sources and sinks, checking the terminal states and the scoped teardown
//! behavior on both the graceful and the failed exit path.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use replaycam::domain::{PixelLayout, VideoFrame};
use replaycam::error::PlaybackError;
use replaycam::playback::{MasterClock, Session, SessionOutcome, SessionState};
use replaycam::sink::{CameraSink, HelperProcess};
use replaycam::source::FrameSource;

struct FileOfFrames {
    remaining: u64,
    cursor: u64,
    releases: Arc<AtomicU64>,
}

impl FrameSource for FileOfFrames {
    fn read(&mut self) -> Result<Option<VideoFrame>, PlaybackError> {
        if self.remaining == 0 {
            return Ok(None);
        }
        // Stand-in for decode cost; keeps the wall clock moving between
        // reads the way a real source does.
        std::thread::sleep(Duration::from_micros(300));
        self.remaining -= 1;
        self.cursor += 1;
        Ok(Some(VideoFrame::from_rgb(4, 4, vec![7u8; 48])))
    }

    fn fps(&self) -> f64 {
        1000.0
    }

    fn width(&self) -> u32 {
        4
    }

    fn height(&self) -> u32 {
        4
    }

    fn frames_read(&self) -> u64 {
        self.cursor
    }

    fn release(&mut self) {
        self.releases.fetch_add(1, Ordering::SeqCst);
    }
}

struct RecordingCamera {
    layouts_seen: Arc<AtomicU64>,
    delivered: Arc<AtomicU64>,
    fail_on_delivery: Option<u64>,
}

impl CameraSink for RecordingCamera {
    fn schedule_frame(&mut self, frame: &VideoFrame) -> Result<(), PlaybackError> {
        if frame.layout() == PixelLayout::Bgr24 {
            self.layouts_seen.fetch_add(1, Ordering::SeqCst);
        }
        let n = self.delivered.fetch_add(1, Ordering::SeqCst) + 1;
        if Some(n) == self.fail_on_delivery {
            return Err(PlaybackError::SinkWriteFailure(
                "virtual device disappeared".to_string(),
            ));
        }
        Ok(())
    }
}

struct SignalCountingHelper {
    name: &'static str,
    terminations: Arc<AtomicU64>,
}

impl HelperProcess for SignalCountingHelper {
    fn name(&self) -> &str {
        self.name
    }

    fn terminate(&mut self) {
        self.terminations.fetch_add(1, Ordering::SeqCst);
    }
}

struct Fixture {
    session: Session,
    releases: Arc<AtomicU64>,
    delivered: Arc<AtomicU64>,
    bgr_deliveries: Arc<AtomicU64>,
    terminations: Arc<AtomicU64>,
}

fn fixture(frames: u64, fail_on_delivery: Option<u64>) -> Fixture {
    let releases = Arc::new(AtomicU64::new(0));
    let delivered = Arc::new(AtomicU64::new(0));
    let bgr_deliveries = Arc::new(AtomicU64::new(0));
    let terminations = Arc::new(AtomicU64::new(0));

    let source = FileOfFrames {
        remaining: frames,
        cursor: 0,
        releases: Arc::clone(&releases),
    };
    let camera = RecordingCamera {
        layouts_seen: Arc::clone(&bgr_deliveries),
        delivered: Arc::clone(&delivered),
        fail_on_delivery,
    };
    let helpers: Vec<Box<dyn HelperProcess>> = vec![
        Box::new(SignalCountingHelper {
            name: "audio-play",
            terminations: Arc::clone(&terminations),
        }),
        Box::new(SignalCountingHelper {
            name: "video-play",
            terminations: Arc::clone(&terminations),
        }),
    ];

    let session = Session::assemble(
        Box::new(source),
        Box::new(camera),
        helpers,
        MasterClock::new(Instant::now()),
        1000.0,
        true,
    );

    Fixture {
        session,
        releases,
        delivered,
        bgr_deliveries,
        terminations,
    }
}

#[test]
fn graceful_completion_releases_source_once_and_leaves_helpers_alone() {
    let mut fx = fixture(50, None);

    let outcome = fx.session.run();

    assert!(matches!(outcome, SessionOutcome::Completed));
    assert_eq!(fx.session.state(), SessionState::Completed);
    assert_eq!(fx.releases.load(Ordering::SeqCst), 1);
    assert_eq!(fx.terminations.load(Ordering::SeqCst), 0);
}

#[test]
fn sink_failure_signals_every_helper_and_still_releases_once() {
    let mut fx = fixture(100_000, Some(1));

    let outcome = fx.session.run();

    match outcome {
        SessionOutcome::Failed(PlaybackError::SinkWriteFailure(msg)) => {
            assert!(msg.contains("virtual device"));
        }
        other => panic!("expected sink failure, got {other:?}"),
    }
    assert_eq!(fx.session.state(), SessionState::Failed);
    assert_eq!(fx.releases.load(Ordering::SeqCst), 1);
    // Both the audio-play and the video-play helper get the signal.
    assert_eq!(fx.terminations.load(Ordering::SeqCst), 2);
}

#[test]
fn every_delivered_frame_arrives_in_the_camera_layout() {
    let mut fx = fixture(100, None);

    let outcome = fx.session.run();

    assert!(matches!(outcome, SessionOutcome::Completed));
    let delivered = fx.delivered.load(Ordering::SeqCst);
    assert!(delivered > 0, "some frames must be due for delivery");
    assert_eq!(
        delivered,
        fx.bgr_deliveries.load(Ordering::SeqCst),
        "all delivered frames must be BGR24"
    );
    assert_eq!(fx.session.frames_delivered(), delivered);
}

#[test]
fn decode_failure_is_fatal_and_terminates_helpers() {
    struct PoisonedSource {
        releases: Arc<AtomicU64>,
    }

    impl FrameSource for PoisonedSource {
        fn read(&mut self) -> Result<Option<VideoFrame>, PlaybackError> {
            Err(PlaybackError::DecodeFailure("corrupt packet".to_string()))
        }

        fn fps(&self) -> f64 {
            30.0
        }

        fn width(&self) -> u32 {
            4
        }

        fn height(&self) -> u32 {
            4
        }

        fn frames_read(&self) -> u64 {
            0
        }

        fn release(&mut self) {
            self.releases.fetch_add(1, Ordering::SeqCst);
        }
    }

    let releases = Arc::new(AtomicU64::new(0));
    let terminations = Arc::new(AtomicU64::new(0));
    let mut session = Session::assemble(
        Box::new(PoisonedSource {
            releases: Arc::clone(&releases),
        }),
        Box::new(RecordingCamera {
            layouts_seen: Arc::new(AtomicU64::new(0)),
            delivered: Arc::new(AtomicU64::new(0)),
            fail_on_delivery: None,
        }),
        vec![Box::new(SignalCountingHelper {
            name: "audio-play",
            terminations: Arc::clone(&terminations),
        })],
        MasterClock::new(Instant::now()),
        30.0,
        true,
    );

    let outcome = session.run();

    assert!(matches!(
        outcome,
        SessionOutcome::Failed(PlaybackError::DecodeFailure(_))
    ));
    assert_eq!(releases.load(Ordering::SeqCst), 1);
    assert_eq!(terminations.load(Ordering::SeqCst), 1);
}
