// SPDX-License-Identifier: MPL-2.0
//! Screen-capture playback loop for the dual-stream variant.
//!
//! Same contract as the microphone loop but for a second video stream
//! rendered to its own virtual output by a video-play helper process. The
//! loop runs independently for the session's duration; the only
//! coordination with the rest of the session is its immutable start
//! instant.

use std::path::Path;
use std::time::Instant;

use crate::error::PlaybackError;
use crate::sink::helper::PlayHelper;
use crate::sink::HelperProcess;

/// Name used for the screen helper in logs and teardown diagnostics.
pub const HELPER_NAME: &str = "video-play";

/// Independent screen-capture playback loop.
pub struct ScreenLoop {
    helper: PlayHelper,
    start_instant: Instant,
}

impl ScreenLoop {
    /// Begins playback of the screen-capture file on its own virtual
    /// output and records the start instant.
    ///
    /// # Errors
    ///
    /// Returns [`PlaybackError::SourceUnavailable`] if the helper cannot be
    /// spawned. No retry; this is fatal for the session.
    pub fn start<P: AsRef<Path>>(source_path: P) -> Result<Self, PlaybackError> {
        let args = vec![
            "-loglevel".to_string(),
            "error".to_string(),
            "-an".to_string(),
            "-autoexit".to_string(),
            source_path.as_ref().display().to_string(),
        ];
        let helper = PlayHelper::spawn(
            HELPER_NAME,
            crate::config::defaults::VIDEO_PLAY_HELPER,
            &args,
        )?;
        let start_instant = Instant::now();

        Ok(Self {
            helper,
            start_instant,
        })
    }

    /// The wall-clock instant screen playback began.
    #[must_use]
    pub fn start_instant(&self) -> Instant {
        self.start_instant
    }

    /// Hands the helper handle to the orchestrator for teardown control.
    #[must_use]
    pub fn into_helper(self) -> (Instant, PlayHelper) {
        (self.start_instant, self.helper)
    }
}

impl HelperProcess for ScreenLoop {
    fn name(&self) -> &str {
        self.helper.name()
    }

    fn terminate(&mut self) {
        self.helper.terminate();
    }
}
