// SPDX-License-Identifier: MPL-2.0
//! Virtual microphone sink driven by an audio-play helper process.
//!
//! Starting the loop captures the wall-clock instant playback was judged to
//! have begun. That instant is the session's **master clock**: every frame
//! index calculation for every stream derives from it, so it is taken as
//! close as possible to the moment the helper starts consuming samples -
//! immediately after the spawn returns. Any offset here biases every
//! subsequent pacing decision for the entire session.

use std::path::Path;
use std::time::Instant;

use crate::error::PlaybackError;
use crate::sink::helper::PlayHelper;
use crate::sink::HelperProcess;

/// Name used for the audio helper in logs and teardown diagnostics.
pub const HELPER_NAME: &str = "audio-play";

/// Independent audio playback loop against a virtual microphone sink.
pub struct MicrophoneLoop {
    helper: PlayHelper,
    start_instant: Instant,
}

impl MicrophoneLoop {
    /// Begins asynchronous audio playback of `source_path` into the virtual
    /// microphone at `device_path` and records the start instant.
    ///
    /// The helper decodes the file's audio track and writes raw samples,
    /// paced to real time (`-re`), into the device pipe.
    ///
    /// # Errors
    ///
    /// Returns [`PlaybackError::SourceUnavailable`] if the helper cannot be
    /// spawned. No retry; this is fatal for the session.
    pub fn start<P: AsRef<Path>, Q: AsRef<Path>>(
        source_path: P,
        device_path: Q,
    ) -> Result<Self, PlaybackError> {
        let args = vec![
            "-nostdin".to_string(),
            "-re".to_string(),
            "-i".to_string(),
            source_path.as_ref().display().to_string(),
            "-vn".to_string(),
            "-f".to_string(),
            "s16le".to_string(),
            "-ar".to_string(),
            "44100".to_string(),
            "-ac".to_string(),
            "2".to_string(),
            "-y".to_string(),
            device_path.as_ref().display().to_string(),
        ];
        let helper = PlayHelper::spawn(
            HELPER_NAME,
            crate::config::defaults::AUDIO_PLAY_HELPER,
            &args,
        )?;
        let start_instant = Instant::now();

        Ok(Self {
            helper,
            start_instant,
        })
    }

    /// The wall-clock instant audio playback began.
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

impl HelperProcess for MicrophoneLoop {
    fn name(&self) -> &str {
        self.helper.name()
    }

    fn terminate(&mut self) {
        self.helper.terminate();
    }
}
