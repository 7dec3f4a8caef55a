// SPDX-License-Identifier: MPL-2.0
//! Wrapper around an externally spawned playback helper process.
//!
//! The microphone and screen loops delegate actual playback to helper
//! programs (`ffmpeg` / `ffplay`) running against their own virtual device.
//! This wrapper owns the child handle, makes termination idempotent, and
//! kills the child on drop as a last resort so a panic in the video loop
//! cannot leak a process holding a device open.

use std::process::{Child, Command, Stdio};

use crate::error::PlaybackError;
use crate::sink::HelperProcess;

/// A spawned playback helper process.
pub struct PlayHelper {
    /// Helper name for diagnostics (e.g. "audio-play", "video-play").
    name: String,
    /// Child handle; `None` once terminated.
    child: Option<Child>,
}

impl PlayHelper {
    /// Spawns a helper process with the given program and arguments.
    ///
    /// Stdout/stderr are discarded; the helper's only observable output is
    /// the virtual device it plays into.
    ///
    /// # Errors
    ///
    /// Returns [`PlaybackError::SourceUnavailable`] if the program cannot
    /// be spawned. No retry; this is fatal for the session.
    pub fn spawn(name: &str, program: &str, args: &[String]) -> Result<Self, PlaybackError> {
        let child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| {
                PlaybackError::SourceUnavailable(format!(
                    "Failed to spawn {name} helper ({program}): {e}"
                ))
            })?;

        log::info!("{name} helper started (pid {})", child.id());

        Ok(Self {
            name: name.to_string(),
            child: Some(child),
        })
    }
}

impl HelperProcess for PlayHelper {
    fn name(&self) -> &str {
        &self.name
    }

    fn terminate(&mut self) {
        if let Some(mut child) = self.child.take() {
            if let Err(e) = child.kill() {
                // Already exited is fine; anything else is only diagnostic,
                // the session is tearing down regardless.
                log::debug!("{} helper kill returned: {e}", self.name);
            }
            let _ = child.wait();
            log::info!("{} helper terminated", self.name);
        }
    }
}

impl Drop for PlayHelper {
    fn drop(&mut self) {
        self.terminate();
    }
}
