// SPDX-License-Identifier: MPL-2.0
//! Stream identity for diagnostics and teardown reporting.

use std::fmt;

/// Identifies one media track being played through a virtual device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamKind {
    /// The main video track, delivered to the virtual camera.
    Webcam,
    /// The optional screen-capture track, rendered to its own virtual output.
    Screen,
    /// The audio track, played into the virtual microphone.
    Audio,
}

impl fmt::Display for StreamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreamKind::Webcam => write!(f, "webcam"),
            StreamKind::Screen => write!(f, "screen"),
            StreamKind::Audio => write!(f, "audio"),
        }
    }
}
