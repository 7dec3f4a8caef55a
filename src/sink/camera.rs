// SPDX-License-Identifier: MPL-2.0
//! Virtual camera adapter writing raw frames to a v4l2-loopback device node.
//!
//! The device is configured out of band (`modprobe v4l2loopback ...`) to
//! accept `BGR24` at the session's frame size; this adapter only pushes
//! bytes. Writes are treated as a best-effort enqueue: the kernel module
//! buffers the most recent frame for OS-level consumers.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::domain::{PixelLayout, VideoFrame};
use crate::error::PlaybackError;
use crate::sink::CameraSink;

/// Virtual camera device sink.
///
/// Exclusively owned by the video loop for the session lifetime.
pub struct V4l2Camera {
    /// Device node, kept for diagnostics.
    device_path: PathBuf,
    /// Open device handle.
    device: File,
    /// Frame width the device was opened for.
    width: u32,
    /// Frame height the device was opened for.
    height: u32,
}

impl V4l2Camera {
    /// Opens the virtual camera device for writing.
    ///
    /// # Errors
    ///
    /// Returns [`PlaybackError::SourceUnavailable`] if the device node
    /// cannot be opened. No retry; this is fatal for the session.
    pub fn open<P: AsRef<Path>>(
        device_path: P,
        width: u32,
        height: u32,
    ) -> Result<Self, PlaybackError> {
        let device_path = device_path.as_ref().to_path_buf();
        let device = OpenOptions::new()
            .write(true)
            .open(&device_path)
            .map_err(|e| {
                PlaybackError::SourceUnavailable(format!(
                    "Failed to open camera device {}: {e}",
                    device_path.display()
                ))
            })?;

        Ok(Self {
            device_path,
            device,
            width,
            height,
        })
    }

    /// Returns the device node this camera writes to.
    #[must_use]
    pub fn device_path(&self) -> &Path {
        &self.device_path
    }
}

impl CameraSink for V4l2Camera {
    fn schedule_frame(&mut self, frame: &VideoFrame) -> Result<(), PlaybackError> {
        if frame.layout() != PixelLayout::Bgr24 {
            return Err(PlaybackError::SinkWriteFailure(format!(
                "camera device {} expects BGR24, got {:?}",
                self.device_path.display(),
                frame.layout()
            )));
        }
        if frame.width() != self.width || frame.height() != self.height {
            return Err(PlaybackError::SinkWriteFailure(format!(
                "frame size {}x{} does not match device size {}x{}",
                frame.width(),
                frame.height(),
                self.width,
                self.height
            )));
        }

        self.device.write_all(frame.data()).map_err(|e| {
            PlaybackError::SinkWriteFailure(format!(
                "Failed to write frame to {}: {e}",
                self.device_path.display()
            ))
        })
    }
}
