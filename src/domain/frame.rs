// SPDX-License-Identifier: MPL-2.0
//! Decoded pixel buffer types shared between the frame source and the
//! camera sink.

use std::sync::Arc;

/// Byte order of the interleaved 3-byte pixel data in a [`VideoFrame`].
///
/// The frame source produces `Rgb24`; v4l2-loopback style camera devices
/// consume `Bgr24`, so frames are reordered once per delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelLayout {
    /// Red, green, blue — the decoder's output layout.
    Rgb24,
    /// Blue, green, red — the camera device's expected layout.
    Bgr24,
}

impl PixelLayout {
    /// Bytes per pixel for this layout.
    #[must_use]
    pub fn bytes_per_pixel(self) -> usize {
        3
    }
}

/// A single decoded video frame.
///
/// Pixel data is interleaved with 3 bytes per pixel in the order given by
/// [`layout`](Self::layout). The buffer is reference counted so a frame can
/// be handed to a sink without copying.
#[derive(Debug, Clone)]
pub struct VideoFrame {
    /// Frame width in pixels.
    width: u32,
    /// Frame height in pixels.
    height: u32,
    /// Channel order of `data`.
    layout: PixelLayout,
    /// Interleaved pixel data (width × height × 3 bytes).
    data: Arc<Vec<u8>>,
}

impl VideoFrame {
    /// Creates a new `VideoFrame` from dimensions and pixel data.
    ///
    /// # Panics
    ///
    /// Panics if the pixel data length doesn't match `width * height * 3`.
    #[must_use]
    pub fn new(width: u32, height: u32, layout: PixelLayout, data: Arc<Vec<u8>>) -> Self {
        let expected_len = (width as usize) * (height as usize) * layout.bytes_per_pixel();
        assert_eq!(
            data.len(),
            expected_len,
            "pixel data length mismatch: expected {expected_len}, got {}",
            data.len()
        );

        Self {
            width,
            height,
            layout,
            data,
        }
    }

    /// Creates a new `VideoFrame` from dimensions and owned RGB pixel data.
    ///
    /// # Panics
    ///
    /// Panics if the pixel data length doesn't match `width * height * 3`.
    #[must_use]
    pub fn from_rgb(width: u32, height: u32, data: Vec<u8>) -> Self {
        Self::new(width, height, PixelLayout::Rgb24, Arc::new(data))
    }

    /// Returns the frame width in pixels.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the frame height in pixels.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns the channel order of the pixel data.
    #[must_use]
    pub fn layout(&self) -> PixelLayout {
        self.layout
    }

    /// Returns the interleaved pixel data.
    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Returns the total size in bytes.
    #[must_use]
    pub fn size_bytes(&self) -> usize {
        self.data.len()
    }
}
