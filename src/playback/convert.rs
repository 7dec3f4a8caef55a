// SPDX-License-Identifier: MPL-2.0
//! Pixel layout conversion between the decoder and the camera device.
//!
//! The frame source produces `RGB24`; v4l2-loopback devices configured for
//! this session expect `BGR24`. The reorder is a plain per-pixel channel
//! swap done once per delivered frame.

use std::sync::Arc;

use crate::domain::{PixelLayout, VideoFrame};

/// Reorders an `RGB24` frame into the camera's `BGR24` layout.
///
/// Frames already in `BGR24` are returned as-is (the buffer is shared, not
/// copied).
#[must_use]
pub fn rgb_to_bgr(frame: &VideoFrame) -> VideoFrame {
    if frame.layout() == PixelLayout::Bgr24 {
        return frame.clone();
    }

    let src = frame.data();
    let mut dst = Vec::with_capacity(src.len());
    for pixel in src.chunks_exact(3) {
        dst.push(pixel[2]);
        dst.push(pixel[1]);
        dst.push(pixel[0]);
    }

    VideoFrame::new(
        frame.width(),
        frame.height(),
        PixelLayout::Bgr24,
        Arc::new(dst),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn swaps_red_and_blue_channels() {
        let rgb = VideoFrame::from_rgb(2, 1, vec![10, 20, 30, 40, 50, 60]);
        let bgr = rgb_to_bgr(&rgb);

        assert_eq!(bgr.layout(), PixelLayout::Bgr24);
        assert_eq!(bgr.data(), &[30, 20, 10, 60, 50, 40]);
        assert_eq!(bgr.width(), 2);
        assert_eq!(bgr.height(), 1);
    }

    #[test]
    fn bgr_input_is_passed_through_without_copying() {
        let bgr = VideoFrame::new(
            1,
            1,
            PixelLayout::Bgr24,
            Arc::new(vec![1, 2, 3]),
        );
        let out = rgb_to_bgr(&bgr);
        assert_eq!(out.data().as_ptr(), bgr.data().as_ptr());
    }

    #[test]
    fn double_swap_restores_original_bytes() {
        let rgb = VideoFrame::from_rgb(1, 2, vec![9, 8, 7, 6, 5, 4]);
        let bgr = rgb_to_bgr(&rgb);
        // Swap is its own inverse at the byte level.
        let mut back = Vec::new();
        for pixel in bgr.data().chunks_exact(3) {
            back.extend_from_slice(&[pixel[2], pixel[1], pixel[0]]);
        }
        assert_eq!(back, rgb.data());
    }
}
