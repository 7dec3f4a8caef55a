// SPDX-License-Identifier: MPL-2.0
//! Domain layer - core playback types with ZERO external dependencies.
//!
//! This module contains pure domain types and value objects. It has no
//! dependencies on external crates (except `std`) to ensure testability.
//!
//! # Modules
//!
//! - [`frame`]: Pixel buffer types ([`VideoFrame`](frame::VideoFrame),
//!   [`PixelLayout`](frame::PixelLayout))
//! - [`stream`]: Stream identity ([`StreamKind`](stream::StreamKind))

pub mod frame;
pub mod stream;

pub use frame::{PixelLayout, VideoFrame};
pub use stream::StreamKind;
