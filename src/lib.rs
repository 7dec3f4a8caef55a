// SPDX-License-Identifier: MPL-2.0
//! `replaycam` replays a pre-recorded video (and optionally a screen
//! capture and an audio track) through virtual camera and microphone
//! devices so a live viewer experiences a correctly paced, audio-locked
//! feed - as if watching a live webcam, not a file being played back.
//!
//! The crate is an in-process real-time control loop: the audio loop's
//! start instant is the master clock, a drift corrector drops frames to
//! catch up, and a frame pacer sleeps the residual frame budget to slow
//! down. No network protocol, no persisted state, one local session per
//! process.

#![doc(html_root_url = "https://docs.rs/replaycam/0.3.0")]

pub mod config;
pub mod domain;
pub mod error;
pub mod playback;
pub mod sink;
pub mod source;

#[cfg(test)]
mod tests {
    // This is where common library tests can go
}
