// SPDX-License-Identifier: MPL-2.0
//! Session configuration: which files to play, which virtual devices to
//! play them into, and the optional overrides applied to the frame source.
//!
//! Configuration can be loaded from a `session.toml` file and overridden
//! field by field from the command line. There is no module-level mutable
//! state; the resolved [`SessionConfig`] value is handed to the session at
//! construction and owned by it.
//!
//! # Examples
//!
//! ```no_run
//! use replaycam::config::{self, SessionConfig};
//!
//! let mut config = config::load().unwrap_or_default();
//! config.video_source = Some("clip.mp4".into());
//! config::save(&config).expect("Failed to save config");
//! ```

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub mod defaults;

const CONFIG_FILE: &str = "session.toml";
const APP_NAME: &str = "replaycam";

/// Resolved configuration for one playback session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// File supplying the main video track (and, in single-file setups,
    /// the audio samples as well).
    pub video_source: Option<PathBuf>,

    /// File supplying the audio samples. Falls back to `video_source`.
    #[serde(default)]
    pub audio_source: Option<PathBuf>,

    /// Optional second video file rendered to its own virtual output
    /// (dual-stream variant).
    #[serde(default)]
    pub screen_source: Option<PathBuf>,

    /// Virtual camera device node.
    #[serde(default)]
    pub camera_device: Option<PathBuf>,

    /// Virtual microphone sink path.
    #[serde(default)]
    pub microphone_device: Option<PathBuf>,

    /// Force the frame source to report this frame rate instead of the
    /// container's nominal rate.
    #[serde(default)]
    pub forced_fps: Option<f64>,

    /// Force the frame source to scale output frames to this size
    /// (width, height).
    #[serde(default)]
    pub forced_size: Option<(u32, u32)>,

    /// Whether the drift corrector may drop frames. Disabling this is a
    /// diagnostic aid; the video will lag behind the audio under load.
    #[serde(default = "default_skip_enabled")]
    pub skip_enabled: bool,
}

fn default_skip_enabled() -> bool {
    true
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            video_source: None,
            audio_source: None,
            screen_source: None,
            camera_device: None,
            microphone_device: None,
            forced_fps: None,
            forced_size: None,
            skip_enabled: true,
        }
    }
}

impl SessionConfig {
    /// Returns the camera device node, falling back to the default.
    #[must_use]
    pub fn camera_device(&self) -> PathBuf {
        self.camera_device
            .clone()
            .unwrap_or_else(|| PathBuf::from(defaults::DEFAULT_CAMERA_DEVICE))
    }

    /// Returns the microphone sink path, falling back to the default.
    #[must_use]
    pub fn microphone_device(&self) -> PathBuf {
        self.microphone_device
            .clone()
            .unwrap_or_else(|| PathBuf::from(defaults::DEFAULT_MICROPHONE_DEVICE))
    }

    /// Returns the file supplying the audio samples.
    ///
    /// A dedicated audio file wins; otherwise the video file's own audio
    /// track is used.
    #[must_use]
    pub fn audio_source(&self) -> Option<PathBuf> {
        self.audio_source
            .clone()
            .or_else(|| self.video_source.clone())
    }
}

fn get_default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path.push(CONFIG_FILE);
        path
    })
}

pub fn load() -> Result<SessionConfig> {
    if let Some(path) = get_default_config_path() {
        if path.exists() {
            return load_from_path(&path);
        }
    }
    Ok(SessionConfig::default())
}

pub fn save(config: &SessionConfig) -> Result<()> {
    if let Some(path) = get_default_config_path() {
        return save_to_path(config, &path);
    }
    Ok(())
}

pub fn load_from_path(path: &Path) -> Result<SessionConfig> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content).unwrap_or_default())
}

pub fn save_to_path(config: &SessionConfig, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn save_and_load_round_trip_preserves_paths() {
        let config = SessionConfig {
            video_source: Some(PathBuf::from("clip.mp4")),
            audio_source: Some(PathBuf::from("voice.wav")),
            screen_source: None,
            camera_device: Some(PathBuf::from("/dev/video9")),
            microphone_device: None,
            forced_fps: Some(25.0),
            forced_size: Some((640, 360)),
            skip_enabled: false,
        };
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("nested").join("session.toml");

        save_to_path(&config, &config_path).expect("failed to save config");
        let loaded = load_from_path(&config_path).expect("failed to load config");

        assert_eq!(loaded.video_source, config.video_source);
        assert_eq!(loaded.audio_source, config.audio_source);
        assert_eq!(loaded.camera_device, config.camera_device);
        assert_eq!(loaded.forced_fps, config.forced_fps);
        assert_eq!(loaded.forced_size, config.forced_size);
        assert!(!loaded.skip_enabled);
    }

    #[test]
    fn load_from_path_returns_default_on_invalid_toml() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("session.toml");
        fs::write(&config_path, "not = valid = toml").expect("failed to write invalid toml");

        let loaded = load_from_path(&config_path).expect("load should not error");
        assert!(loaded.video_source.is_none());
        assert!(loaded.skip_enabled);
    }

    #[test]
    fn save_to_path_creates_parent_directories() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("deep").join("path").join("session.toml");

        save_to_path(&SessionConfig::default(), &config_path)
            .expect("save should create directories");
        assert!(config_path.exists());
    }

    #[test]
    fn device_accessors_fall_back_to_defaults() {
        let config = SessionConfig::default();
        assert_eq!(
            config.camera_device(),
            PathBuf::from(defaults::DEFAULT_CAMERA_DEVICE)
        );
        assert_eq!(
            config.microphone_device(),
            PathBuf::from(defaults::DEFAULT_MICROPHONE_DEVICE)
        );
    }

    #[test]
    fn audio_source_falls_back_to_video_source() {
        let config = SessionConfig {
            video_source: Some(PathBuf::from("clip.mp4")),
            ..SessionConfig::default()
        };
        assert_eq!(config.audio_source(), Some(PathBuf::from("clip.mp4")));

        let config = SessionConfig {
            video_source: Some(PathBuf::from("clip.mp4")),
            audio_source: Some(PathBuf::from("voice.wav")),
            ..SessionConfig::default()
        };
        assert_eq!(config.audio_source(), Some(PathBuf::from("voice.wav")));
    }
}
