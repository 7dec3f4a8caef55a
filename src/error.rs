// SPDX-License-Identifier: MPL-2.0
use std::fmt;

#[derive(Debug, Clone)]
pub enum Error {
    Io(String),
    Config(String),
    Playback(PlaybackError),
}

/// Fatal playback conditions.
///
/// Every variant is unrecoverable for the running session: it unwinds to the
/// orchestrator's teardown path and the process exits non-zero. Drift skips
/// are deliberately absent here — a skipped frame is an expected, recoverable
/// event reported through the log, never through this type.
#[derive(Debug, Clone)]
pub enum PlaybackError {
    /// A frame source or device sink path could not be opened.
    SourceUnavailable(String),

    /// A single frame or sample failed to decode. No per-frame retry or
    /// silent-frame substitution exists; the session halts.
    DecodeFailure(String),

    /// Delivering a frame or audio buffer to a virtual device failed.
    SinkWriteFailure(String),
}

impl fmt::Display for PlaybackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlaybackError::SourceUnavailable(msg) => {
                write!(f, "Source unavailable: {}", msg)
            }
            PlaybackError::DecodeFailure(msg) => write!(f, "Decode failure: {}", msg),
            PlaybackError::SinkWriteFailure(msg) => {
                write!(f, "Sink write failure: {}", msg)
            }
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O Error: {}", e),
            Error::Config(e) => write!(f, "Config Error: {}", e),
            Error::Playback(e) => write!(f, "Playback Error: {}", e),
        }
    }
}

impl From<PlaybackError> for Error {
    fn from(err: PlaybackError) -> Self {
        Error::Playback(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats_io_error() {
        let err = Error::Io("disk failure".to_string());
        assert_eq!(format!("{}", err), "I/O Error: disk failure");
    }

    #[test]
    fn from_io_error_produces_io_variant() {
        let io_error = std::io::Error::other("boom");
        let err: Error = io_error.into();
        match err {
            Error::Io(message) => assert!(message.contains("boom")),
            _ => panic!("expected Io variant"),
        }
    }

    #[test]
    fn config_error_formats_properly() {
        let err = Error::Config("bad field".into());
        assert_eq!(format!("{}", err), "Config Error: bad field");
    }

    #[test]
    fn playback_error_converts_to_error() {
        let err: Error = PlaybackError::SourceUnavailable("/dev/video2".into()).into();
        match err {
            Error::Playback(PlaybackError::SourceUnavailable(path)) => {
                assert!(path.contains("video2"));
            }
            _ => panic!("expected Playback variant"),
        }
    }

    #[test]
    fn playback_error_display() {
        let err = PlaybackError::SinkWriteFailure("broken pipe".to_string());
        assert_eq!(format!("{}", err), "Sink write failure: broken pipe");

        let err = PlaybackError::DecodeFailure("bad packet".to_string());
        assert_eq!(format!("{}", err), "Decode failure: bad packet");
    }
}
