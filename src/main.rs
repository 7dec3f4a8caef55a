// SPDX-License-Identifier: MPL-2.0
use std::path::PathBuf;
use std::process::ExitCode;

use replaycam::config::{self, SessionConfig};
use replaycam::playback::{Session, SessionOutcome};

const USAGE: &str = "\
Usage: replaycam [OPTIONS] <video-file>

Options:
  --audio <file>        File supplying the audio samples (default: the video file)
  --screen <file>       Second video rendered to its own virtual output
  --camera <device>     Virtual camera device node (default: /dev/video2)
  --microphone <path>   Virtual microphone sink path (default: /tmp/virtmic)
  --fps <rate>          Force the nominal frame rate
  --size <WxH>          Force the output frame size
  --no-skip             Disable drift correction (video may lag the audio)
  --config <file>       Load session settings from a TOML file
  --help                Show this help
";

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match parse_args() {
        Ok(Some(config)) => config,
        Ok(None) => {
            print!("{USAGE}");
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            eprintln!("replaycam: {e}");
            eprint!("{USAGE}");
            return ExitCode::FAILURE;
        }
    };

    let mut session = match Session::start(&config) {
        Ok(session) => session,
        Err(e) => {
            log::error!("failed to start session: {e}");
            return ExitCode::FAILURE;
        }
    };

    match session.run() {
        SessionOutcome::Completed => ExitCode::SUCCESS,
        SessionOutcome::Failed(err) => {
            log::error!("playback halted: {err}");
            ExitCode::FAILURE
        }
    }
}

/// Parses the command line into a session configuration.
///
/// Returns `Ok(None)` when `--help` was requested. A `--config` file is
/// loaded first; individual flags override its fields.
fn parse_args() -> Result<Option<SessionConfig>, String> {
    let mut args = pico_args::Arguments::from_env();

    if args.contains("--help") {
        return Ok(None);
    }

    let mut config = match args
        .opt_value_from_str::<_, PathBuf>("--config")
        .map_err(|e| e.to_string())?
    {
        Some(path) => config::load_from_path(&path).map_err(|e| e.to_string())?,
        None => config::load().map_err(|e| e.to_string())?,
    };

    if let Some(audio) = opt_path(&mut args, "--audio")? {
        config.audio_source = Some(audio);
    }
    if let Some(screen) = opt_path(&mut args, "--screen")? {
        config.screen_source = Some(screen);
    }
    if let Some(camera) = opt_path(&mut args, "--camera")? {
        config.camera_device = Some(camera);
    }
    if let Some(microphone) = opt_path(&mut args, "--microphone")? {
        config.microphone_device = Some(microphone);
    }
    if let Some(fps) = args
        .opt_value_from_str::<_, f64>("--fps")
        .map_err(|e| e.to_string())?
    {
        config.forced_fps = Some(fps);
    }
    if let Some(size) = args
        .opt_value_from_fn("--size", parse_size)
        .map_err(|e| e.to_string())?
    {
        config.forced_size = Some(size);
    }
    if args.contains("--no-skip") {
        config.skip_enabled = false;
    }

    if let Some(video) = args
        .finish()
        .into_iter()
        .next()
        .and_then(|s| s.into_string().ok())
    {
        config.video_source = Some(PathBuf::from(video));
    }

    if config.video_source.is_none() {
        return Err("no video file given".to_string());
    }

    Ok(Some(config))
}

fn opt_path(args: &mut pico_args::Arguments, key: &'static str) -> Result<Option<PathBuf>, String> {
    args.opt_value_from_str::<_, PathBuf>(key)
        .map_err(|e| e.to_string())
}

/// Parses a `WxH` size argument, e.g. `640x360`.
fn parse_size(value: &str) -> Result<(u32, u32), String> {
    let (w, h) = value
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WxH, got '{value}'"))?;
    let width = w.parse().map_err(|_| format!("bad width '{w}'"))?;
    let height = h.parse().map_err(|_| format!("bad height '{h}'"))?;
    Ok((width, height))
}
