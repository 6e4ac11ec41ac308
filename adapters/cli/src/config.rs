//! Run configuration loaded from TOML and overridden by command-line flags.

use std::{fs, path::Path, time::Duration};

use anyhow::{ensure, Context, Result};
use serde::Deserialize;
use station_siege_core::tuning::{SPAWN_MAX_ATTEMPTS, SPAWN_MIN_DISTANCE_CELLS};
use station_siege_system_controls::DEFAULT_MOUSE_SENSITIVITY;

use crate::Args;

/// Settings that shape a headless run.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct RunConfig {
    pub(crate) frames: u32,
    pub(crate) seed: u64,
    pub(crate) frame_millis: u64,
    pub(crate) realtime: bool,
    pub(crate) restart_on_game_over: bool,
    pub(crate) mouse_sensitivity: f32,
    pub(crate) spawn_attempts: u32,
    pub(crate) spawn_distance_cells: f32,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            frames: 6_000,
            seed: 0x5eed_cafe,
            frame_millis: 16,
            realtime: false,
            restart_on_game_over: false,
            mouse_sensitivity: DEFAULT_MOUSE_SENSITIVITY,
            spawn_attempts: SPAWN_MAX_ATTEMPTS,
            spawn_distance_cells: SPAWN_MIN_DISTANCE_CELLS,
        }
    }
}

impl RunConfig {
    /// Reads the file named by `--config`, if any, then applies flag overrides.
    pub(crate) fn resolve(args: &Args) -> Result<Self> {
        let mut config = match &args.config {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        config.override_with(args);
        ensure!(config.frame_millis > 0, "frame duration must be positive");
        ensure!(
            config.mouse_sensitivity.is_finite(),
            "mouse sensitivity must be a finite number"
        );
        Ok(config)
    }

    fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read run configuration at {}", path.display()))?;
        Self::parse(&contents)
            .with_context(|| format!("invalid run configuration in {}", path.display()))
    }

    fn parse(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("failed to parse run configuration toml contents")
    }

    fn override_with(&mut self, args: &Args) {
        if let Some(frames) = args.frames {
            self.frames = frames;
        }
        if let Some(seed) = args.seed {
            self.seed = seed;
        }
        if let Some(frame_millis) = args.frame_millis {
            self.frame_millis = frame_millis;
        }
        self.realtime |= args.realtime;
        self.restart_on_game_over |= args.restart_on_game_over;
    }

    /// Simulated duration of one frame.
    pub(crate) fn frame_duration(&self) -> Duration {
        Duration::from_millis(self.frame_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_files_keep_defaults() {
        let config =
            RunConfig::parse("seed = 7\nrestart_on_game_over = true\n").expect("valid toml");

        assert_eq!(config.seed, 7);
        assert!(config.restart_on_game_over);
        assert_eq!(config.frames, RunConfig::default().frames);
        assert_eq!(config.spawn_attempts, 100);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(RunConfig::parse("sead = 7\n").is_err());
    }

    #[test]
    fn flags_override_file_values() {
        let mut config = RunConfig::parse("frames = 10\nframe_millis = 20\n").expect("valid toml");
        let args = Args {
            frames: Some(99),
            seed: None,
            frame_millis: None,
            realtime: true,
            restart_on_game_over: false,
            config: None,
            verbose: false,
        };

        config.override_with(&args);

        assert_eq!(config.frames, 99);
        assert_eq!(config.frame_duration(), Duration::from_millis(20));
        assert!(config.realtime);
    }
}
