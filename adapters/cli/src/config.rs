use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{bail, Context, Result};
use heavy_machine_gun_core::Playfield;
use heavy_machine_gun_session::DEFAULT_SEED;
use serde::Deserialize;

const SUPPORTED_CONFIG_VERSION: u32 = 1;

/// Settings for a headless run, loaded from TOML and overridden by flags.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct RunConfig {
    pub(crate) version: u32,
    pub(crate) seed: u64,
    pub(crate) duration_secs: u64,
    pub(crate) frame_ms: u64,
    pub(crate) width: f32,
    pub(crate) height: f32,
    pub(crate) high_score_path: Option<PathBuf>,
    pub(crate) autopilot: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        let playfield = Playfield::default();
        Self {
            version: SUPPORTED_CONFIG_VERSION,
            seed: DEFAULT_SEED,
            duration_secs: 120,
            frame_ms: 16,
            width: playfield.width(),
            height: playfield.height(),
            high_score_path: None,
            autopilot: true,
        }
    }
}

impl RunConfig {
    /// Reads and validates a configuration file.
    pub(crate) fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read run config at {}", path.display()))?;
        Self::parse(&contents).with_context(|| format!("invalid run config {}", path.display()))
    }

    pub(crate) fn parse(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents).context("failed to parse run config toml")?;
        if config.version != SUPPORTED_CONFIG_VERSION {
            bail!(
                "unsupported run config version {}; expected {}",
                config.version,
                SUPPORTED_CONFIG_VERSION
            );
        }
        config.validate()?;
        Ok(config)
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.frame_ms == 0 {
            bail!("frame_ms must be positive");
        }
        let minimum = Playfield::SPAWN_MARGIN * 2.0;
        if !(self.width > minimum && self.height > minimum) {
            bail!(
                "playfield {}x{} is too small; both sides must exceed {minimum}",
                self.width,
                self.height
            );
        }
        Ok(())
    }

    pub(crate) fn playfield(&self) -> Playfield {
        Playfield::new(self.width, self.height)
    }

    pub(crate) fn frame(&self) -> Duration {
        Duration::from_millis(self.frame_ms)
    }

    /// Number of whole frames that fit into the configured duration.
    pub(crate) fn frame_count(&self) -> u64 {
        (self.duration_secs * 1_000) / self.frame_ms.max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config = RunConfig::parse("version = 1\nseed = 42\n").expect("valid config");

        assert_eq!(config.seed, 42);
        assert_eq!(config.frame_ms, RunConfig::default().frame_ms);
        assert!(config.autopilot);
        assert_eq!(config.playfield(), Playfield::default());
    }

    #[test]
    fn every_field_is_read() {
        let config = RunConfig::parse(
            r#"
            version = 1
            seed = 7
            duration_secs = 30
            frame_ms = 20
            width = 640.0
            height = 480.0
            high_score_path = "scores.toml"
            autopilot = false
            "#,
        )
        .expect("valid config");

        assert_eq!(config.frame(), Duration::from_millis(20));
        assert_eq!(config.frame_count(), 1_500);
        assert_eq!(config.playfield(), Playfield::new(640.0, 480.0));
        assert_eq!(config.high_score_path, Some(PathBuf::from("scores.toml")));
        assert!(!config.autopilot);
    }

    #[test]
    fn rejects_unknown_versions() {
        let error = RunConfig::parse("version = 2\n").expect_err("version 2 is unsupported");
        assert!(error.to_string().contains("unsupported run config version 2"));
    }

    #[test]
    fn rejects_unknown_fields_and_bad_values() {
        assert!(RunConfig::parse("version = 1\nspeed = 3\n").is_err());
        assert!(RunConfig::parse("version = 1\nframe_ms = 0\n").is_err());
        assert!(RunConfig::parse("version = 1\nwidth = 90.0\n").is_err());
    }
}
