//! Scene configuration. Loaded from `scene.ron` at startup.

use crate::profile::PresentationProfile;
use procgen::{ProcgenError, BASE_SNOW_COUNT, FOLIAGE_COUNT, ORNAMENT_COUNT};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default falling snow population.
pub const FALLING_SNOW_COUNT: usize = 6_000;

/// Tunables for one mounted scene. Every field has a default, so a partial
/// `scene.ron` only needs the values it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneConfig {
    /// RNG seed; `None` draws a fresh scene every launch.
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub profile: PresentationProfile,
    #[serde(default = "default_foliage_count")]
    pub foliage_count: usize,
    #[serde(default = "default_base_snow_count")]
    pub base_snow_count: usize,
    #[serde(default = "default_falling_snow_count")]
    pub falling_snow_count: usize,
    #[serde(default = "default_ornament_count")]
    pub ornament_count: usize,
    /// Frames the headless driver presents before tearing the scene down.
    #[serde(default = "default_frames")]
    pub frames: u32,
    /// Simulated presentation rate for the headless driver.
    #[serde(default = "default_frame_rate")]
    pub frame_rate: f32,
}

fn default_foliage_count() -> usize {
    FOLIAGE_COUNT
}
fn default_base_snow_count() -> usize {
    BASE_SNOW_COUNT
}
fn default_falling_snow_count() -> usize {
    FALLING_SNOW_COUNT
}
fn default_ornament_count() -> usize {
    ORNAMENT_COUNT
}
fn default_frames() -> u32 {
    600
}
fn default_frame_rate() -> f32 {
    60.0
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            seed: None,
            profile: PresentationProfile::default(),
            foliage_count: default_foliage_count(),
            base_snow_count: default_base_snow_count(),
            falling_snow_count: default_falling_snow_count(),
            ornament_count: default_ornament_count(),
            frames: default_frames(),
            frame_rate: default_frame_rate(),
        }
    }
}

impl SceneConfig {
    /// Load config from `scene.ron` in the current directory. Missing or
    /// invalid files fall back to defaults.
    pub fn load() -> Self {
        Self::load_from(&config_path())
    }

    /// Load config from `path`; logs and returns defaults when it cannot be read.
    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(data) => match Self::parse(&data) {
                Ok(c) => return c,
                Err(e) => log::warn!("Invalid config at {:?}: {}, using defaults", path, e),
            },
            Err(e) => log::debug!("No config at {:?} ({}), using defaults", path, e),
        }
        Self::default()
    }

    pub fn parse(data: &str) -> Result<Self, ron::error::SpannedError> {
        ron::from_str(data)
    }

    /// Save current config to `path`. Logs on error.
    pub fn save(&self, path: &Path) {
        match ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default()) {
            Ok(s) => {
                if let Err(e) = std::fs::write(path, s) {
                    log::warn!("Could not write config to {:?}: {}", path, e);
                }
            }
            Err(e) => log::warn!("Could not serialise config: {}", e),
        }
    }

    /// Reject configurations that would produce degenerate geometry.
    pub fn validate(&self) -> procgen::Result<()> {
        for (what, value) in [
            ("foliage count", self.foliage_count),
            ("base snow count", self.base_snow_count),
            ("falling snow count", self.falling_snow_count),
            ("ornament count", self.ornament_count),
        ] {
            if value == 0 {
                return Err(ProcgenError::InvalidCount { what, value });
            }
        }
        if !self.frame_rate.is_finite() || self.frame_rate <= 0.0 {
            return Err(ProcgenError::InvalidRange {
                what: "frame rate",
                value: self.frame_rate,
                expected: "> 0",
            });
        }
        Ok(())
    }
}

fn config_path() -> PathBuf {
    std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join("scene.ron")
}
