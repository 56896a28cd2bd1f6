//! Configuration for the preloader and its companion effects.
//!
//! Everything has a default matching the stock NEXUS cadence, so a config
//! file only needs the fields it changes. Files are JSON.
//!
//! ```
//! use nexus_particles::config::Config;
//!
//! let config: Config = serde_json::from_str(r#"{ "preloader": { "particle_count": 120 } }"#).unwrap();
//! assert_eq!(config.preloader.particle_count, 120);
//! assert_eq!(config.burst.count, 80);
//! ```

use crate::burst::BurstConfig;
use crate::error::ConfigError;
use crate::forces::ForceConfig;
use crate::phase::{StillTimeline, Timeline};
use crate::trail::TrailConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Preloader particle field settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreloaderConfig {
    pub particle_count: usize,
    /// Width of the random offset added to each silhouette target, per axis.
    pub target_jitter: f32,
    /// Width of the initial velocity range, per axis.
    pub initial_speed: f32,
    pub min_size: f32,
    pub max_size: f32,
    pub min_opacity: f32,
    pub max_opacity: f32,
    pub timeline: Timeline,
    /// Timeline used when motion is reduced or no surface is available.
    pub still_timeline: StillTimeline,
    pub forces: ForceConfig,
}

impl Default for PreloaderConfig {
    fn default() -> Self {
        Self {
            particle_count: 300,
            target_jitter: 8.0,
            initial_speed: 4.0,
            min_size: 0.5,
            max_size: 3.0,
            min_opacity: 0.5,
            max_opacity: 1.0,
            timeline: Timeline::default(),
            still_timeline: StillTimeline::default(),
            forces: ForceConfig::default(),
        }
    }
}

/// Window settings for the runner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "NEXUS".to_string(),
            width: 1280,
            height: 720,
        }
    }
}

/// Complete configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub preloader: PreloaderConfig,
    pub burst: BurstConfig,
    pub trail: TrailConfig,
    pub window: WindowConfig,
    /// Fixed RNG seed for reproducible runs.
    pub seed: Option<u64>,
}

impl Config {
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Load and validate a config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let p = &self.preloader;
        if p.particle_count == 0 {
            return Err(ConfigError::Invalid("preloader.particle_count must be at least 1".into()));
        }
        if p.min_size > p.max_size || p.min_opacity > p.max_opacity {
            return Err(ConfigError::Invalid("preloader min values exceed max values".into()));
        }
        if !(0.0..=1.0).contains(&p.min_opacity) || !(0.0..=1.0).contains(&p.max_opacity) {
            return Err(ConfigError::Invalid("preloader opacity must be within 0.0-1.0".into()));
        }
        p.timeline.validate()?;
        p.still_timeline.validate()?;
        if self.window.width == 0 || self.window.height == 0 {
            return Err(ConfigError::Invalid("window size must be non-zero".into()));
        }
        Ok(())
    }
}
