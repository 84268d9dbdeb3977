use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::scheduler::ControllerConfig;
use crate::{tlog_debug, Error, Result};

/// Host settings read from `~/.tween/tween.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Frames per second of the demo loop.
    pub fps: f32,
    pub controller: ControllerConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fps: 60.0,
            controller: ControllerConfig::default(),
        }
    }
}

impl Config {
    pub fn tween_dir() -> Result<PathBuf> {
        Ok(dirs::home_dir().ok_or(Error::NoHomeDir)?.join(".tween"))
    }

    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::tween_dir()?.join("tween.toml"))
    }

    /// Seconds per frame at the configured rate.
    pub fn frame_delta(&self) -> f32 {
        1.0 / self.fps
    }

    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load from an explicit path, falling back to defaults when the file is
    /// missing.
    pub fn load_from(path: &Path) -> Result<Self> {
        tlog_debug!("Config::load path={}", path.display());
        if !path.exists() {
            tlog_debug!("Config file not found, using defaults");
            return Ok(Self::default());
        }
        let config: Self = toml::from_str(&fs::read_to_string(path)?)?;
        config.validate()?;
        tlog_debug!(
            "Config loaded: fps={}, controller={:?}",
            config.fps,
            config.controller
        );
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            if !dir.exists() {
                tlog_debug!("Creating config directory {}", dir.display());
                fs::create_dir_all(dir)?;
            }
        }
        fs::write(path, toml::to_string_pretty(self)?)?;
        tlog_debug!("Config saved to {}", path.display());
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if !self.fps.is_finite() || self.fps <= 0.0 {
            return Err(Error::Validation(format!(
                "fps must be a positive number, got {}",
                self.fps
            )));
        }
        if !self.frame_delta().is_finite() {
            return Err(Error::Validation(format!(
                "fps {} is too small for a finite frame delta",
                self.fps
            )));
        }
        Ok(())
    }
}
