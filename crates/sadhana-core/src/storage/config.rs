//! TOML-based application configuration.
//!
//! Stores user preferences including:
//! - Milestone schedule for streak celebrations
//! - Default ritual metadata the CLI fills in when flags are omitted
//!
//! Configuration is stored at `~/.config/sadhana/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::data_dir;
use crate::error::ConfigError;
use crate::streak::{milestones::DEFAULT_MILESTONES, MilestoneSchedule};

/// Streak-specific configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreakConfig {
    /// Celebrated streak lengths in days. Changing this list is a config
    /// change, not a code change.
    #[serde(default = "default_milestones")]
    pub milestones: Vec<u32>,
}

/// Defaults applied to ritual completion events when the caller omits
/// metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RitualConfig {
    #[serde(default = "default_deity")]
    pub default_deity: String,
    #[serde(default = "default_true")]
    pub soundscape_default_on: bool,
    #[serde(default = "default_soundscape_type")]
    pub soundscape_type: String,
    #[serde(default = "default_steps_per_ritual")]
    pub steps_per_ritual: u8,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/sadhana/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub streak: StreakConfig,
    #[serde(default)]
    pub ritual: RitualConfig,
}

// Default functions
fn default_milestones() -> Vec<u32> {
    DEFAULT_MILESTONES.to_vec()
}
fn default_deity() -> String {
    "Ganesha".into()
}
fn default_soundscape_type() -> String {
    "temple_bells".into()
}
fn default_steps_per_ritual() -> u8 {
    5
}
fn default_true() -> bool {
    true
}

impl Default for StreakConfig {
    fn default() -> Self {
        Self {
            milestones: default_milestones(),
        }
    }
}

impl Default for RitualConfig {
    fn default() -> Self {
        Self {
            default_deity: default_deity(),
            soundscape_default_on: true,
            soundscape_type: default_soundscape_type(),
            steps_per_ritual: default_steps_per_ritual(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            streak: StreakConfig::default(),
            ritual: RitualConfig::default(),
        }
    }
}

impl Config {
    fn path() -> Result<PathBuf, ConfigError> {
        let dir = data_dir().map_err(|e| ConfigError::LoadFailed {
            path: PathBuf::from("~/.config/sadhana"),
            message: e.to_string(),
        })?;
        Ok(dir.join("config.toml"))
    }

    /// Load configuration, falling back to defaults if the file does not
    /// exist yet.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::path()?;
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(&path).map_err(|e| ConfigError::LoadFailed {
            path: path.clone(),
            message: e.to_string(),
        })?;
        toml::from_str(&raw).map_err(|e| ConfigError::ParseFailed(e.to_string()))
    }

    /// Save configuration to disk.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::path()?;
        let raw = toml::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.clone(),
            message: e.to_string(),
        })?;
        std::fs::write(&path, raw).map_err(|e| ConfigError::SaveFailed {
            path,
            message: e.to_string(),
        })
    }

    /// The milestone schedule configured for streak celebrations.
    pub fn milestone_schedule(&self) -> MilestoneSchedule {
        MilestoneSchedule::new(self.streak.milestones.clone())
    }
}
