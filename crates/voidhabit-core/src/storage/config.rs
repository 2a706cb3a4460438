//! TOML-based user profile.
//!
//! Holds the user-configured goals that drive habit seeding, the meditation
//! session and the workout lock window. Stored at
//! `~/.config/voidhabit/profile.toml`; every field has a default so a
//! missing or partial file still loads.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::data_dir;
use crate::error::{ConfigError, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    /// Display name shown on the dashboard greeting.
    #[serde(default)]
    pub name: String,
    /// Daily meditation goal in minutes.
    #[serde(default = "default_meditation_goal")]
    pub meditation_goal_minutes: u32,
    /// Daily reading goal in pages.
    #[serde(default)]
    pub reading_goal_pages: u32,
    /// Weekly training-days goal; also the plan count that arms the
    /// monthly edit lock.
    #[serde(default = "default_training_days_goal")]
    pub training_days_goal: u32,
    /// Day-of-week ids the user trains on.
    #[serde(default)]
    pub selected_training_days: Vec<String>,
    /// Motivational phrases cycled on the dashboard.
    #[serde(default)]
    pub remember_phrases: Vec<String>,
}

fn default_meditation_goal() -> u32 {
    10
}

fn default_training_days_goal() -> u32 {
    3
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            name: String::new(),
            meditation_goal_minutes: default_meditation_goal(),
            reading_goal_pages: 0,
            training_days_goal: default_training_days_goal(),
            selected_training_days: Vec::new(),
            remember_phrases: Vec::new(),
        }
    }
}

impl Profile {
    pub fn path() -> Result<PathBuf> {
        Ok(data_dir()?.join("profile.toml"))
    }

    /// Load the profile, falling back to defaults when the file does not
    /// exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::path()?;
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(&path).map_err(|e| ConfigError::LoadFailed {
            path: path.clone(),
            message: e.to_string(),
        })?;
        let profile = toml::from_str(&raw).map_err(|e| ConfigError::LoadFailed {
            path,
            message: e.to_string(),
        })?;
        Ok(profile)
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::path()?;
        let raw = toml::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.clone(),
            message: e.to_string(),
        })?;
        std::fs::write(&path, raw).map_err(|e| ConfigError::SaveFailed {
            path,
            message: e.to_string(),
        })?;
        Ok(())
    }

    /// Set a profile field by its TOML key. Used by `config set`.
    pub fn set_key(&mut self, key: &str, value: &str) -> Result<()> {
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };
        match key {
            "name" => self.name = value.to_string(),
            "meditation_goal_minutes" => {
                self.meditation_goal_minutes =
                    value.parse().map_err(|_| invalid("expected a number".into()))?
            }
            "reading_goal_pages" => {
                self.reading_goal_pages =
                    value.parse().map_err(|_| invalid("expected a number".into()))?
            }
            "training_days_goal" => {
                self.training_days_goal =
                    value.parse().map_err(|_| invalid("expected a number".into()))?
            }
            "selected_training_days" => {
                self.selected_training_days =
                    value.split(',').map(|s| s.trim().to_string()).collect()
            }
            other => return Err(invalid(format!("unknown profile key '{other}'")).into()),
        }
        Ok(())
    }
}
