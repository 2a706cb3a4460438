mod config;
pub mod database;

pub use config::Profile;
pub use database::{Database, MeditationLogRecord, WorkoutLogRecord};

use std::path::PathBuf;

use crate::error::{ConfigError, Result};

/// Returns `~/.config/voidhabit[-dev]/` based on VOIDHABIT_ENV.
///
/// Set VOIDHABIT_ENV=dev to use a development data directory.
pub fn data_dir() -> Result<PathBuf> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("VOIDHABIT_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("voidhabit-dev")
    } else {
        base_dir.join("voidhabit")
    };

    std::fs::create_dir_all(&dir).map_err(|e| ConfigError::LoadFailed {
        path: dir.clone(),
        message: e.to_string(),
    })?;
    Ok(dir)
}
