mod config;
pub mod database;

pub use config::{CompletionConfig, Config, PlantConfig, RewardsConfig, SessionConfig};
pub use database::Database;

use std::path::PathBuf;

use crate::error::ConfigError;

/// Returns the HabitGrove data directory, creating it if needed.
///
/// `HABITGROVE_DATA_DIR` overrides the location outright. Otherwise the
/// directory is `~/.config/habitgrove[-dev]/`, where HABITGROVE_ENV=dev
/// selects the development directory.
///
/// # Errors
/// Returns an error if the directory cannot be created.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let dir = match std::env::var_os("HABITGROVE_DATA_DIR") {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env = std::env::var("HABITGROVE_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("habitgrove-dev")
            } else {
                base_dir.join("habitgrove")
            }
        }
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| ConfigError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
