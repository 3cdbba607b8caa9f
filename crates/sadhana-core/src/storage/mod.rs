pub mod config;
pub mod streak_db;

pub use config::Config;
pub use streak_db::StreakDb;

use std::path::PathBuf;

/// Returns `~/.config/sadhana[-dev]/` based on SADHANA_ENV.
///
/// Set SADHANA_ENV=dev to use development data directory.
///
/// # Errors
/// Returns an error if the home directory cannot be determined or if
/// creating the config directory fails.
pub fn data_dir() -> Result<PathBuf, Box<dyn std::error::Error>> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("SADHANA_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("sadhana-dev")
    } else {
        base_dir.join("sadhana")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
