use std::path::PathBuf;

use color_eyre::Result;
use color_eyre::eyre::eyre;
use tracing::{debug, warn};

use super::AppConfig;

fn config_dir() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|path| path.join("lazygift"))
        .ok_or_else(|| eyre!("Could not determine config directory"))
}

fn config_path() -> Result<PathBuf> {
    Ok(config_dir()?.join("config.toml"))
}

/// Load the configuration, falling back to defaults when the file is
/// missing or unparseable.
pub fn load() -> Result<AppConfig> {
    let path = config_path()?;
    if !path.exists() {
        debug!("No config file at {}, using defaults", path.display());
        return Ok(AppConfig::default());
    }

    let content = std::fs::read_to_string(&path)?;
    match toml::from_str(&content) {
        Ok(config) => Ok(config),
        Err(e) => {
            warn!("Failed to parse config file {}: {e}", path.display());
            Ok(AppConfig::default())
        }
    }
}

/// Write the configuration back to disk, creating the directory if needed.
pub fn save(config: &AppConfig) -> Result<()> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir)?;
    let content = toml::to_string_pretty(config)?;
    std::fs::write(config_path()?, content)?;
    Ok(())
}

/// Remember the theme that is currently open so the next launch can
/// preselect it.
///
/// Reads and rewrites the whole file; callers serialize by invoking this
/// from a single task.
pub fn save_last_theme(theme_key: &str) -> Result<()> {
    let mut config = load()?;
    config.last_theme = Some(theme_key.to_string());
    save(&config)
}
