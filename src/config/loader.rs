use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::config::AppConfig;

const CONFIG_DIR: &str = "runsh";
const CONFIG_FILE: &str = "config.toml";

pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join(CONFIG_DIR))
}

pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|p| p.join(CONFIG_FILE))
}

/// Load the config from the platform config directory, or defaults.
pub fn load() -> color_eyre::Result<AppConfig> {
    let Some(path) = config_path() else {
        debug!("No config directory found, using defaults");
        return Ok(AppConfig::default());
    };
    load_from(&path)
}

/// Load the config at `path`, or defaults when the file does not exist.
pub fn load_from(path: &Path) -> color_eyre::Result<AppConfig> {
    if !path.exists() {
        debug!(path = %path.display(), "Config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    let content = fs::read_to_string(path)?;
    let config: AppConfig = toml::from_str(&content)?;
    debug!(path = %path.display(), aliases = config.aliases.len(), "Loaded config");
    Ok(config)
}

pub fn save(config: &AppConfig) -> color_eyre::Result<()> {
    let Some(path) = config_path() else {
        warn!("Could not determine config directory");
        return Ok(());
    };
    save_to(config, &path)
}

pub fn save_to(config: &AppConfig, path: &Path) -> color_eyre::Result<()> {
    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }

    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    debug!(path = %path.display(), "Saved config");
    Ok(())
}
