pub mod types;

use crate::error::{ConfigError, Result};
use log::{debug, warn};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE_NAME: &str = ".toolkit.toml";

/// Get the global config file path (~/.toolkit.toml)
pub fn global_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(CONFIG_FILE_NAME))
}

/// Get the local config file path (<dir>/.toolkit.toml)
pub fn local_config_path(dir: &Path) -> PathBuf {
    dir.join(CONFIG_FILE_NAME)
}

/// Load configuration from file or use defaults.
/// Checks the local config first, then the global config. Unreadable or
/// malformed files are skipped with a warning.
pub fn load_config(dir: Option<&Path>) -> types::Config {
    let candidates = dir
        .map(local_config_path)
        .into_iter()
        .chain(global_config_path());

    for path in candidates {
        if !path.exists() {
            continue;
        }
        match load_config_file(&path) {
            Ok(config) => {
                debug!("Loaded configuration from {}", path.display());
                return config;
            }
            Err(e) => warn!("Ignoring {}: {}", path.display(), e),
        }
    }

    types::Config::default()
}

/// Load a specific configuration file, surfacing any failure
pub fn load_config_file(path: &Path) -> Result<types::Config> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.display().to_string(),
        source,
    })?;
    let config =
        toml::from_str(&content).map_err(|e| ConfigError::ParsingFailed(e.to_string()))?;
    Ok(config)
}
