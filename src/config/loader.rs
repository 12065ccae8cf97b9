//! Configuration loading logic

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use super::schema::Config;
use crate::error::PiarError;

/// Environment variable pointing at an explicit config file
pub const CONFIG_ENV: &str = "PIAR_CONFIG";

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let mut config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        config.source = Some(path.to_path_buf());
        Ok(config)
    }

    /// Load configuration with fallback
    ///
    /// Load priority:
    /// 1. `PIAR_CONFIG` (must exist when set)
    /// 2. Local config (.piar.toml in current directory)
    /// 3. Global config (~/.config/piar/config.toml)
    /// 4. Default config
    ///
    /// # Errors
    /// Returns an error if `PIAR_CONFIG` names a missing file, or if a
    /// configuration file exists but cannot be read or parsed
    pub fn load() -> Result<Self> {
        if let Some(explicit) = std::env::var_os(CONFIG_ENV).filter(|value| !value.is_empty()) {
            let path = PathBuf::from(explicit);
            if !path.is_file() {
                return Err(PiarError::MissingConfiguration("config file (PIAR_CONFIG)"))
                    .with_context(|| format!("{} does not exist", path.display()));
            }
            return Self::from_file(&path);
        }

        let local_config = Self::local_config_path();
        if local_config.exists() {
            return Self::from_file(&local_config);
        }

        if let Some(global_config) = Self::global_config_path() {
            if global_config.exists() {
                return Self::from_file(&global_config);
            }
        }

        Ok(Self::default())
    }

    /// Get the local config path
    /// Returns the path to the local config file in the current directory
    #[must_use]
    pub fn local_config_path() -> PathBuf {
        PathBuf::from(".piar.toml")
    }

    /// Get the global config path
    /// Respects `XDG_CONFIG_HOME` environment variable on all platforms.
    /// Fallback: `$HOME/.config/piar/config.toml`
    #[must_use]
    pub fn global_config_path() -> Option<PathBuf> {
        let config_home = std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .filter(|p| p.is_absolute())
            .or_else(|| dirs::home_dir().map(|home| home.join(".config")))?;

        Some(config_home.join("piar").join("config.toml"))
    }

    /// Resolve a path relative to the directory of the file this config came from
    #[must_use]
    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            return path.to_path_buf();
        }
        self.source
            .as_deref()
            .and_then(Path::parent)
            .map_or_else(|| path.to_path_buf(), |dir| dir.join(path))
    }
}
