use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use crate::clipboard::BackendKind;
use crate::models::default_max_size;

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
}

/// General configuration settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Number of clipboard entries kept at startup
    #[serde(default = "default_max_history")]
    pub max_history: NonZeroUsize,

    /// Minimum level written to the log file
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Minimum level shown in the TUI status line
    #[serde(default = "default_flash_level")]
    pub flash_level: String,

    /// How long a status line message stays visible
    #[serde(default = "default_flash_message_duration_ms")]
    pub flash_message_duration_ms: u64,

    /// Clipboard backend selection
    #[serde(default)]
    pub backend: BackendKind,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        GeneralConfig {
            max_history: default_max_history(),
            log_level: default_log_level(),
            flash_level: default_flash_level(),
            flash_message_duration_ms: default_flash_message_duration_ms(),
            backend: BackendKind::default(),
        }
    }
}

// Default value functions for serde
fn default_max_history() -> NonZeroUsize {
    default_max_size()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_flash_level() -> String {
    "warn".to_string()
}

fn default_flash_message_duration_ms() -> u64 {
    3000
}

impl Config {
    /// Load configuration from an explicit TOML file
    /// Missing keys fall back to their defaults
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;

        let config: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {:?}", path))?;

        log::info!("Loaded configuration from {:?}", path);
        log::debug!(
            "Config: max_history={}, backend={:?}",
            config.general.max_history,
            config.general.backend
        );

        Ok(config)
    }

    /// Load from `path` if given, otherwise use defaults
    /// No config file is read implicitly
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Config::default()),
        }
    }
}

/// Directory for log files
///
/// XDG Base Directory Specification:
/// - State: $XDG_STATE_HOME/clipring (default: ~/.local/state/clipring)
pub fn log_directory() -> Result<PathBuf> {
    if let Ok(xdg_state) = env::var("XDG_STATE_HOME")
        && !xdg_state.is_empty()
    {
        return Ok(PathBuf::from(xdg_state).join("clipring"));
    }

    let home = env::var("HOME").context("HOME environment variable not set")?;
    Ok(PathBuf::from(home).join(".local/state/clipring"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DEFAULT_MAX_HISTORY;

    #[test]
    fn test_config_defaults() {
        let config = GeneralConfig::default();
        assert_eq!(config.max_history.get(), DEFAULT_MAX_HISTORY);
        assert_eq!(config.log_level, "info");
        assert_eq!(config.flash_level, "warn");
        assert_eq!(config.flash_message_duration_ms, 3000);
        assert_eq!(config.backend, BackendKind::Auto);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let toml_str = r#"
        [general]
        max_history = 50
        backend = "wayland"
        "#;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.max_history.get(), 50);
        assert_eq!(config.general.backend, BackendKind::Wayland);
        assert_eq!(config.general.log_level, "info");
    }

    #[test]
    fn test_empty_config_is_default() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_example_config_parses_to_defaults() {
        let example = include_str!("../clipring.toml.example");
        let config: Config = toml::from_str(example).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_zero_max_history_rejected() {
        let toml_str = r#"
        [general]
        max_history = 0
        "#;

        assert!(toml::from_str::<Config>(toml_str).is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = env::temp_dir().join(format!("clipring-config-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("clipring.toml");
        fs::write(&path, "[general]\nflash_level = \"info\"\n").unwrap();

        let config = Config::load_or_default(Some(&path)).unwrap();
        assert_eq!(config.general.flash_level, "info");

        assert!(Config::load(&dir.join("missing.toml")).is_err());
        fs::remove_dir_all(&dir).unwrap();
    }
}
