//! Config persistence and path resolution for `Config`.
//!
//! Covers:
//! - `load` / `load_from` (YAML read, variable substitution, env overrides, validation)
//! - `load_unvalidated` / `load_from_unvalidated` (the same, minus validation)
//! - `save` / `save_to` (atomic write)
//! - XDG-style path helpers (`config_path`, `config_dir`)

use super::Config;
use super::env_vars;
use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};

impl Config {
    /// Load configuration from the default path, creating it if missing.
    ///
    /// A default config that cannot be written (read-only home, sandbox) is
    /// still returned; only the failure to save is logged.
    pub fn load() -> Result<Self> {
        let config = Self::load_unvalidated()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from an explicit file. The file must exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        let config = Self::load_from_unvalidated(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Like [`Config::load`], but skips `validate()` so callers can layer
    /// further overrides (command-line flags) before validating once.
    pub fn load_unvalidated() -> Result<Self> {
        let config_path = Self::config_path();
        log::info!("Config path: {:?}", config_path);

        if config_path.exists() {
            return Self::load_from_unvalidated(&config_path);
        }

        log::info!(
            "Config file not found, creating default at {:?}",
            config_path
        );
        let mut config = Self::default();
        if let Err(e) = config.save_to(&config_path) {
            log::warn!("Failed to save default config: {}", e);
        }
        config.apply_env_overrides();
        Ok(config)
    }

    /// Like [`Config::load_from`], but skips `validate()`.
    pub fn load_from_unvalidated(path: &Path) -> Result<Self> {
        log::info!("Loading config from {:?}", path);
        let contents = fs::read_to_string(path).map_err(crate::ConfigError::from)?;
        let mut config = Self::from_yaml(&contents)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Parse YAML text after `${VAR}` substitution. No overrides, no validation.
    pub fn from_yaml(contents: &str) -> Result<Self> {
        let allow_all = env_vars::pre_scan_allow_all_env_vars(contents);
        let contents = env_vars::substitute_variables_with_allowlist(contents, allow_all);
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Config =
            serde_yaml_ng::from_str(&contents).map_err(crate::ConfigError::from)?;
        Ok(config)
    }

    /// Save configuration to the default path
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    /// Save configuration to `path`, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let yaml = serde_yaml_ng::to_string(self)?;

        // Write to a temp file then rename so a crash never leaves a truncated config
        let temp_path = path.with_extension("yaml.tmp");
        fs::write(&temp_path, &yaml)?;
        fs::rename(&temp_path, path)?;

        Ok(())
    }

    /// Get the configuration file path (using XDG convention)
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.yaml")
    }

    /// Get the configuration directory path
    pub fn config_dir() -> PathBuf {
        #[cfg(target_os = "windows")]
        {
            if let Some(config_dir) = dirs::config_dir() {
                config_dir.join("vizai")
            } else {
                PathBuf::from(".")
            }
        }
        #[cfg(not(target_os = "windows"))]
        {
            // ~/.config/vizai on every Unix, macOS included
            if let Some(home_dir) = dirs::home_dir() {
                home_dir.join(".config").join("vizai")
            } else {
                PathBuf::from(".")
            }
        }
    }
}
