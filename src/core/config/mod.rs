//! core::config
//!
//! Configuration schema and loading.
//!
//! # Precedence
//!
//! Configuration values are resolved in this order (later overrides earlier):
//! 1. Default values
//! 2. Config file
//! 3. CLI flags (not handled here)
//!
//! # Config Locations
//!
//! Searched in order:
//! 1. `$FB_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/formblocks/config.toml`
//! 3. `~/.formblocks/config.toml`
//!
//! # Example
//!
//! ```no_run
//! use formblocks::core::config::Config;
//!
//! let config = Config::load().unwrap();
//! println!("Model: {}", config.generator_model());
//! println!("Audit log: {}", config.audit_path().unwrap().display());
//! ```

pub mod schema;

pub use schema::{AuditConfig, ExportConfig, FileConfig, GeneratorConfig};

/// Keys understood by [`Config::get`] and [`Config::set`].
pub const KEYS: [&str; 6] = [
    "generator.endpoint",
    "generator.model",
    "generator.api_key_env",
    "generator.max_completion_tokens",
    "audit.path",
    "export.out_dir",
];

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default chat-completions endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";

/// Default model name.
pub const DEFAULT_MODEL: &str = "gpt-5-mini";

/// Default environment variable holding the generator key.
pub const DEFAULT_API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Default reply token bound.
pub const DEFAULT_MAX_COMPLETION_TOKENS: u32 = 2000;

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("failed to write config file '{path}': {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config value: {0}")]
    InvalidValue(String),

    #[error("home directory not found")]
    NoHomeDir,
}

/// Loaded configuration with defaults applied through accessors.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Values read from the config file
    pub file: FileConfig,
    /// Path the file was loaded from, if any
    loaded_from: Option<PathBuf>,
}

impl Config {
    /// Load configuration from the default locations.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file exists but cannot be parsed or
    /// fails validation. A missing file is not an error.
    pub fn load() -> Result<Config, ConfigError> {
        match Self::locate() {
            Some(path) => Self::load_from(&path),
            None => Ok(Config::default()),
        }
    }

    /// Load configuration from an explicit path.
    pub fn load_from(path: &Path) -> Result<Config, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let file: FileConfig = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        file.validate()?;

        tracing::debug!(path = %path.display(), "loaded config");
        Ok(Config {
            file,
            loaded_from: Some(path.to_path_buf()),
        })
    }

    /// First existing config file in precedence order.
    fn locate() -> Option<PathBuf> {
        if let Ok(path) = std::env::var("FB_CONFIG") {
            let path = PathBuf::from(path);
            if path.exists() {
                return Some(path);
            }
        }

        if let Ok(xdg_home) = std::env::var("XDG_CONFIG_HOME") {
            let path = PathBuf::from(xdg_home).join("formblocks/config.toml");
            if path.exists() {
                return Some(path);
            }
        }

        dirs::home_dir()
            .map(|home| home.join(".formblocks/config.toml"))
            .filter(|path| path.exists())
    }

    /// Where `set` writes: the loaded file, else `$FB_CONFIG`, else
    /// `~/.formblocks/config.toml`.
    pub fn write_target(&self) -> Result<PathBuf, ConfigError> {
        if let Some(path) = &self.loaded_from {
            return Ok(path.clone());
        }
        if let Ok(path) = std::env::var("FB_CONFIG") {
            return Ok(PathBuf::from(path));
        }
        let home = dirs::home_dir().ok_or(ConfigError::NoHomeDir)?;
        Ok(home.join(".formblocks/config.toml"))
    }

    /// Set one value and persist the file.
    ///
    /// Returns the path written.
    pub fn set(&mut self, key: &str, value: &str) -> Result<PathBuf, ConfigError> {
        self.file.set(key, value)?;
        let path = self.write_target()?;
        Self::write_to(&path, &self.file)?;
        self.loaded_from = Some(path.clone());
        Ok(path)
    }

    /// Effective value of a dotted key, defaults applied.
    ///
    /// `None` for keys without a value or default (`export.out_dir`).
    pub fn get(&self, key: &str) -> Result<Option<String>, ConfigError> {
        let value = match key {
            "generator.endpoint" => Some(self.generator_endpoint().to_string()),
            "generator.model" => Some(self.generator_model().to_string()),
            "generator.api_key_env" => Some(self.generator_api_key_env().to_string()),
            "generator.max_completion_tokens" => {
                Some(self.generator_max_completion_tokens().to_string())
            }
            "audit.path" => Some(self.audit_path()?.display().to_string()),
            "export.out_dir" => self.export_out_dir().map(|p| p.display().to_string()),
            other => {
                return Err(ConfigError::InvalidValue(format!(
                    "unknown config key '{}'",
                    other
                )))
            }
        };
        Ok(value)
    }

    /// Write config atomically to `path`.
    ///
    /// Creates parent directories if needed. Writes to a temp file in the
    /// same directory and renames it over the target.
    pub fn write_to(path: &Path, config: &FileConfig) -> Result<(), ConfigError> {
        config.validate()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::WriteError {
                path: path.to_path_buf(),
                source: e,
            })?;
        }

        let contents =
            toml::to_string_pretty(config).map_err(|e| ConfigError::InvalidValue(e.to_string()))?;

        let temp_path = path.with_extension("toml.tmp");
        let mut file = fs::File::create(&temp_path).map_err(|e| ConfigError::WriteError {
            path: temp_path.clone(),
            source: e,
        })?;

        file.write_all(contents.as_bytes())
            .map_err(|e| ConfigError::WriteError {
                path: temp_path.clone(),
                source: e,
            })?;

        file.sync_all().map_err(|e| ConfigError::WriteError {
            path: temp_path.clone(),
            source: e,
        })?;

        fs::rename(&temp_path, path).map_err(|e| ConfigError::WriteError {
            path: path.to_path_buf(),
            source: e,
        })?;

        Ok(())
    }

    // =========================================================================
    // Accessor methods with defaults
    // =========================================================================

    fn generator(&self) -> Option<&GeneratorConfig> {
        self.file.generator.as_ref()
    }

    /// Chat-completions endpoint.
    pub fn generator_endpoint(&self) -> &str {
        self.generator()
            .and_then(|g| g.endpoint.as_deref())
            .unwrap_or(DEFAULT_ENDPOINT)
    }

    pub fn generator_model(&self) -> &str {
        self.generator()
            .and_then(|g| g.model.as_deref())
            .unwrap_or(DEFAULT_MODEL)
    }

    /// Name of the environment variable holding the bearer key.
    pub fn generator_api_key_env(&self) -> &str {
        self.generator()
            .and_then(|g| g.api_key_env.as_deref())
            .unwrap_or(DEFAULT_API_KEY_ENV)
    }

    pub fn generator_max_completion_tokens(&self) -> u32 {
        self.generator()
            .and_then(|g| g.max_completion_tokens)
            .unwrap_or(DEFAULT_MAX_COMPLETION_TOKENS)
    }

    /// Audit log path.
    ///
    /// Defaults to `~/.formblocks/audit.jsonl`.
    pub fn audit_path(&self) -> Result<PathBuf, ConfigError> {
        if let Some(path) = self.file.audit.as_ref().and_then(|a| a.path.clone()) {
            return Ok(path);
        }
        let home = dirs::home_dir().ok_or(ConfigError::NoHomeDir)?;
        Ok(home.join(".formblocks/audit.jsonl"))
    }

    /// Export directory, if configured.
    pub fn export_out_dir(&self) -> Option<&Path> {
        self.file.export.as_ref().and_then(|e| e.out_dir.as_deref())
    }

    /// Path the config was loaded from.
    pub fn loaded_from(&self) -> Option<&Path> {
        self.loaded_from.as_deref()
    }
}
