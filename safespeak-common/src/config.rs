//! Configuration loading for the SafeSpeak workflow host
//!
//! Values resolve in priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default (fallback)
//!
//! The binary's argument parser covers tiers 1 and 2 and hands the result to
//! [`UiConfig::resolve`] as [`ConfigOverrides`].

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Default HTTP port of the workflow host
pub const DEFAULT_PORT: u16 = 5790;
/// Default challenge phrase endpoint
pub const DEFAULT_PHRASE_URL: &str = "http://127.0.0.1:5000/get-phrase";
/// Default verification endpoint
pub const DEFAULT_VERIFY_URL: &str = "http://127.0.0.1:5000/verify-audio";
/// Multipart field name the verification service reads the recording from
pub const DEFAULT_UPLOAD_FIELD: &str = "audio_file";
/// Environment variable naming an explicit config file
pub const CONFIG_PATH_ENV: &str = "SAFESPEAK_CONFIG";

/// Bootstrap configuration loaded from TOML file
///
/// Every field is optional; missing values fall through to compiled defaults.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TomlConfig {
    /// HTTP server port
    #[serde(default)]
    pub port: Option<u16>,

    /// Challenge phrase endpoint
    #[serde(default)]
    pub phrase_url: Option<String>,

    /// Verification endpoint
    #[serde(default)]
    pub verify_url: Option<String>,

    /// Multipart field name for the uploaded recording
    #[serde(default)]
    pub upload_field: Option<String>,

    /// Logging configuration (optional)
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Values supplied on the command line or through the environment
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub port: Option<u16>,
    pub phrase_url: Option<String>,
    pub verify_url: Option<String>,
    pub upload_field: Option<String>,
    pub log_level: Option<String>,
}

/// Fully resolved configuration of the workflow host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiConfig {
    pub port: u16,
    pub phrase_url: String,
    pub verify_url: String,
    pub upload_field: String,
    pub log_level: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            phrase_url: DEFAULT_PHRASE_URL.to_string(),
            verify_url: DEFAULT_VERIFY_URL.to_string(),
            upload_field: DEFAULT_UPLOAD_FIELD.to_string(),
            log_level: default_log_level(),
        }
    }
}

impl UiConfig {
    /// Merge overrides over the TOML file over compiled defaults
    pub fn resolve(overrides: &ConfigOverrides, toml_config: &TomlConfig) -> Result<Self> {
        let defaults = UiConfig::default();

        let config = UiConfig {
            port: overrides
                .port
                .or(toml_config.port)
                .unwrap_or(defaults.port),
            phrase_url: overrides
                .phrase_url
                .clone()
                .or_else(|| toml_config.phrase_url.clone())
                .unwrap_or(defaults.phrase_url),
            verify_url: overrides
                .verify_url
                .clone()
                .or_else(|| toml_config.verify_url.clone())
                .unwrap_or(defaults.verify_url),
            upload_field: overrides
                .upload_field
                .clone()
                .or_else(|| toml_config.upload_field.clone())
                .unwrap_or(defaults.upload_field),
            log_level: overrides
                .log_level
                .clone()
                .unwrap_or_else(|| toml_config.logging.level.clone()),
        };

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("phrase_url", &self.phrase_url),
            ("verify_url", &self.verify_url),
            ("upload_field", &self.upload_field),
        ] {
            if value.trim().is_empty() {
                return Err(Error::Config(format!("{} must not be empty", name)));
            }
        }

        for (name, value) in [("phrase_url", &self.phrase_url), ("verify_url", &self.verify_url)] {
            if !(value.starts_with("http://") || value.starts_with("https://")) {
                return Err(Error::Config(format!(
                    "{} must be an http(s) URL, got {:?}",
                    name, value
                )));
            }
        }

        if self.port == 0 {
            return Err(Error::Config("port must be non-zero".to_string()));
        }

        Ok(())
    }
}

/// Locate the TOML config file
///
/// Priority: explicit path → `SAFESPEAK_CONFIG` → platform config directory.
/// Returns `None` when no candidate can be named at all.
pub fn resolve_config_path(cli_arg: Option<&Path>) -> Option<PathBuf> {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        return Some(path.to_path_buf());
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
        if !path.trim().is_empty() {
            return Some(PathBuf::from(path));
        }
    }

    // Priority 3: ~/.config/safespeak/safespeak-ui.toml (or platform equivalent)
    dirs::config_dir().map(|d| d.join("safespeak").join("safespeak-ui.toml"))
}

/// Load the TOML config file at `path`
///
/// A missing file yields defaults; an unreadable or malformed file is an error.
pub fn load_toml_config(path: &Path) -> Result<TomlConfig> {
    if !path.exists() {
        debug!("No config file at {}, using defaults", path.display());
        return Ok(TomlConfig::default());
    }

    let content = std::fs::read_to_string(path)?;
    let config: TomlConfig = toml::from_str(&content)?;

    info!("Loaded configuration from {}", path.display());
    Ok(config)
}
