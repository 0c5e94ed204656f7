//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub interview: InterviewConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Guided interview configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct InterviewConfig {
    /// Re-prompts allowed per question before an answer is accepted as given
    #[serde(default = "default_retry_ceiling")]
    pub retry_ceiling: u32,

    /// Age recorded when the user doesn't know or never gives one
    #[serde(default = "default_age")]
    pub default_age: u8,

    /// Pause before the diagnosis is shown
    #[serde(default = "default_thinking_delay")]
    pub thinking_delay_ms: u64,
}

fn default_retry_ceiling() -> u32 {
    1
}

fn default_age() -> u8 {
    30
}

fn default_thinking_delay() -> u64 {
    2000 // 2 seconds
}

impl Default for InterviewConfig {
    fn default() -> Self {
        Self {
            retry_ceiling: default_retry_ceiling(),
            default_age: default_age(),
            thinking_delay_ms: default_thinking_delay(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,

    pub file: Option<String>,
}

fn default_log_level() -> String {
    // Logs share the terminal with the interview
    "warn".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            file: None,
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("raredex").join("config.toml")),
            Some(PathBuf::from("./raredex.toml")),
        ];

        for path_opt in config_paths.iter().flatten() {
            if path_opt.exists() {
                match Self::load_with_env(path_opt) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path_opt);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path_opt, e);
                    }
                }
            }
        }

        tracing::debug!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        // Interview overrides
        if let Ok(ceiling) = std::env::var("RAREDEX_RETRY_CEILING") {
            if let Ok(c) = ceiling.parse() {
                self.interview.retry_ceiling = c;
            }
        }
        if let Ok(age) = std::env::var("RAREDEX_DEFAULT_AGE") {
            if let Ok(a) = age.parse() {
                self.interview.default_age = a;
            }
        }
        if let Ok(delay) = std::env::var("RAREDEX_THINKING_DELAY_MS") {
            if let Ok(d) = delay.parse() {
                self.interview.thinking_delay_ms = d;
            }
        }

        // Logging overrides
        if let Ok(level) = std::env::var("RAREDEX_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("RAREDEX_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# RareDex Configuration
#
# Environment variables override these settings:
# - RAREDEX_RETRY_CEILING
# - RAREDEX_DEFAULT_AGE
# - RAREDEX_THINKING_DELAY_MS
# - RAREDEX_LOG_LEVEL
# - RAREDEX_LOG_FORMAT

[interview]
# How many times a question is re-asked before an unclear answer is accepted
retry_ceiling = 1

# Age recorded when the user doesn't know their age
default_age = 30

# Pause before showing the diagnosis (ms)
thinking_delay_ms = 2000

[logging]
# Log level: trace, debug, info, warn, error
level = "warn"

# Log format: pretty (for development) or json (for production)
format = "pretty"

# Optional log file path
# file = "/var/log/raredex/raredex.log"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_parses() {
        let config: Config = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(config.interview, InterviewConfig::default());
        assert_eq!(config.logging, LoggingConfig::default());
    }

    #[test]
    fn test_load_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[interview]\nretry_ceiling = 3").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.interview.retry_ceiling, 3);
        assert_eq!(config.interview.default_age, 30);
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(&dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_load_invalid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[interview]\nretry_ceiling = \"lots\"").unwrap();

        let err = Config::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
