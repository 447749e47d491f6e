use crate::source::InputFormat;
use radius_msgauth::LocateStrategy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Accepted values for `log_level` and `--log-level`
pub const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Checker configuration, loaded from an optional JSON file.
///
/// Command-line flags take precedence over every field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Shared secret used when none is given on the command line
    #[serde(default)]
    pub shared_secret: Option<String>,

    /// How input files are read: "auto", "binary" or "hex"
    #[serde(default)]
    pub input_format: InputFormat,

    /// How the attribute is located: "walk" or "scan"
    #[serde(default)]
    pub locate_strategy: LocateStrategy,

    /// Log level: "trace", "debug", "info", "warn", "error" (default: "warn")
    #[serde(default)]
    pub log_level: Option<String>,

    /// Print the result as JSON instead of text
    #[serde(default)]
    pub json_output: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            shared_secret: None,
            input_format: InputFormat::Auto,
            locate_strategy: LocateStrategy::Walk,
            log_level: None,
            json_output: false,
        }
    }
}

impl Config {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a JSON file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let contents = serde_json::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(ref secret) = self.shared_secret {
            if secret.is_empty() {
                return Err(ConfigError::Invalid(
                    "shared_secret must not be empty (omit it to be prompted)".to_string(),
                ));
            }
        }

        if let Some(ref level) = self.log_level {
            if !LOG_LEVELS.contains(&level.as_str()) {
                return Err(ConfigError::Invalid(format!(
                    "log_level '{}' is not one of {}",
                    level,
                    LOG_LEVELS.join(", ")
                )));
            }
        }

        Ok(())
    }

    /// Example configuration written by `--write-example-config`
    pub fn example() -> Self {
        Config {
            shared_secret: Some("testing123".to_string()),
            log_level: Some("warn".to_string()),
            ..Config::default()
        }
    }

    /// Level used when `RUST_LOG` is unset
    pub fn effective_log_level<'a>(&'a self, cli_level: Option<&'a str>) -> &'a str {
        cli_level
            .or(self.log_level.as_deref())
            .unwrap_or("warn")
    }
}
