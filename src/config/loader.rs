use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

use crate::args::OptionMap;
use crate::config::types::ArgsFile;

/// Errors that can occur when loading argument or option files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },
}

impl ArgsFile {
    /// Argument file used when none is given: `./argset.toml`.
    pub fn default_path() -> PathBuf {
        PathBuf::from("argset.toml")
    }

    /// Loads and validates an argument file.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let file: ArgsFile = read_toml(path)?;
        file.validate()?;
        Ok(file)
    }

    /// Validates the file.
    ///
    /// Checks:
    /// - Every value in `[options]` is a scalar
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_scalars(&self.options)
    }
}

/// Returns the path of the user-level options file.
///
/// Uses `~/.config/argset/options.toml` on Unix/macOS, or the equivalent
/// via `dirs::config_dir()`. Falls back to the current directory.
pub fn default_options_path() -> PathBuf {
    let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config_dir.join("argset").join("options.toml")
}

/// Loads a flat TOML table of option overrides.
pub fn load_options_from(path: &Path) -> Result<OptionMap, ConfigError> {
    let options: OptionMap = read_toml(path)?;
    validate_scalars(&options)?;
    Ok(options)
}

fn read_toml<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;

    let parse_error = |e: toml::de::Error| ConfigError::ParseError {
        path: path.to_path_buf(),
        source: e,
    };
    let table: toml::Table = toml::from_str(&content).map_err(parse_error)?;
    datetimes_to_strings(toml::Value::Table(table))
        .try_into()
        .map_err(parse_error)
}

/// TOML datetimes have no JSON counterpart; keep their TOML text.
fn datetimes_to_strings(value: toml::Value) -> toml::Value {
    match value {
        toml::Value::Datetime(dt) => toml::Value::String(dt.to_string()),
        toml::Value::Array(items) => {
            toml::Value::Array(items.into_iter().map(datetimes_to_strings).collect())
        }
        toml::Value::Table(table) => toml::Value::Table(
            table
                .into_iter()
                .map(|(k, v)| (k, datetimes_to_strings(v)))
                .collect(),
        ),
        other => other,
    }
}

fn validate_scalars(options: &OptionMap) -> Result<(), ConfigError> {
    for (key, value) in options {
        if matches!(value, Value::Array(_) | Value::Object(_)) {
            return Err(ConfigError::ValidationError {
                message: format!("Option '{}' must be a scalar value", key),
            });
        }
    }
    Ok(())
}
