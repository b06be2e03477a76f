//! Configuration module for the photo copier
//!
//! Supports loading an optional configuration file in TOML format. Every
//! section has defaults matching the plain command-line behavior, so a config
//! file only needs the values it changes.

use crate::core::copier::CopyOptions;
use crate::core::locator::LocatorOptions;
use crate::shell::DEFAULT_BUFFER_SIZE;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Copy settings
    pub copy: CopyConfig,

    /// Device identification settings
    pub device: DeviceConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

/// Copy settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CopyConfig {
    /// Directory photos are copied to (empty = directory of the executable)
    pub target_directory: PathBuf,

    /// Replace local files that already exist
    pub overwrite: bool,

    /// Case-sensitive suffixes a file extension must end with to be copied
    pub extensions: Vec<String>,

    /// File name prefixes that are never copied (edited variants)
    pub skip_prefixes: Vec<String>,

    /// Read buffer size in bytes
    pub buffer_size: usize,
}

/// Device identification settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceConfig {
    /// Display names of the "this computer" folder on the desktop
    pub computer_names: Vec<String>,

    /// Name of a phone's first top-level folder
    pub storage_folder: String,

    /// Name of the photo folder inside the storage folder
    pub dcim_folder: String,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: error, warn, info, debug, trace
    pub level: String,

    /// Log to file
    pub log_to_file: bool,

    /// Log file path
    pub log_file: PathBuf,
}

impl Default for CopyConfig {
    fn default() -> Self {
        Self {
            target_directory: PathBuf::new(),
            overwrite: false,
            extensions: vec!["JPG".to_string()],
            skip_prefixes: vec!["IMG_E".to_string()],
            buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            computer_names: vec![
                "Computer".to_string(),
                "This PC".to_string(),
                "Dieser PC".to_string(),
            ],
            storage_folder: "Internal Storage".to_string(),
            dcim_folder: "DCIM".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "error".to_string(),
            log_to_file: false,
            log_file: PathBuf::from("phone_photo_copier.log"),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)
            .map_err(|e| ConfigError::ReadError(path.to_path_buf(), e.to_string()))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| ConfigError::ParseError(path.to_path_buf(), e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// Reject values the copier cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.copy.buffer_size == 0 {
            return Err(ConfigError::InvalidValue(
                "copy.buffer_size".to_string(),
                "must be greater than zero".to_string(),
            ));
        }
        if self.copy.extensions.is_empty() {
            return Err(ConfigError::InvalidValue(
                "copy.extensions".to_string(),
                "at least one extension is required".to_string(),
            ));
        }
        if self.copy.extensions.iter().any(|e| e.is_empty()) {
            return Err(ConfigError::InvalidValue(
                "copy.extensions".to_string(),
                "extensions must not be empty strings".to_string(),
            ));
        }
        if self.copy.skip_prefixes.iter().any(|p| p.is_empty()) {
            return Err(ConfigError::InvalidValue(
                "copy.skip_prefixes".to_string(),
                "prefixes must not be empty strings".to_string(),
            ));
        }
        if self.device.computer_names.is_empty() {
            return Err(ConfigError::InvalidValue(
                "device.computer_names".to_string(),
                "at least one name is required".to_string(),
            ));
        }
        Ok(())
    }

    /// Copy options for the given target directory
    pub fn copy_options(&self, target_directory: PathBuf) -> CopyOptions {
        CopyOptions {
            target_directory,
            overwrite: self.copy.overwrite,
            extensions: self.copy.extensions.clone(),
            skip_prefixes: self.copy.skip_prefixes.clone(),
            buffer_size: self.copy.buffer_size,
        }
    }

    /// Options for finding the computer folder and the phone's DCIM folder
    pub fn locator_options(&self) -> LocatorOptions {
        LocatorOptions {
            computer_names: self.device.computer_names.clone(),
            storage_folder: self.device.storage_folder.clone(),
            dcim_folder: self.device.dcim_folder.clone(),
        }
    }
}

/// Configuration error types
#[derive(Debug)]
pub enum ConfigError {
    /// Configuration file was not found at the specified path
    FileNotFound(PathBuf),
    /// Failed to read the configuration file
    ReadError(PathBuf, String),
    /// Failed to parse the configuration file (invalid TOML)
    ParseError(PathBuf, String),
    /// A value is out of range
    InvalidValue(String, String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::FileNotFound(path) => {
                write!(f, "Configuration file not found: {}", path.display())
            }
            ConfigError::ReadError(path, err) => {
                write!(
                    f,
                    "Failed to read config file '{}': {}",
                    path.display(),
                    err
                )
            }
            ConfigError::ParseError(path, err) => {
                write!(
                    f,
                    "Failed to parse config file '{}': {}",
                    path.display(),
                    err
                )
            }
            ConfigError::InvalidValue(key, err) => {
                write!(f, "Invalid configuration value '{}': {}", key, err)
            }
        }
    }
}

impl std::error::Error for ConfigError {}
