// Configuration management
//
// Settings for the headless runner: how the PPU is wired, how long it runs
// and how much it logs.

use crate::ppu::Mirroring;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Default configuration file path
pub const CONFIG_FILE: &str = "ppu_config.toml";

/// Errors that can occur while loading or saving configuration
#[derive(Debug)]
pub enum ConfigError {
    /// I/O error
    Io(io::Error),

    /// The file is not valid configuration TOML
    Parse(toml::de::Error),

    /// The configuration could not be encoded
    Serialize(toml::ser::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "I/O error: {}", e),
            ConfigError::Parse(e) => write!(f, "invalid configuration: {}", e),
            ConfigError::Serialize(e) => write!(f, "failed to encode configuration: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
            ConfigError::Serialize(e) => Some(e),
        }
    }
}

impl From<io::Error> for ConfigError {
    fn from(e: io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl From<toml::ser::Error> for ConfigError {
    fn from(e: toml::ser::Error) -> Self {
        ConfigError::Serialize(e)
    }
}

/// Runner configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoreConfig {
    /// Video settings
    pub video: VideoConfig,

    /// Run settings
    pub run: RunConfig,

    /// Logging settings
    pub log: LogConfig,
}

/// Video configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VideoConfig {
    /// Name table mirroring
    pub mirroring: Mirroring,

    /// Let the PPU allocate its own frame buffer instead of using a
    /// presentation-supplied one
    pub headless: bool,
}

/// Run configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Frames to emulate
    pub frames: u32,

    /// Enable NMI on VBlank before running
    pub nmi_enabled: bool,

    /// Save a PNG of the last frame
    pub screenshot: bool,

    /// Screenshot directory
    pub screenshot_directory: PathBuf,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Level filter: "error", "warn", "info", "debug" or "trace"
    pub level: String,

    /// Print the final PPU state as JSON
    pub json_state: bool,
}

impl Default for VideoConfig {
    fn default() -> Self {
        VideoConfig {
            mirroring: Mirroring::Horizontal,
            headless: true,
        }
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        RunConfig {
            frames: 60,
            nmi_enabled: true,
            screenshot: false,
            screenshot_directory: PathBuf::from("screenshots"),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            level: "info".to_string(),
            json_state: false,
        }
    }
}

impl CoreConfig {
    /// Load configuration from `path`, falling back to defaults
    ///
    /// Only a missing file falls back: the default configuration is
    /// returned and written to `path` (best effort). Any other error,
    /// including invalid TOML, is returned and the file is left alone.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        match Self::load(&path) {
            Err(ConfigError::Io(e)) if e.kind() == io::ErrorKind::NotFound => {
                let config = Self::default();
                // Try to save the default config, but don't fail if we can't
                let _ = config.save(&path);
                Ok(config)
            }
            result => result,
        }
    }

    /// Load configuration from `path`
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Save configuration to `path`
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }
}
