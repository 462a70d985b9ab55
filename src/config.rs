//! Configuration file support for polydraw.
//!
//! Settings live in a versioned JSON file. Every field has a default, so a
//! file only needs the entries it wants to change.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::drawer::{DrawerConfig, RenderStyle};
use crate::keybindings::KeyBindings;

/// Log level setting for the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Show only errors
    Error,
    /// Show errors and warnings
    Warn,
    /// Show errors, warnings, and info messages
    #[default]
    Info,
    /// Show debug-level logging
    Debug,
    /// Show all log messages including trace
    Trace,
}

impl LogLevel {
    /// Convert to log crate's LevelFilter.
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Current configuration file format version.
/// Increment this when making breaking changes to the config format.
pub const CONFIG_VERSION: u32 = 1;

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Version of the configuration file format
    pub version: u32,

    /// Written into the data file header
    pub app_name: String,

    /// Folder scanned recursively for images to review
    pub source_image_dir: PathBuf,

    /// Folder receiving the data file and previews
    pub results_dir: PathBuf,

    /// Log verbosity level
    pub log_level: LogLevel,

    /// Region editing parameters
    pub drawer: DrawerConfig,

    /// Preview colors and sizes
    pub style: RenderStyle,

    /// Review loop keys
    pub keys: KeyBindings,
}

impl AppConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self {
            version: CONFIG_VERSION,
            app_name: "polydraw".to_string(),
            source_image_dir: PathBuf::from("images"),
            results_dir: PathBuf::from("results"),
            log_level: LogLevel::default(),
            drawer: DrawerConfig::default(),
            style: RenderStyle::default(),
            keys: KeyBindings::default(),
        }
    }

    /// Serialize the configuration to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;

        if config.version > CONFIG_VERSION {
            return Err(ConfigError::VersionTooNew {
                file_version: config.version,
                supported_version: CONFIG_VERSION,
            });
        }

        Ok(config)
    }

    /// Read a configuration file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    /// Write the configuration, creating parent directories if needed.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, self.to_json()?)?;
        log::info!("Saved configuration to {:?}", path);
        Ok(())
    }

    /// Get the default config filename.
    pub fn default_filename() -> &'static str {
        "polydraw-config.json"
    }

    /// Get the default config file path.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn default_path() -> Option<PathBuf> {
        // Try to use XDG config directory, fall back to home directory
        if let Some(config_dir) = dirs::config_dir() {
            Some(config_dir.join("polydraw").join(Self::default_filename()))
        } else {
            dirs::home_dir().map(|home_dir| {
                home_dir
                    .join(".config")
                    .join("polydraw")
                    .join(Self::default_filename())
            })
        }
    }

    /// Try to load configuration from the default path.
    /// Returns None if the file doesn't exist or can't be read.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_default_path() -> Option<Self> {
        let path = Self::default_path()?;
        if !path.exists() {
            log::debug!("No config file found at {:?}", path);
            return None;
        }

        match Self::load(&path) {
            Ok(config) => Some(config),
            Err(e) => {
                log::warn!("Failed to load config file {:?}: {}", path, e);
                None
            }
        }
    }

    /// The explicit file if given, else the default path, else defaults.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn resolve(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        Ok(Self::load_from_default_path().unwrap_or_else(|| {
            log::warn!("No configuration file, using defaults");
            Self::default()
        }))
    }

    /// Path of the polygon data file inside the results directory.
    pub fn polygon_data_path(&self) -> PathBuf {
        self.results_dir.join(crate::constants::POLYGON_DATA_FILENAME)
    }

    /// Directory receiving rendered previews.
    pub fn preview_dir(&self) -> PathBuf {
        self.results_dir.join(crate::constants::PREVIEW_DIR)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// JSON parsing error
    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Configuration version is newer than supported
    #[error(
        "Configuration file version {file_version} is newer than supported version {supported_version}"
    )]
    VersionTooNew {
        file_version: u32,
        supported_version: u32,
    },

    /// I/O error when reading/writing config
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.version, CONFIG_VERSION);
        assert_eq!(config.app_name, "polydraw");
        assert_eq!(config.drawer.vertex_count, 4);
        assert_eq!(config.drawer.hit_threshold, 40.0);
        assert_eq!(config.drawer.seed, None);
        assert_eq!(config.style.color, [0, 255, 0]);
        assert_eq!(config.style.line_thickness, 2);
        assert_eq!(
            config.polygon_data_path(),
            PathBuf::from("results").join("polygon_drawer.yaml")
        );
    }

    #[test]
    fn test_json_roundtrip() {
        let mut config = AppConfig::default();
        config.results_dir = PathBuf::from("/tmp/out");
        config.log_level = LogLevel::Debug;
        config.drawer = config.drawer.with_seed(5);

        let json = config.to_json().unwrap();
        let parsed = AppConfig::from_json(&json).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let json = r#"{
            "version": 1,
            "source_image_dir": "/data/frames",
            "log_level": "trace",
            "drawer": { "vertex_count": 6 }
        }"#;
        let config = AppConfig::from_json(json).unwrap();
        assert_eq!(config.source_image_dir, PathBuf::from("/data/frames"));
        assert_eq!(config.results_dir, PathBuf::from("results"));
        assert_eq!(config.log_level, LogLevel::Trace);
        assert_eq!(config.drawer.vertex_count, 6);
        assert_eq!(config.drawer.hit_threshold, 40.0);
        assert_eq!(config.style, RenderStyle::default());
        assert_eq!(config.keys, KeyBindings::default());
    }

    #[test]
    fn test_version_too_new() {
        let json = format!(r#"{{ "version": {} }}"#, CONFIG_VERSION + 1);
        let err = AppConfig::from_json(&json).unwrap_err();
        assert!(matches!(err, ConfigError::VersionTooNew { .. }));
    }

    #[test]
    fn test_invalid_json() {
        let err = AppConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn test_log_level_filter() {
        assert_eq!(LogLevel::Warn.to_level_filter(), log::LevelFilter::Warn);
        assert_eq!(LogLevel::default().to_level_filter(), log::LevelFilter::Info);
    }

    #[test]
    fn test_save_and_load() {
        let dir = std::env::temp_dir().join(format!("polydraw_config_{}", std::process::id()));
        let path = dir.join("nested").join(AppConfig::default_filename());

        let mut config = AppConfig::default();
        config.app_name = "review".to_string();
        config.save(&path).unwrap();

        let loaded = AppConfig::load(&path).unwrap();
        assert_eq!(loaded.app_name, "review");
        assert!(matches!(
            AppConfig::load(&dir.join("missing.json")),
            Err(ConfigError::IoError(_))
        ));

        let _ = std::fs::remove_dir_all(&dir);
    }
}
