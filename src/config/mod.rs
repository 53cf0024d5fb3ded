//! Configuration management
//!
//! Loads and saves configuration from XDG-compliant paths.
//! Config location: ~/.config/latlong-helper/config.toml

pub mod defaults;

use crate::coord::binning::GridSize;
use crate::error::{Error, Result};
use defaults::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Default grid for binning
    #[serde(default)]
    pub binning: BinningConfig,

    /// Heatmap defaults
    #[serde(default)]
    pub plot: PlotConfig,

    /// Server settings
    #[serde(default)]
    pub server: ServerConfig,
}

/// Default grid for binning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BinningConfig {
    /// Cell height in degrees of latitude
    #[serde(default = "default_grid_size")]
    pub grid_lat: f64,

    /// Cell width in degrees of longitude
    #[serde(default = "default_grid_size")]
    pub grid_lng: f64,
}

/// Heatmap defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlotConfig {
    /// Figure width in inches
    #[serde(default = "default_width")]
    pub width: f64,

    /// Figure height in inches
    #[serde(default = "default_height")]
    pub height: f64,

    /// Output format
    #[serde(default = "default_format")]
    pub format: String,
}

/// Server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

// Default value functions for serde
fn default_grid_size() -> f64 {
    DEFAULT_GRID_SIZE
}
fn default_width() -> f64 {
    DEFAULT_WIDTH
}
fn default_height() -> f64 {
    DEFAULT_HEIGHT
}
fn default_format() -> String {
    DEFAULT_FORMAT.to_string()
}
fn default_host() -> String {
    DEFAULT_HOST.to_string()
}
fn default_port() -> u16 {
    DEFAULT_PORT
}

impl Default for BinningConfig {
    fn default() -> Self {
        Self {
            grid_lat: default_grid_size(),
            grid_lng: default_grid_size(),
        }
    }
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            format: default_format(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn parse_positive(key: &str, value: &str) -> Result<f64> {
    match value.parse::<f64>() {
        Ok(v) if v > 0.0 && v.is_finite() => Ok(v),
        _ => Err(Error::Config(format!("Invalid {} value: {}", key, value))),
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|p| p.join(APP_DIR_NAME))
            .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE_NAME))
    }

    /// Load configuration from the default path
    ///
    /// Creates default config if file doesn't exist
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from `path`, creating it with defaults if missing
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = fs::read_to_string(path)
                .map_err(|e| Error::Config(format!("Failed to read config file: {}", e)))?;

            toml::from_str(&content)
                .map_err(|e| Error::Config(format!("Failed to parse config file: {}", e)))
        } else {
            // Create default config
            tracing::debug!(path = %path.display(), "config file missing, writing defaults");
            let config = Config::default();
            config.save_to(path)?;
            Ok(config)
        }
    }

    /// Save configuration to the default path
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to `path`
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| Error::Config(format!("Failed to create config directory: {}", e)))?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;

        fs::write(path, content)
            .map_err(|e| Error::Config(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    /// Get a configuration value by key path
    ///
    /// Key format: "section.key"
    pub fn get(&self, key: &str) -> Option<String> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["binning", "grid_lat"] => Some(self.binning.grid_lat.to_string()),
            ["binning", "grid_lng"] => Some(self.binning.grid_lng.to_string()),

            ["plot", "width"] => Some(self.plot.width.to_string()),
            ["plot", "height"] => Some(self.plot.height.to_string()),
            ["plot", "format"] => Some(self.plot.format.clone()),

            ["server", "host"] => Some(self.server.host.clone()),
            ["server", "port"] => Some(self.server.port.to_string()),

            _ => None,
        }
    }

    /// Set a configuration value by key path
    ///
    /// Returns error if key is invalid or value type is wrong
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["binning", "grid_lat"] => self.binning.grid_lat = parse_positive(key, value)?,
            ["binning", "grid_lng"] => self.binning.grid_lng = parse_positive(key, value)?,

            ["plot", "width"] => self.plot.width = parse_positive(key, value)?,
            ["plot", "height"] => self.plot.height = parse_positive(key, value)?,
            ["plot", "format"] => {
                if crate::heatmap::get_renderer(value).is_none() {
                    return Err(Error::UnknownFormat(value.to_string()));
                }
                self.plot.format = value.to_lowercase();
            }

            ["server", "host"] => self.server.host = value.to_string(),
            ["server", "port"] => {
                self.server.port = value
                    .parse()
                    .map_err(|_| Error::Config(format!("Invalid port value: {}", value)))?;
            }

            _ => {
                return Err(Error::Config(format!("Unknown config key: {}", key)));
            }
        }

        Ok(())
    }

    /// List all available config keys
    pub fn available_keys() -> Vec<&'static str> {
        vec![
            "binning.grid_lat",
            "binning.grid_lng",
            "plot.width",
            "plot.height",
            "plot.format",
            "server.host",
            "server.port",
        ]
    }

    /// Configured default grid
    pub fn grid(&self) -> GridSize {
        GridSize::new(self.binning.grid_lat, self.binning.grid_lng)
    }

    /// Get server address as "host:port"
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.binning.grid_lat, 0.01);
        assert_eq!(config.binning.grid_lng, 0.01);
        assert_eq!(config.plot.width, 10.0);
        assert_eq!(config.plot.height, 6.0);
        assert_eq!(config.plot.format, "svg");
        assert_eq!(config.server.port, 7879);
        assert_eq!(config.grid(), GridSize::default());
    }

    #[test]
    fn test_get_set() {
        let mut config = Config::default();

        assert_eq!(config.get("binning.grid_lat"), Some("0.01".to_string()));

        config.set("binning.grid_lat", "0.5").unwrap();
        assert_eq!(config.get("binning.grid_lat"), Some("0.5".to_string()));
        assert_eq!(config.grid(), GridSize::new(0.5, 0.01));

        config.set("plot.format", "TEXT").unwrap();
        assert_eq!(config.get("plot.format"), Some("text".to_string()));

        config.set("server.port", "8080").unwrap();
        assert_eq!(config.server_addr(), "127.0.0.1:8080");
    }

    #[test]
    fn test_get_invalid_key() {
        let config = Config::default();
        assert_eq!(config.get("invalid.key"), None);
    }

    #[test]
    fn test_set_invalid() {
        let mut config = Config::default();
        assert!(config.set("invalid.key", "value").is_err());
        assert!(config.set("binning.grid_lat", "not_a_number").is_err());
        assert!(config.set("binning.grid_lng", "0").is_err());
        assert!(config.set("plot.width", "-3").is_err());
        assert!(config.set("plot.format", "png").is_err());
        assert!(config.set("server.port", "99999").is_err());
        assert_eq!(config.binning.grid_lng, 0.01);
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join(CONFIG_FILE_NAME);

        let mut config = Config::default();
        config.binning.grid_lat = 0.25;
        config.plot.format = "json".to_string();
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.binning.grid_lat, 0.25);
        assert_eq!(loaded.plot.format, "json");
    }

    #[test]
    fn test_load_creates_default() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(CONFIG_FILE_NAME);

        let config = Config::load_from(&path).unwrap();
        assert!(path.exists());
        assert_eq!(config.plot.width, 10.0);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let loaded: Config = toml::from_str("[binning]\ngrid_lat = 1.0\n").unwrap();
        assert_eq!(loaded.binning.grid_lat, 1.0);
        assert_eq!(loaded.binning.grid_lng, 0.01);
        assert_eq!(loaded.server.host, "127.0.0.1");
    }

    #[test]
    fn test_serialization_format() {
        let config = Config::default();
        let toml = toml::to_string_pretty(&config).unwrap();

        assert!(toml.contains("[binning]"));
        assert!(toml.contains("[plot]"));
        assert!(toml.contains("[server]"));
    }

    #[test]
    fn test_available_keys() {
        let keys = Config::available_keys();
        let config = Config::default();
        for key in keys {
            assert!(config.get(key).is_some(), "{}", key);
        }
    }
}
