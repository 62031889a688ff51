use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use crate::model::Coordinates;

pub const DEFAULT_USER_AGENT: &str = "WeatherApp/1.0";
pub const DEFAULT_GEOCODER_URL: &str = "https://nominatim.openstreetmap.org";
pub const DEFAULT_FORECAST_URL: &str = "https://api.weather.gov";

/// Location shown when no ZIP has been entered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefaultLocation {
    pub latitude: f64,
    pub longitude: f64,
    /// Banner text used when reverse geocoding yields nothing.
    pub label: String,
}

impl Default for DefaultLocation {
    fn default() -> Self {
        // Seguin, Texas, pre-rounded for the NWS grid.
        Self {
            latitude: 29.50,
            longitude: -98.13,
            label: "Seguin, Texas".to_string(),
        }
    }
}

impl DefaultLocation {
    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.latitude, self.longitude)
    }
}

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// user_agent = "WeatherApp/1.0 (me@example.com)"
///
/// [default_location]
/// latitude = 29.5
/// longitude = -98.13
/// label = "Seguin, Texas"
///
/// [settings]
/// weatherAppTheme = "dark"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Sent as `User-Agent`; Nominatim and the NWS both require one.
    pub user_agent: Option<String>,

    /// Base URL of the Nominatim-compatible geocoder.
    pub geocoder_url: Option<String>,

    /// Base URL of the NWS API.
    pub forecast_url: Option<String>,

    pub default_location: Option<DefaultLocation>,

    /// Small persisted key/value preferences (the theme flag lives here).
    #[serde(default)]
    pub settings: BTreeMap<String, String>,
}

impl Config {
    pub fn user_agent(&self) -> &str {
        self.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT)
    }

    pub fn geocoder_url(&self) -> &str {
        self.geocoder_url.as_deref().unwrap_or(DEFAULT_GEOCODER_URL)
    }

    pub fn forecast_url(&self) -> &str {
        self.forecast_url.as_deref().unwrap_or(DEFAULT_FORECAST_URL)
    }

    pub fn default_location(&self) -> DefaultLocation {
        self.default_location.clone().unwrap_or_default()
    }

    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "zipweather", "weather")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_public_services() {
        let cfg = Config::default();
        assert_eq!(cfg.user_agent(), DEFAULT_USER_AGENT);
        assert_eq!(cfg.geocoder_url(), DEFAULT_GEOCODER_URL);
        assert_eq!(cfg.forecast_url(), DEFAULT_FORECAST_URL);

        let loc = cfg.default_location();
        assert_eq!(loc.label, "Seguin, Texas");
        assert_eq!(loc.coordinates(), Coordinates::new(29.5, -98.13));
    }

    #[test]
    fn missing_file_loads_empty_config() {
        let dir = tempfile::tempdir().expect("tempdir");
        let cfg = Config::load_from(&dir.path().join("nope.toml")).expect("load should succeed");
        assert!(cfg.user_agent.is_none());
        assert!(cfg.settings.is_empty());
    }

    #[test]
    fn save_then_load_preserves_fields() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("config.toml");

        let mut cfg = Config {
            user_agent: Some("test-agent/0.1".to_string()),
            default_location: Some(DefaultLocation {
                latitude: 40.71,
                longitude: -74.01,
                label: "New York, New York".to_string(),
            }),
            ..Config::default()
        };
        cfg.settings.insert("weatherAppTheme".to_string(), "light".to_string());
        cfg.save_to(&path).expect("save should succeed");

        let loaded = Config::load_from(&path).expect("load should succeed");
        assert_eq!(loaded.user_agent(), "test-agent/0.1");
        assert_eq!(loaded.default_location().label, "New York, New York");
        assert_eq!(loaded.settings.get("weatherAppTheme").map(String::as_str), Some("light"));
    }

    #[test]
    fn malformed_file_reports_path() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        fs::write(&path, "user_agent = [").expect("write");

        let err = Config::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }
}
