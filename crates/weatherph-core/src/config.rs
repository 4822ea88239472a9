use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;

use crate::error::ConfigError;

/// Environment variable overriding `api.backend_url`.
pub const BACKEND_URL_ENV: &str = "WEATHERPH_BACKEND_URL";

/// Configuration validation errors
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Result of config validation
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationResult {
    /// Returns true if there are no errors (warnings are OK)
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    pub fn add_warning(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Get a user-friendly message summarizing all errors
    pub fn error_summary(&self) -> String {
        self.errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Backend and geocoder endpoints
    #[serde(default)]
    pub api: ApiConfig,

    /// Map defaults used when geolocation is unavailable
    #[serde(default)]
    pub map: MapConfig,

    /// Forecast aggregation settings
    #[serde(default)]
    pub forecast: ForecastConfig,

    /// Sidebar behaviour
    #[serde(default)]
    pub navigation: NavigationConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the backend serving `/api/localweather` and `/api/forecast`
    pub backend_url: String,

    /// Base URL of a Nominatim-compatible geocoder
    pub geocoder_url: String,

    /// User agent sent with every request (Nominatim requires one)
    pub user_agent: String,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,

    /// Comma-separated ISO country codes searches are restricted to
    pub country_codes: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            backend_url: "http://localhost:8080".to_string(),
            geocoder_url: "https://nominatim.openstreetmap.org".to_string(),
            user_agent: concat!("WeatherPH/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout_secs: 10,
            country_codes: "ph".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapConfig {
    pub default_latitude: f64,
    pub default_longitude: f64,
    /// Label shown when the default coordinate is used
    pub default_label: String,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            default_latitude: 14.5995,
            default_longitude: 120.9842,
            default_label: "Manila, Philippines".to_string(),
        }
    }
}

/// Which calendar day a forecast interval belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DayBoundary {
    /// UTC midnight
    #[default]
    Utc,
    /// Midnight at the forecast location
    Location,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastConfig {
    /// Number of intervals in the hourly list
    #[serde(default = "default_hourly_count")]
    pub hourly_count: usize,

    /// Maximum number of days in the daily list
    #[serde(default = "default_max_days")]
    pub max_days: usize,

    #[serde(default)]
    pub day_boundary: DayBoundary,
}

fn default_hourly_count() -> usize {
    8
}

fn default_max_days() -> usize {
    7
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            hourly_count: default_hourly_count(),
            max_days: default_max_days(),
            day_boundary: DayBoundary::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavigationConfig {
    /// Viewport width (px) below which the sidebar collapses
    pub collapse_breakpoint_px: u32,
    pub start_collapsed: bool,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            collapse_breakpoint_px: 992,
            start_collapsed: false,
        }
    }
}

impl Config {
    /// Load configuration from the default path, creating it if missing.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        let mut config = Self::load_from(&path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load configuration from `path`, writing defaults there if it doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            let config = Self::default();
            config.save_to(path)?;
            return Ok(config);
        }

        let contents = std::fs::read_to_string(path).context("Failed to read config file")?;

        let config: Config = toml::from_str(&contents)
            .map_err(|e| ConfigError::ParseError(e.to_string()))
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        Ok(config)
    }

    /// Load configuration and validate it.
    ///
    /// Warnings are logged; errors fail the load.
    pub fn load_validated() -> Result<(Self, ValidationResult)> {
        let config = Self::load()?;
        let validation = config.validate();

        if !validation.is_valid() {
            return Err(ConfigError::Invalid(validation.error_summary()).into());
        }

        for warning in &validation.warnings {
            tracing::warn!("Config warning: {}", warning);
        }

        Ok((config, validation))
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var(BACKEND_URL_ENV) {
            if !url.trim().is_empty() {
                tracing::debug!("Backend URL overridden from {}", BACKEND_URL_ENV);
                self.api.backend_url = url;
            }
        }
    }

    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        validate_url(&self.api.backend_url, "api.backend_url", &mut result);
        validate_url(&self.api.geocoder_url, "api.geocoder_url", &mut result);

        if self.api.user_agent.trim().is_empty() {
            result.add_error("api.user_agent", "User agent must not be empty");
        }

        if self.api.timeout_secs == 0 {
            result.add_error("api.timeout_secs", "Timeout must be greater than 0");
        } else if self.api.timeout_secs > 120 {
            result.add_warning("api.timeout_secs", "Timeout is unusually long (>120s)");
        }

        if !(-90.0..=90.0).contains(&self.map.default_latitude) {
            result.add_error("map.default_latitude", "Latitude must be within -90..90");
        }
        if !(-180.0..=180.0).contains(&self.map.default_longitude) {
            result.add_error("map.default_longitude", "Longitude must be within -180..180");
        }

        if self.forecast.hourly_count == 0 {
            result.add_warning("forecast.hourly_count", "Hourly list disabled (0 intervals)");
        }
        if self.forecast.max_days == 0 {
            result.add_warning("forecast.max_days", "Daily list disabled (0 days)");
        } else if self.forecast.max_days > 7 {
            result.add_error("forecast.max_days", "At most 7 days can be shown");
        }

        if self.navigation.collapse_breakpoint_px == 0 {
            result.add_warning(
                "navigation.collapse_breakpoint_px",
                "Sidebar will never collapse automatically",
            );
        }

        result
    }

    /// Save configuration to `path`.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        std::fs::write(path, contents).context("Failed to write config file")?;

        Ok(())
    }

    /// Get the path to the configuration file
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to get config directory")?
            .join("weatherph");

        Ok(config_dir.join("config.toml"))
    }
}

fn validate_url(url_str: &str, field_name: &str, result: &mut ValidationResult) {
    match Url::parse(url_str) {
        Ok(url) => {
            if url.scheme() != "http" && url.scheme() != "https" {
                result.add_error(
                    field_name,
                    format!("URL must use http or https scheme, got: {}", url.scheme()),
                );
            }

            if url.host().is_none() {
                result.add_error(field_name, "URL must have a host");
            }

            if url.port() == Some(0) {
                result.add_error(field_name, "Port cannot be 0");
            }
        }
        Err(e) => {
            result.add_error(field_name, format!("Invalid URL: {}", e));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_default_config() {
        let config = Config::default();
        let result = config.validate();
        assert!(result.is_valid(), "Default config should be valid: {:?}", result.errors);
    }

    #[test]
    fn test_invalid_backend_url() {
        let mut config = Config::default();
        config.api.backend_url = "not-a-url".to_string();
        let result = config.validate();
        assert!(!result.is_valid());
        assert!(result.errors.iter().any(|e| e.field == "api.backend_url"));
    }

    #[test]
    fn test_invalid_url_scheme() {
        let mut config = Config::default();
        config.api.geocoder_url = "ftp://localhost:8080".to_string();
        let result = config.validate();
        assert!(!result.is_valid());
        assert!(result.errors.iter().any(|e| e.message.contains("http or https")));
    }

    #[test]
    fn test_out_of_range_default_coordinate() {
        let mut config = Config::default();
        config.map.default_latitude = 120.0;
        let result = config.validate();
        assert!(result.errors.iter().any(|e| e.field == "map.default_latitude"));
    }

    #[test]
    fn test_too_many_days_is_error() {
        let mut config = Config::default();
        config.forecast.max_days = 10;
        assert!(!config.validate().is_valid());
    }

    #[test]
    fn test_zero_hourly_count_is_warning() {
        let mut config = Config::default();
        config.forecast.hourly_count = 0;
        let result = config.validate();
        assert!(result.is_valid());
        assert!(result.warnings.iter().any(|w| w.field == "forecast.hourly_count"));
    }

    #[test]
    fn test_validation_result_error_summary() {
        let mut result = ValidationResult::default();
        result.add_error("field1", "error1");
        result.add_error("field2", "error2");
        let summary = result.error_summary();
        assert!(summary.contains("field1"));
        assert!(summary.contains("field2"));
    }

    #[test]
    fn test_load_creates_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = Config::load_from(&path).unwrap();
        assert!(path.exists());
        assert_eq!(config.forecast.max_days, 7);
        assert_eq!(config.map.default_label, "Manila, Philippines");
    }

    #[test]
    fn test_load_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[forecast]\nhourly_count = 4\nday_boundary = \"location\"\n",
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.forecast.hourly_count, 4);
        assert_eq!(config.forecast.max_days, 7);
        assert_eq!(config.forecast.day_boundary, DayBoundary::Location);
        assert_eq!(config.api.country_codes, "ph");
    }

    #[test]
    fn test_malformed_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[forecast\n").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ConfigError>(),
            Some(ConfigError::ParseError(_))
        ));
    }
}
