use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Geographic coordinate in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}

/// Upstream condition groups (the `weather[0].main` field)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum WeatherCondition {
    Clear,
    Clouds,
    Rain,
    Drizzle,
    Thunderstorm,
    Snow,
    /// Mist, smoke, haze, fog, dust and the rest of the 7xx group
    #[default]
    Atmosphere,
}

impl WeatherCondition {
    pub fn from_group(group: &str) -> Self {
        match group {
            "Clear" => Self::Clear,
            "Clouds" => Self::Clouds,
            "Rain" => Self::Rain,
            "Drizzle" => Self::Drizzle,
            "Thunderstorm" => Self::Thunderstorm,
            "Snow" => Self::Snow,
            _ => Self::Atmosphere,
        }
    }
}

/// Current conditions at a coordinate. Fetched fresh on every location change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentWeather {
    /// Celsius
    pub temperature: f64,
    pub feels_like: Option<f64>,
    /// Percent
    pub humidity: u8,
    /// Meters per second
    pub wind_speed: f64,
    /// Meters
    pub visibility: Option<f64>,
    /// Unix seconds
    pub sunrise: Option<i64>,
    pub sunset: Option<i64>,
    /// Offset of the location from UTC, used for sunrise/sunset display
    pub utc_offset_seconds: i32,
    pub description: String,
    pub icon_code: String,
    /// Raw condition group, e.g. "Clouds" or "Mist"
    pub condition_group: String,
    pub location_name: String,
}

impl CurrentWeather {
    pub fn condition(&self) -> WeatherCondition {
        WeatherCondition::from_group(&self.condition_group)
    }
}

/// One step of the upstream multi-interval forecast (typically 3 hours).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastInterval {
    /// Unix seconds, UTC
    pub timestamp: i64,
    pub temperature: f64,
    pub feels_like: f64,
    pub humidity: u8,
    /// hPa
    pub pressure: f64,
    /// Meters per second
    pub wind_speed: f64,
    /// Degrees
    pub wind_direction: f64,
    /// 0.0 ..= 1.0
    pub precipitation_probability: f64,
    /// Percent
    pub cloud_cover: u8,
    pub description: String,
    pub icon_code: String,
}

/// Forecast intervals in upstream order, plus the location's UTC offset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    pub intervals: Vec<ForecastInterval>,
    pub utc_offset_seconds: i32,
}

/// Per-day reduction of forecast intervals. Derived, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySummary {
    pub date: NaiveDate,
    pub min_temp: f64,
    pub max_temp: f64,
    pub avg_humidity: u8,
    pub max_wind_speed_kmh: f64,
    pub representative_icon: String,
    pub representative_description: String,
}

/// A named place returned by forward geocoding.
#[derive(Debug, Clone, PartialEq)]
pub struct Place {
    pub coordinate: Coordinate,
    pub name: String,
}

/// Weather client errors
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    /// The backend answered with an explicit `{"error": ...}` payload.
    #[error("{0}")]
    Upstream(String),
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Unexpected status: {0}")]
    Status(u16),
    #[error("Parse error: {0}")]
    Parse(String),
}

impl WeatherError {
    /// Upstream error payloads carry a message meant for display.
    pub fn display_message(&self) -> Option<&str> {
        match self {
            Self::Upstream(msg) => Some(msg),
            _ => None,
        }
    }
}
