//! Backend weather API client.
//!
//! The backend proxies OpenWeatherMap and answers either with the upstream
//! payload or with `{"error": "..."}`.

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tracing::instrument;

use crate::types::{Coordinate, CurrentWeather, Forecast, ForecastInterval, WeatherError};

const CURRENT_PATH: &str = "/api/localweather";
const FORECAST_PATH: &str = "/api/forecast";

#[derive(Debug, Deserialize)]
struct ErrorPayload {
    error: String,
}

#[derive(Debug, Default, Deserialize)]
struct ApiCondition {
    #[serde(default)]
    main: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    icon: String,
}

#[derive(Debug, Deserialize)]
struct ApiMain {
    temp: f64,
    feels_like: Option<f64>,
    #[serde(default)]
    humidity: u8,
    #[serde(default)]
    pressure: f64,
}

#[derive(Debug, Default, Deserialize)]
struct ApiWind {
    #[serde(default)]
    speed: f64,
    #[serde(default)]
    deg: f64,
}

#[derive(Debug, Default, Deserialize)]
struct ApiSys {
    sunrise: Option<i64>,
    sunset: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
struct ApiClouds {
    #[serde(default)]
    all: u8,
}

#[derive(Debug, Deserialize)]
struct CurrentResponse {
    #[serde(default)]
    name: String,
    #[serde(default)]
    timezone: i32,
    visibility: Option<f64>,
    main: ApiMain,
    #[serde(default)]
    wind: ApiWind,
    #[serde(default)]
    sys: ApiSys,
    #[serde(default)]
    weather: Option<Vec<ApiCondition>>,
}

#[derive(Debug, Deserialize)]
struct ApiInterval {
    dt: i64,
    main: ApiMain,
    #[serde(default)]
    wind: ApiWind,
    #[serde(default)]
    pop: f64,
    #[serde(default)]
    clouds: ApiClouds,
    #[serde(default)]
    weather: Option<Vec<ApiCondition>>,
}

#[derive(Debug, Default, Deserialize)]
struct ApiCity {
    #[serde(default)]
    timezone: i32,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    // Null and missing both mean "no intervals".
    #[serde(default)]
    list: Option<Vec<ApiInterval>>,
    #[serde(default)]
    city: Option<ApiCity>,
}

/// First listed condition, or an empty one.
fn primary_condition(weather: Option<Vec<ApiCondition>>) -> ApiCondition {
    weather
        .and_then(|conditions| conditions.into_iter().next())
        .unwrap_or_default()
}

impl From<CurrentResponse> for CurrentWeather {
    fn from(r: CurrentResponse) -> Self {
        let condition = primary_condition(r.weather);
        Self {
            temperature: r.main.temp,
            feels_like: r.main.feels_like,
            humidity: r.main.humidity,
            wind_speed: r.wind.speed,
            visibility: r.visibility,
            sunrise: r.sys.sunrise,
            sunset: r.sys.sunset,
            utc_offset_seconds: r.timezone,
            description: condition.description,
            icon_code: condition.icon,
            condition_group: condition.main,
            location_name: r.name,
        }
    }
}

impl From<ApiInterval> for ForecastInterval {
    fn from(i: ApiInterval) -> Self {
        let condition = primary_condition(i.weather);
        Self {
            timestamp: i.dt,
            temperature: i.main.temp,
            feels_like: i.main.feels_like.unwrap_or(i.main.temp),
            humidity: i.main.humidity,
            pressure: i.main.pressure,
            wind_speed: i.wind.speed,
            wind_direction: i.wind.deg,
            precipitation_probability: i.pop,
            cloud_cover: i.clouds.all,
            description: condition.description,
            icon_code: condition.icon,
        }
    }
}

/// Client for the dashboard backend's weather endpoints.
#[derive(Debug, Clone)]
pub struct WeatherClient {
    client: Client,
    base_url: String,
}

impl WeatherClient {
    pub fn new(base_url: &str, user_agent: &str, timeout: Duration) -> Result<Self, WeatherError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Current conditions at `coordinate`.
    #[instrument(skip(self), level = "info")]
    pub async fn fetch_current(&self, coordinate: Coordinate) -> Result<CurrentWeather, WeatherError> {
        let response: CurrentResponse = self.get(CURRENT_PATH, coordinate).await?;
        Ok(response.into())
    }

    /// Multi-interval forecast at `coordinate`, in upstream order.
    #[instrument(skip(self), level = "info")]
    pub async fn fetch_forecast(&self, coordinate: Coordinate) -> Result<Forecast, WeatherError> {
        let response: ForecastResponse = self.get(FORECAST_PATH, coordinate).await?;
        let list = response.list.unwrap_or_default();
        tracing::debug!("Forecast returned {} intervals", list.len());
        Ok(Forecast {
            intervals: list.into_iter().map(ForecastInterval::from).collect(),
            utc_offset_seconds: response.city.map_or(0, |city| city.timezone),
        })
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        coordinate: Coordinate,
    ) -> Result<T, WeatherError> {
        let url = format!("{}{}", self.base_url, path);

        let response = self
            .client
            .get(&url)
            .query(&[("lat", coordinate.latitude), ("lon", coordinate.longitude)])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        // An error payload wins regardless of status.
        if let Ok(payload) = serde_json::from_str::<ErrorPayload>(&body) {
            return Err(WeatherError::Upstream(payload.error));
        }

        if !status.is_success() {
            return Err(WeatherError::Status(status.as_u16()));
        }

        serde_json::from_str(&body).map_err(|e| WeatherError::Parse(e.to_string()))
    }
}
