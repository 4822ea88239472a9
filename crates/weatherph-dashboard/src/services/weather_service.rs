//! Weather backend: location change → concurrent fetches → zone renders.
//!
//! The current and forecast fetches run as separate tasks and report back on
//! one channel. Each result is applied to its own zones as soon as it
//! arrives; there is no barrier between them and no cancellation of
//! in-flight requests from an earlier location.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::mpsc;

use weatherph_core::{Config, DayBoundary as DayBoundaryPolicy, ForecastConfig};
use weatherph_weather::advisory::ROUTE_NOT_FOUND;
use weatherph_weather::render::{self, Zone};
use weatherph_weather::{
    advise, group_by_day_with, next_n, Coordinate, CurrentWeather, DayBoundary, Forecast,
    GeoResolver, RouteAdvisory, RouteEnd, WeatherClient, WeatherError,
};

use crate::error_mapping::app_error;
use crate::map::{LocationChange, LocationSource};
use crate::page::Page;

pub const GEOLOCATION_DENIED: &str =
    "Location access denied. Enable it to see local weather here.";

/// Label for a clicked point the geocoder has no name for.
pub const UNKNOWN_LOCATION: &str = "Unknown Location";

/// Forecast display settings for one dashboard.
#[derive(Debug, Clone)]
pub struct PipelineSettings {
    pub hourly_count: usize,
    pub max_days: usize,
    pub day_boundary: DayBoundaryPolicy,
}

impl From<&ForecastConfig> for PipelineSettings {
    fn from(config: &ForecastConfig) -> Self {
        Self {
            hourly_count: config.hourly_count,
            max_days: config.max_days,
            day_boundary: config.day_boundary,
        }
    }
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self::from(&ForecastConfig::default())
    }
}

impl PipelineSettings {
    fn boundary_for(&self, forecast: &Forecast) -> DayBoundary {
        match self.day_boundary {
            DayBoundaryPolicy::Utc => DayBoundary::Utc,
            DayBoundaryPolicy::Location => DayBoundary::Location(forecast.utc_offset_seconds),
        }
    }
}

/// Messages sent from fetch tasks back to the page owner
#[derive(Debug)]
pub enum WeatherServiceMessage {
    LabelResolved(String),
    CurrentDone(Result<CurrentWeather, WeatherError>),
    ForecastDone(Result<Forecast, WeatherError>),
}

#[derive(Debug, Clone)]
pub struct WeatherService {
    client: Arc<WeatherClient>,
    geocoder: Arc<GeoResolver>,
    settings: PipelineSettings,
}

impl WeatherService {
    pub fn new(client: WeatherClient, geocoder: GeoResolver, settings: PipelineSettings) -> Self {
        Self {
            client: Arc::new(client),
            geocoder: Arc::new(geocoder),
            settings,
        }
    }

    /// Build clients from configuration.
    pub fn from_config(config: &Config) -> Result<Self, WeatherError> {
        let timeout = Duration::from_secs(config.api.timeout_secs);
        let client = WeatherClient::new(&config.api.backend_url, &config.api.user_agent, timeout)?;
        let geocoder = GeoResolver::new(
            &config.api.geocoder_url,
            &config.api.user_agent,
            timeout,
            &config.api.country_codes,
        )?;
        Ok(Self::new(client, geocoder, PipelineSettings::from(&config.forecast)))
    }

    pub fn geocoder(&self) -> &GeoResolver {
        &self.geocoder
    }

    pub fn settings(&self) -> &PipelineSettings {
        &self.settings
    }

    /// Start all work for a location change. Results arrive on `tx`.
    /// Must be called from within a tokio runtime.
    pub fn request_update(
        &self,
        change: &LocationChange,
        tx: &mpsc::UnboundedSender<WeatherServiceMessage>,
    ) {
        let coordinate = change.coordinate;

        match &change.label {
            Some(label) => {
                let _ = tx.send(WeatherServiceMessage::LabelResolved(label.clone()));
            }
            None => {
                let tx = tx.clone();
                let geocoder = Arc::clone(&self.geocoder);
                let source = change.source;
                tokio::spawn(async move {
                    let label = match source {
                        LocationSource::MapClick => geocoder
                            .place_name(coordinate)
                            .await
                            .unwrap_or_else(|| UNKNOWN_LOCATION.to_string()),
                        _ => geocoder.resolve_address(coordinate).await,
                    };
                    let _ = tx.send(WeatherServiceMessage::LabelResolved(label));
                });
            }
        }

        let current_tx = tx.clone();
        let client = Arc::clone(&self.client);
        tokio::spawn(async move {
            let result = client.fetch_current(coordinate).await;
            let _ = current_tx.send(WeatherServiceMessage::CurrentDone(result));
        });

        let forecast_tx = tx.clone();
        let client = Arc::clone(&self.client);
        tokio::spawn(async move {
            let result = client.fetch_forecast(coordinate).await;
            let _ = forecast_tx.send(WeatherServiceMessage::ForecastDone(result));
        });
    }

    /// Run the whole pipeline for one change, applying each result to
    /// `page` the moment it arrives.
    pub async fn update(&self, change: &LocationChange, page: &Mutex<Page>) {
        tracing::info!(
            "Updating weather for {} ({:?})",
            change.coordinate,
            change.source
        );

        page.lock().reset_location();
        let (tx, mut rx) = mpsc::unbounded_channel();
        self.request_update(change, &tx);
        drop(tx);

        while let Some(message) = rx.recv().await {
            apply(&mut page.lock(), message, &self.settings);
        }
    }

    /// Compact widget for a coordinate: address lookup, then current weather.
    pub async fn local_widget(&self, coordinate: Coordinate) -> String {
        let address = self.geocoder.resolve_address(coordinate).await;
        match self.client.fetch_current(coordinate).await {
            Ok(current) => render::local_widget(&current, &address),
            Err(e) => {
                let text = e
                    .display_message()
                    .map(str::to_string)
                    .unwrap_or_else(|| render::WIDGET_LOAD_FAILED.to_string());
                log_failure("local weather", e);
                render::message(&text)
            }
        }
    }

    /// Geocode both ends of a route, then fetch conditions at each.
    /// `None` when either end cannot be located; a failed weather fetch
    /// only blanks that end's conditions.
    pub async fn route_advisory(&self, origin: &str, destination: &str) -> Option<RouteAdvisory> {
        let (from, to) = tokio::join!(
            self.geocoder.locate(origin),
            self.geocoder.locate(destination)
        );
        let (Some(from), Some(to)) = (from, to) else {
            tracing::warn!(
                "Could not locate route {:?} -> {:?}",
                origin,
                destination
            );
            return None;
        };

        let (from_current, to_current) = tokio::join!(
            self.route_conditions(from.coordinate),
            self.route_conditions(to.coordinate)
        );
        Some(RouteAdvisory {
            origin: RouteEnd {
                query: origin.trim().to_string(),
                place: from,
                current: from_current,
            },
            destination: RouteEnd {
                query: destination.trim().to_string(),
                place: to,
                current: to_current,
            },
        })
    }

    /// Fill the route advisory zone for an origin and destination.
    pub async fn update_route(&self, origin: &str, destination: &str, page: &Mutex<Page>) {
        let html = match self.route_advisory(origin, destination).await {
            Some(route) => render::route_advisory(&route),
            None => render::message(ROUTE_NOT_FOUND),
        };
        page.lock().set(Zone::RouteAdvisory, html);
    }

    async fn route_conditions(&self, coordinate: Coordinate) -> Option<CurrentWeather> {
        match self.client.fetch_current(coordinate).await {
            Ok(current) => Some(current),
            Err(e) => {
                log_failure("route weather", e);
                None
            }
        }
    }
}

/// Apply one pipeline result to the page. Touches only the zones the
/// result owns.
pub fn apply(page: &mut Page, message: WeatherServiceMessage, settings: &PipelineSettings) {
    match message {
        WeatherServiceMessage::LabelResolved(label) => page.set_location_name(&label),
        WeatherServiceMessage::CurrentDone(Ok(current)) => {
            page.set_station_name(&current.location_name);
            page.set(Zone::CurrentWeather, render::current_card(&current));
            page.set(Zone::Advisory, render::advisory(&advise(&current)));
        }
        WeatherServiceMessage::CurrentDone(Err(e)) => {
            let html = match e.display_message() {
                Some(msg) => render::message(msg),
                None => render::message(render::CURRENT_LOAD_FAILED),
            };
            log_failure("current weather", e);
            page.set(Zone::CurrentWeather, html);
        }
        WeatherServiceMessage::ForecastDone(Ok(forecast)) => {
            let hourly = next_n(&forecast.intervals, settings.hourly_count);
            let days = group_by_day_with(
                &forecast.intervals,
                settings.boundary_for(&forecast),
                settings.max_days,
            );
            page.set(
                Zone::HourlyForecast,
                render::hourly_list(hourly, forecast.utc_offset_seconds),
            );
            page.set(Zone::DailyForecast, render::daily_list(&days));
        }
        WeatherServiceMessage::ForecastDone(Err(e)) => {
            let html = match e.display_message() {
                Some(msg) => render::message(msg),
                None => render::message(render::FORECAST_LOAD_FAILED),
            };
            log_failure("forecast", e);
            page.set(Zone::HourlyForecast, html.clone());
            page.set(Zone::DailyForecast, html);
        }
    }
}

fn log_failure(what: &str, err: WeatherError) {
    let detail = err.to_string();
    let app_err = app_error(err);
    tracing::warn!(
        user_message = app_err.user_message(),
        "Failed to load {}: {}",
        what,
        detail
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn current(name: &str) -> CurrentWeather {
        CurrentWeather {
            temperature: 30.0,
            feels_like: Some(34.0),
            humidity: 60,
            wind_speed: 2.0,
            visibility: Some(10_000.0),
            sunrise: None,
            sunset: None,
            utc_offset_seconds: 28_800,
            description: "few clouds".to_string(),
            icon_code: "02d".to_string(),
            condition_group: "Clouds".to_string(),
            location_name: name.to_string(),
        }
    }

    #[test]
    fn test_forecast_error_payload_fills_both_lists() {
        let mut page = Page::new();
        page.set(Zone::CurrentWeather, "<p>card</p>".to_string());

        apply(
            &mut page,
            WeatherServiceMessage::ForecastDone(Err(WeatherError::Upstream(
                "Forecast unavailable.".into(),
            ))),
            &PipelineSettings::default(),
        );

        assert_eq!(page.get(Zone::HourlyForecast), Some("<p>Forecast unavailable.</p>"));
        assert_eq!(page.get(Zone::DailyForecast), Some("<p>Forecast unavailable.</p>"));
        assert_eq!(page.get(Zone::CurrentWeather), Some("<p>card</p>"));
    }

    #[test]
    fn test_current_failure_is_generic_and_isolated() {
        let mut page = Page::new();
        page.set(Zone::DailyForecast, "<p>days</p>".to_string());

        apply(
            &mut page,
            WeatherServiceMessage::CurrentDone(Err(WeatherError::Status(500))),
            &PipelineSettings::default(),
        );

        assert_eq!(
            page.get(Zone::CurrentWeather),
            Some("<p>Could not load weather data.</p>")
        );
        assert_eq!(page.get(Zone::DailyForecast), Some("<p>days</p>"));
    }

    #[test]
    fn test_empty_forecast_is_not_available() {
        let mut page = Page::new();
        apply(
            &mut page,
            WeatherServiceMessage::ForecastDone(Ok(Forecast::default())),
            &PipelineSettings::default(),
        );
        assert_eq!(
            page.get(Zone::HourlyForecast),
            Some("<p>Hourly forecast not available.</p>")
        );
        assert_eq!(
            page.get(Zone::DailyForecast),
            Some("<p>Daily forecast not available.</p>")
        );
    }

    #[test]
    fn test_station_name_only_replaces_unqualified_label() {
        let settings = PipelineSettings::default();

        let mut page = Page::new();
        page.set_location_name("14.6,121");
        apply(&mut page, WeatherServiceMessage::CurrentDone(Ok(current("Quezon City"))), &settings);
        assert_eq!(page.get(Zone::LocationName), Some("14.6,121"));

        let mut page = Page::new();
        page.set_location_name("Marikina");
        apply(&mut page, WeatherServiceMessage::CurrentDone(Ok(current("Marikina City"))), &settings);
        assert_eq!(page.get(Zone::LocationName), Some("Marikina City"));
    }

    #[test]
    fn test_station_name_arriving_first_is_kept() {
        let settings = PipelineSettings::default();
        let mut page = Page::new();
        apply(&mut page, WeatherServiceMessage::CurrentDone(Ok(current("Quezon City"))), &settings);
        apply(
            &mut page,
            WeatherServiceMessage::LabelResolved(UNKNOWN_LOCATION.to_string()),
            &settings,
        );
        assert_eq!(page.get(Zone::LocationName), Some("Quezon City"));
    }

    #[test]
    fn test_current_renders_card_and_advisory() {
        let mut page = Page::new();
        apply(
            &mut page,
            WeatherServiceMessage::CurrentDone(Ok(current("Manila"))),
            &PipelineSettings::default(),
        );
        assert!(page.get(Zone::CurrentWeather).unwrap().contains("30.0°C"));
        assert!(page.get(Zone::Advisory).unwrap().contains("Mostly Sunny"));
        assert_eq!(page.get(Zone::LocationName), Some("Manila"));
    }

    #[test]
    fn test_label_message_sets_name() {
        let mut page = Page::new();
        apply(
            &mut page,
            WeatherServiceMessage::LabelResolved("Manila, Philippines".into()),
            &PipelineSettings::default(),
        );
        assert_eq!(page.get(Zone::LocationName), Some("Manila, Philippines"));
    }

    #[test]
    fn test_location_boundary_uses_forecast_offset() {
        let settings = PipelineSettings {
            day_boundary: DayBoundaryPolicy::Location,
            ..Default::default()
        };
        let forecast = Forecast {
            intervals: Vec::new(),
            utc_offset_seconds: 28_800,
        };
        assert_eq!(settings.boundary_for(&forecast), DayBoundary::Location(28_800));
        assert_eq!(
            PipelineSettings::default().boundary_for(&forecast),
            DayBoundary::Utc
        );
    }

    #[tokio::test]
    async fn test_given_label_is_sent_first() {
        let config = Config::default();
        let service = WeatherService::from_config(&config).unwrap();
        let (tx, mut rx) = mpsc::unbounded_channel();

        service.request_update(
            &LocationChange {
                coordinate: Coordinate::new(14.5995, 120.9842),
                label: Some("Manila, Philippines".to_string()),
                source: LocationSource::DefaultFallback,
            },
            &tx,
        );

        match rx.recv().await {
            Some(WeatherServiceMessage::LabelResolved(label)) => {
                assert_eq!(label, "Manila, Philippines")
            }
            other => panic!("expected label first, got {:?}", other),
        }
    }
}
