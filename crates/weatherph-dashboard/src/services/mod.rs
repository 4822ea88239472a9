pub mod weather_service;

pub use weather_service::{apply, PipelineSettings, WeatherService, WeatherServiceMessage};
