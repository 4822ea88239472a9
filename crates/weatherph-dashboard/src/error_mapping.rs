//! Maps weather pipeline errors to weatherph_core::AppError for consistent
//! user-facing messages and log fields.

use weatherph_core::{AppError, NetworkError, ReqwestErrorExt, WeatherError as CoreWeatherError};
use weatherph_weather::WeatherError;

pub fn app_error(err: WeatherError) -> AppError {
    match err {
        WeatherError::Upstream(msg) => AppError::Weather(CoreWeatherError::ApiError(msg)),
        WeatherError::Network(e) => AppError::Network(e.into_network_error()),
        WeatherError::Status(status) => AppError::Network(NetworkError::ServerError {
            status,
            message: format!("HTTP {}", status),
        }),
        WeatherError::Parse(msg) => AppError::Network(NetworkError::InvalidResponse(msg)),
    }
}
