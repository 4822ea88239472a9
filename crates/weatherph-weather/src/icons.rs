//! Icon and background lookups keyed by upstream condition codes.

use crate::types::WeatherCondition;

const ICON_URL_BASE: &str = "https://openweathermap.org/img/wn";

/// Emoji for the compact widget. Unknown codes get a thermometer.
pub fn emoji(icon_code: &str) -> &'static str {
    match icon_code {
        "01d" => "☀️",
        "01n" => "🌙",
        "02d" | "02n" => "🌤️",
        "03d" | "03n" => "⛅",
        "04d" | "04n" => "☁️",
        "09d" | "09n" => "🌧️",
        "10d" | "10n" => "🌦️",
        "11d" | "11n" => "⚡",
        "13d" | "13n" => "❄️",
        "50d" | "50n" => "🌫️",
        _ => "🌡️",
    }
}

/// Image URL for an icon code at the given density (2 for lists, 4 for the card).
pub fn icon_url(icon_code: &str, scale: u8) -> String {
    format!("{}/{}@{}x.png", ICON_URL_BASE, icon_code, scale)
}

/// Background photo for the current-weather card.
pub fn background_url(condition: WeatherCondition) -> &'static str {
    match condition {
        WeatherCondition::Clear => {
            "https://images.unsplash.com/photo-1590071353885-d75bae2135ab?q=80&w=1887&auto=format&fit=crop"
        }
        WeatherCondition::Clouds => {
            "https://images.unsplash.com/photo-1501630834273-4b5604d2ee31?q=80&w=2070&auto=format&fit=crop"
        }
        WeatherCondition::Rain | WeatherCondition::Drizzle => {
            "https://images.unsplash.com/photo-1534274988757-a28bf1a57c17?q=80&w=1935&auto=format&fit=crop"
        }
        WeatherCondition::Thunderstorm => {
            "https://images.unsplash.com/photo-1605727226343-9364a6f44558?q=80&w=1887&auto=format&fit=crop"
        }
        WeatherCondition::Snow => {
            "https://images.unsplash.com/photo-1483664852095-d692180e2e5b?q=80&w=2070&auto=format&fit=crop"
        }
        WeatherCondition::Atmosphere => {
            "https://images.unsplash.com/photo-1543236338-0276d1637519?q=80&w=1933&auto=format&fit=crop"
        }
    }
}
