//! Travel advisories derived from current conditions, for a single
//! location or for both ends of a route.

use crate::types::{CurrentWeather, Place};

/// Weather line for a route end whose conditions are unknown.
pub const WEATHER_UNAVAILABLE: &str = "Weather data is currently unavailable.";

/// Temperature line when no threshold applies.
pub const TEMPERATURE_COMFORTABLE: &str =
    "✅ Temperatures are comfortable for travel. No specific advisories.";

/// Shown instead of a route advisory when either end cannot be geocoded.
pub const ROUTE_NOT_FOUND: &str =
    "Could not locate one or both places. Please try a more specific location name.";

/// Weather hazard line and temperature line; either may be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Advisory {
    pub weather: Option<&'static str>,
    pub temperature: Option<&'static str>,
}

impl Advisory {
    pub fn is_empty(&self) -> bool {
        self.weather.is_none() && self.temperature.is_none()
    }
}

/// How prominently an advisory line should be shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warning,
    Danger,
}

impl Severity {
    /// CSS class for the alert box.
    pub fn class(self) -> &'static str {
        match self {
            Self::Info => "alert alert-info",
            Self::Warning => "alert alert-warning",
            Self::Danger => "alert alert-danger",
        }
    }

    pub fn of_weather(line: &str) -> Self {
        if line.contains("Warning") || line.contains("Storm") {
            Self::Danger
        } else if line.contains("Advisory") {
            Self::Warning
        } else {
            Self::Info
        }
    }

    pub fn of_temperature(line: &str) -> Self {
        if line.contains("Danger") {
            Self::Danger
        } else if line.contains("Caution") || line.contains("Cool") {
            Self::Warning
        } else {
            Self::Info
        }
    }
}

/// One end of a route: what was asked for, where it resolved, and the
/// conditions there if the fetch succeeded.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteEnd {
    pub query: String,
    pub place: Place,
    pub current: Option<CurrentWeather>,
}

impl RouteEnd {
    /// Route advisories always carry a weather line.
    pub fn advisory(&self) -> Advisory {
        match &self.current {
            Some(current) => {
                let advisory = advise(current);
                Advisory {
                    weather: advisory.weather.or(Some(WEATHER_UNAVAILABLE)),
                    ..advisory
                }
            }
            None => Advisory {
                weather: Some(WEATHER_UNAVAILABLE),
                temperature: None,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RouteAdvisory {
    pub origin: RouteEnd,
    pub destination: RouteEnd,
}

pub fn advise(current: &CurrentWeather) -> Advisory {
    Advisory {
        weather: weather_advice(&current.condition_group, &current.description),
        temperature: temperature_advice(current.temperature),
    }
}

/// Description matches take priority over the broader condition group.
pub fn weather_advice(condition_group: &str, description: &str) -> Option<&'static str> {
    let group = condition_group.to_lowercase();
    let desc = description.to_lowercase();

    let advice = match desc.as_str() {
        "overcast clouds" => "☁️ Overcast Skies: Visibility may be reduced. Ensure your vehicle's headlights are on for safety.",
        "broken clouds" => "🌥️ Partly Cloudy: Expect intermittent sun. Conditions are generally excellent for travel.",
        "scattered clouds" => "⛅ Scattered Clouds: Mostly clear with good visibility. Travel conditions are ideal.",
        "few clouds" => "🌤️ Mostly Sunny: Excellent visibility and road conditions expected. A great day for travel.",
        d if d.contains("light rain") => "🌦️ Light Rain Advisory: Roads may be slick. Activate wipers and increase your following distance.",
        d if d.contains("moderate rain") => "🌧️ Moderate Rain Warning: Reduce speed significantly and use headlights. Be alert for localized flooding.",
        d if d.contains("heavy rain") => "🌧️ Heavy Rain Warning: High risk of flash floods and zero visibility. It is strongly advised to postpone travel.",
        d if d.contains("clear sky") => "🌞 Clear Skies: Ideal travel conditions. Stay aware of road traffic and hydrate, especially during long drives.",
        _ if group.contains("thunderstorm") => "⛈️ Thunderstorm Warning: Severe weather is active. High risk of lightning, flash floods, and strong winds. Do not travel.",
        _ if group.contains("snow") => "❄️ Snow/Sleet Advisory: Roads will be extremely slippery and visibility poor. Travel is not recommended unless essential.",
        d if group.contains("fog") || d.contains("fog") || group.contains("mist") => "🌫️ Low Visibility Warning: Dense fog or mist is present. Use low-beam headlights and fog lights, and reduce speed drastically.",
        _ if group.contains("wind") => "💨 High Wind Advisory: Be cautious, especially with high-profile vehicles. Watch for falling debris and be prepared for sudden gusts.",
        _ => return None,
    };
    Some(advice)
}

pub fn temperature_advice(celsius: f64) -> Option<&'static str> {
    if celsius.is_nan() {
        return None;
    }
    let advice = if celsius >= 37.0 {
        "🌡️ Danger - Extreme Heat: Heatstroke risk is high. Avoid non-essential travel and stay hydrated. Never leave people or pets in a vehicle."
    } else if celsius >= 34.0 {
        "☀️ Heat Caution: Risk of heat exhaustion. Drink plenty of water, wear light clothing, and take breaks in the shade."
    } else if celsius >= 28.0 {
        "🌤️ Warm Weather: Conditions are pleasant. Ensure you have drinking water available for your journey."
    } else if celsius >= 24.0 {
        "😊 Pleasant Weather: Ideal temperature for travel. Enjoy the trip safely."
    } else if celsius >= 20.0 {
        "🌡️ Mild Temperature: Comfortable conditions for any travel plans."
    } else if celsius <= 12.0 {
        "🧥 Cool Conditions: Temperatures are low. A jacket is recommended, particularly for night travel or trips to higher elevations."
    } else {
        return None;
    };
    Some(advice)
}
