//! HTML fragments for each dashboard zone.
//!
//! Every renderer returns a complete fragment for its zone, so re-rendering
//! replaces the zone wholesale. All upstream text is escaped.

use std::fmt::Write;

use crate::advisory::{Advisory, RouteAdvisory, RouteEnd, Severity, TEMPERATURE_COMFORTABLE};
use crate::format::{
    capitalize, escape_html, format_hour, format_temp_detailed, format_temp_whole, format_time,
    format_visibility_km, format_wind_kmh, weekday_name,
};
use crate::icons::{background_url, emoji, icon_url};
use crate::types::{CurrentWeather, DailySummary, ForecastInterval};

/// Named render targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Zone {
    LocationName,
    CurrentWeather,
    HourlyForecast,
    DailyForecast,
    LocalWidget,
    Advisory,
    RouteAdvisory,
}

impl Zone {
    pub const ALL: [Zone; 7] = [
        Zone::LocationName,
        Zone::CurrentWeather,
        Zone::HourlyForecast,
        Zone::DailyForecast,
        Zone::LocalWidget,
        Zone::Advisory,
        Zone::RouteAdvisory,
    ];

    /// Element id of the zone's container.
    pub fn id(self) -> &'static str {
        match self {
            Zone::LocationName => "location-name",
            Zone::CurrentWeather => "current-weather-content",
            Zone::HourlyForecast => "hourly-forecast",
            Zone::DailyForecast => "daily-forecast",
            Zone::LocalWidget => "about-current-weather",
            Zone::Advisory => "advisory",
            Zone::RouteAdvisory => "route-advisory",
        }
    }
}

pub const CURRENT_LOAD_FAILED: &str = "Could not load weather data.";
pub const FORECAST_LOAD_FAILED: &str = "Could not load forecast data.";
pub const WIDGET_LOAD_FAILED: &str = "Could not fetch local weather data.";
pub const HOURLY_NOT_AVAILABLE: &str = "Hourly forecast not available.";
pub const DAILY_NOT_AVAILABLE: &str = "Daily forecast not available.";

/// Single-paragraph placeholder used for errors and empty data.
pub fn message(text: &str) -> String {
    format!("<p>{}</p>", escape_html(text))
}

/// Detailed card: large icon, one-decimal temperatures, km/h wind.
pub fn current_card(current: &CurrentWeather) -> String {
    let desc = escape_html(&current.description);
    let feels = match current.feels_like {
        Some(f) => format!("{}°C", format_temp_detailed(f)),
        None => "N/A".to_string(),
    };
    format!(
        r#"<div class="weather-bg-overlay" style="background-image: url('{bg}')"></div>
<div class="weather-main-info">
    <img src="{icon}" alt="{desc}">
    <div class="current-temp">{temp}°C</div>
    <div class="current-desc">{desc}</div>
</div>
<div class="weather-extra-details">
    <p><strong>Feels like</strong> <span>{feels}</span></p>
    <p><strong>Wind</strong> <span>{wind}</span></p>
    <p><strong>Humidity</strong> <span>{humidity}%</span></p>
    <p><strong>Visibility</strong> <span>{visibility}</span></p>
    <p><strong>Sunrise</strong> <span>{sunrise}</span></p>
    <p><strong>Sunset</strong> <span>{sunset}</span></p>
</div>"#,
        bg = background_url(current.condition()),
        icon = icon_url(&escape_html(&current.icon_code), 4),
        desc = desc,
        temp = format_temp_detailed(current.temperature),
        feels = feels,
        wind = format_wind_kmh(current.wind_speed),
        humidity = current.humidity,
        visibility = format_visibility_km(current.visibility),
        sunrise = format_time(current.sunrise.unwrap_or(0), current.utc_offset_seconds),
        sunset = format_time(current.sunset.unwrap_or(0), current.utc_offset_seconds),
    )
}

/// Compact emoji widget. Wind stays in m/s here.
pub fn local_widget(current: &CurrentWeather, address: &str) -> String {
    let address = if address.is_empty() {
        "Your location"
    } else {
        address
    };
    let feels = current
        .feels_like
        .map(|f| {
            format!(
                r#"<span class="mw-feels">(feels like {}°C)</span>"#,
                format_temp_whole(f)
            )
        })
        .unwrap_or_default();
    format!(
        r#"<div class="mw-header">📍 <span>{address}</span></div>
<div class="mw-main">
    <span class="mw-icon">{icon}</span>
    <span class="mw-temp">{temp}°C</span>
    {feels}
</div>
<div class="mw-pill">{desc}</div>
<div class="mw-row">
    <div><small>Humidity</small><br><b>{humidity}%</b></div>
    <div><small>Wind</small><br><b>{wind} m/s</b></div>
    <div><small>Visibility</small><br><b>{visibility}</b></div>
</div>
<div class="mw-sun">
    <span>🌅 {sunrise}</span>
    <span>🌇 {sunset}</span>
</div>"#,
        address = escape_html(address),
        icon = emoji(&current.icon_code),
        temp = format_temp_whole(current.temperature),
        feels = feels,
        desc = escape_html(&capitalize(&current.description)),
        humidity = current.humidity,
        wind = current.wind_speed,
        visibility = format_visibility_km(current.visibility),
        sunrise = format_time(current.sunrise.unwrap_or(0), current.utc_offset_seconds),
        sunset = format_time(current.sunset.unwrap_or(0), current.utc_offset_seconds),
    )
}

/// Hourly rows with an expandable details block each.
pub fn hourly_list(intervals: &[ForecastInterval], utc_offset: i32) -> String {
    if intervals.is_empty() {
        return message(HOURLY_NOT_AVAILABLE);
    }

    let mut html = String::new();
    for item in intervals {
        let desc = escape_html(&item.description);
        // Writing to a String cannot fail.
        let _ = write!(
            html,
            r#"<div>
<div class="daily-item">
    <div class="daily-date">
        <div>{time}</div>
        <div class="daily-desc">{desc}</div>
    </div>
    <img src="{icon}" alt="{desc}">
    <div class="daily-temp">{temp}°C</div>
</div>
<div class="daily-details">
    <div><strong>Feels like</strong><span>{feels}°C</span></div>
    <div><strong>Wind</strong><span>{wind}</span></div>
    <div><strong>Humidity</strong><span>{humidity}%</span></div>
    <div><strong>Pressure</strong><span>{pressure} hPa</span></div>
    <div class="full-row"><strong>Cloud Cover</strong><span>{clouds}%</span></div>
</div>
</div>
"#,
            time = format_hour(item.timestamp, utc_offset),
            desc = desc,
            icon = icon_url(&escape_html(&item.icon_code), 2),
            temp = format_temp_whole(item.temperature),
            feels = format_temp_detailed(item.feels_like),
            wind = format_wind_kmh(item.wind_speed),
            humidity = item.humidity,
            pressure = item.pressure,
            clouds = item.cloud_cover,
        );
    }
    html
}

/// Daily rows: weekday, representative condition, high / low.
pub fn daily_list(days: &[DailySummary]) -> String {
    if days.is_empty() {
        return message(DAILY_NOT_AVAILABLE);
    }

    let mut html = String::new();
    for day in days {
        let desc = escape_html(&day.representative_description);
        let _ = write!(
            html,
            r#"<div>
<div class="daily-item">
    <div class="daily-date">
        <div>{weekday}</div>
        <div class="daily-desc">{desc}</div>
    </div>
    <img src="{icon}" alt="{desc}">
    <div class="daily-temp">{max}° / {min}°</div>
</div>
<div class="daily-details">
    <div><strong>Avg. Humidity</strong><span>{humidity}%</span></div>
    <div><strong>Max Wind</strong><span>{wind:.1} km/h</span></div>
    <div class="full-row"><strong>Condition</strong><span class="capitalize">{desc}</span></div>
</div>
</div>
"#,
            weekday = weekday_name(day.date),
            desc = desc,
            icon = icon_url(&escape_html(&day.representative_icon), 2),
            max = format_temp_whole(day.max_temp),
            min = format_temp_whole(day.min_temp),
            humidity = day.avg_humidity,
            wind = day.max_wind_speed_kmh,
        );
    }
    html
}

/// Advisory lines, or a calm-conditions note when nothing applies.
pub fn advisory(advisory: &Advisory) -> String {
    if advisory.is_empty() {
        return message("No weather advisories for this location.");
    }
    advisory
        .weather
        .iter()
        .chain(advisory.temperature.iter())
        .map(|line| format!(r#"<p class="advisory-line">{}</p>"#, escape_html(line)))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Origin and destination side by side, each with its own alerts.
pub fn route_advisory(route: &RouteAdvisory) -> String {
    format!(
        "{}\n{}",
        route_end("Origin", &route.origin),
        route_end("Destination", &route.destination)
    )
}

fn route_end(role: &str, end: &RouteEnd) -> String {
    let advisory = end.advisory();
    let mut html = format!(
        r#"<div class="route-end">
    <h3>{role}: {query}</h3>
    <p class="route-place">{place}</p>
"#,
        role = role,
        query = escape_html(&end.query),
        place = escape_html(&end.place.name),
    );

    if let Some(current) = &end.current {
        let desc = escape_html(&current.description);
        let _ = write!(
            html,
            r#"    <div class="route-conditions">
        <img src="{icon}" alt="{desc}">
        <span>{temp}°C</span>
        <span class="capitalize">{desc}</span>
    </div>
"#,
            icon = icon_url(&escape_html(&current.icon_code), 2),
            desc = desc,
            temp = format_temp_whole(current.temperature),
        );
    }

    if let Some(line) = advisory.weather {
        let _ = writeln!(
            html,
            r#"    <div class="{}">{}</div>"#,
            Severity::of_weather(line).class(),
            escape_html(line)
        );
    }
    let temperature = advisory.temperature.unwrap_or(TEMPERATURE_COMFORTABLE);
    let _ = writeln!(
        html,
        r#"    <div class="{}">{}</div>"#,
        Severity::of_temperature(temperature).class(),
        escape_html(temperature)
    );
    html.push_str("</div>");
    html
}
