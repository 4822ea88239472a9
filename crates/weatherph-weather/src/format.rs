//! Display formatting shared by every render zone.

use chrono::{DateTime, NaiveDate, Timelike};

/// m/s → km/h
pub const MS_TO_KMH: f64 = 3.6;

const MISSING_TIME: &str = "--:--";

/// 12-hour clock time ("H:MM AM/PM") at a location `utc_offset` seconds
/// from UTC. A zero timestamp means the upstream value was missing.
pub fn format_time(unix: i64, utc_offset: i32) -> String {
    if unix == 0 {
        return MISSING_TIME.to_string();
    }
    match local_hm(unix, utc_offset) {
        Some((hour, minute)) => {
            let (h12, meridiem) = twelve_hour(hour);
            format!("{}:{:02} {}", h12, minute, meridiem)
        }
        None => MISSING_TIME.to_string(),
    }
}

/// Hour-only label ("3 PM") for the hourly list.
pub fn format_hour(unix: i64, utc_offset: i32) -> String {
    match local_hm(unix, utc_offset) {
        Some((hour, _)) => {
            let (h12, meridiem) = twelve_hour(hour);
            format!("{} {}", h12, meridiem)
        }
        None => MISSING_TIME.to_string(),
    }
}

fn local_hm(unix: i64, utc_offset: i32) -> Option<(u32, u32)> {
    let shifted = unix.checked_add(i64::from(utc_offset))?;
    let dt = DateTime::from_timestamp(shifted, 0)?;
    Some((dt.hour(), dt.minute()))
}

fn twelve_hour(hour: u32) -> (u32, &'static str) {
    let meridiem = if hour >= 12 { "PM" } else { "AM" };
    match hour % 12 {
        0 => (12, meridiem),
        h => (h, meridiem),
    }
}

/// Whole degrees, for compact widgets and list rows.
pub fn format_temp_whole(celsius: f64) -> String {
    // +0.0 folds a rounded -0.0 into 0.0
    format!("{}", celsius.round() + 0.0)
}

/// One decimal place, for the detailed card.
pub fn format_temp_detailed(celsius: f64) -> String {
    format!("{:.1}", celsius)
}

pub fn wind_kmh(meters_per_second: f64) -> f64 {
    meters_per_second * MS_TO_KMH
}

/// "12.6 km/h"
pub fn format_wind_kmh(meters_per_second: f64) -> String {
    format!("{:.1} km/h", wind_kmh(meters_per_second))
}

/// "10.0 km", or "N/A" when upstream omitted visibility.
pub fn format_visibility_km(meters: Option<f64>) -> String {
    match meters {
        Some(m) => format!("{:.1} km", m / 1000.0),
        None => "N/A".to_string(),
    }
}

/// "Monday"
pub fn weekday_name(date: NaiveDate) -> String {
    date.format("%A").to_string()
}

/// Uppercase the first character ("light rain" → "Light rain").
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Escape text for interpolation into HTML element content or attributes.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
