//! Forecast aggregation: hourly truncation and per-day summaries.

use chrono::{DateTime, NaiveDate};

use crate::format::MS_TO_KMH;
use crate::types::{DailySummary, ForecastInterval};

/// Most days the daily list ever shows.
pub const MAX_DAYS: usize = 7;

/// Which midnight splits two forecast days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DayBoundary {
    #[default]
    Utc,
    /// Local midnight at the forecast location, given its UTC offset in seconds.
    Location(i32),
}

impl DayBoundary {
    fn date_of(self, timestamp: i64) -> Option<NaiveDate> {
        let shift = match self {
            Self::Utc => 0,
            Self::Location(utc_offset) => i64::from(utc_offset),
        };
        DateTime::from_timestamp(timestamp.checked_add(shift)?, 0).map(|dt| dt.date_naive())
    }
}

/// First `n` intervals in upstream order.
pub fn next_n(intervals: &[ForecastInterval], n: usize) -> &[ForecastInterval] {
    &intervals[..n.min(intervals.len())]
}

/// Group intervals by UTC calendar day, at most [`MAX_DAYS`] days.
pub fn group_by_day(intervals: &[ForecastInterval]) -> Vec<DailySummary> {
    group_by_day_with(intervals, DayBoundary::Utc, MAX_DAYS)
}

/// Group intervals by calendar day under `boundary`, keeping the first
/// `max_days` days in the order they first appear.
pub fn group_by_day_with(
    intervals: &[ForecastInterval],
    boundary: DayBoundary,
    max_days: usize,
) -> Vec<DailySummary> {
    let mut buckets: Vec<(NaiveDate, Vec<&ForecastInterval>)> = Vec::new();

    for interval in intervals {
        let Some(date) = boundary.date_of(interval.timestamp) else {
            tracing::debug!("Skipping interval with out-of-range timestamp {}", interval.timestamp);
            continue;
        };
        match buckets.iter_mut().find(|(d, _)| *d == date) {
            Some((_, bucket)) => bucket.push(interval),
            None => buckets.push((date, vec![interval])),
        }
    }

    buckets
        .into_iter()
        .take(max_days.min(MAX_DAYS))
        .filter_map(|(date, bucket)| summarize(date, &bucket))
        .collect()
}

fn summarize(date: NaiveDate, bucket: &[&ForecastInterval]) -> Option<DailySummary> {
    let first = bucket.first()?;

    let mut min_temp = first.temperature;
    let mut max_temp = first.temperature;
    let mut max_wind = first.wind_speed;
    let mut humidity_sum = 0.0;

    for interval in bucket {
        min_temp = min_temp.min(interval.temperature);
        max_temp = max_temp.max(interval.temperature);
        max_wind = max_wind.max(interval.wind_speed);
        humidity_sum += f64::from(interval.humidity);
    }

    let avg_humidity = (humidity_sum / bucket.len() as f64).round() as u8;

    let icons: Vec<String> = bucket.iter().map(|i| day_icon(&i.icon_code)).collect();
    let representative_icon = mode(icons.iter().map(String::as_str))?;
    let representative_description = mode(bucket.iter().map(|i| i.description.as_str()))?;

    Some(DailySummary {
        date,
        min_temp,
        max_temp,
        avg_humidity,
        max_wind_speed_kmh: max_wind * MS_TO_KMH,
        representative_icon: representative_icon.to_string(),
        representative_description: representative_description.to_string(),
    })
}

/// Map a night icon code ("10n") to its day variant ("10d").
pub fn day_icon(code: &str) -> String {
    match code.strip_suffix('n') {
        Some(stem) => format!("{}d", stem),
        None => code.to_string(),
    }
}

/// Most frequent value; on a tie the value seen first wins.
pub fn mode<'a, I>(values: I) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut counts: Vec<(&'a str, usize)> = Vec::new();
    for value in values {
        match counts.iter_mut().find(|(v, _)| *v == value) {
            Some((_, count)) => *count += 1,
            None => counts.push((value, 1)),
        }
    }

    let mut best: Option<(&'a str, usize)> = None;
    for (value, count) in counts {
        if best.map_or(true, |(_, c)| count > c) {
            best = Some((value, count));
        }
    }
    best.map(|(value, _)| value)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DAY: i64 = 86_400;
    // 2024-03-01T00:00:00Z
    const MARCH_1: i64 = 1_709_251_200;

    fn interval(timestamp: i64, temperature: f64, icon: &str) -> ForecastInterval {
        ForecastInterval {
            timestamp,
            temperature,
            feels_like: temperature,
            humidity: 70,
            pressure: 1010.0,
            wind_speed: 2.0,
            wind_direction: 90.0,
            precipitation_probability: 0.0,
            cloud_cover: 20,
            description: "clear sky".to_string(),
            icon_code: icon.to_string(),
        }
    }

    #[test]
    fn test_empty_input_yields_no_days() {
        assert!(group_by_day(&[]).is_empty());
    }

    #[test]
    fn test_single_day_bounds_every_temperature() {
        let temps = [27.4, 31.9, 29.0, 25.2, 33.1];
        let intervals: Vec<_> = temps
            .iter()
            .enumerate()
            .map(|(i, t)| interval(MARCH_1 + i as i64 * 3 * 3600, *t, "01d"))
            .collect();

        let days = group_by_day(&intervals);
        assert_eq!(days.len(), 1);
        let day = &days[0];
        assert_eq!(day.date, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert_eq!(day.min_temp, 25.2);
        assert_eq!(day.max_temp, 33.1);
        for t in temps {
            assert!(day.min_temp <= t && t <= day.max_temp);
        }
    }

    #[test]
    fn test_never_more_than_seven_days() {
        let intervals: Vec<_> = (0..12)
            .map(|d| interval(MARCH_1 + d * DAY + 3600, 28.0, "02d"))
            .collect();

        let days = group_by_day(&intervals);
        assert_eq!(days.len(), 7);
        assert_eq!(days[6].date, NaiveDate::from_ymd_opt(2024, 3, 7).unwrap());
    }

    #[test]
    fn test_max_days_below_seven() {
        let intervals: Vec<_> = (0..5)
            .map(|d| interval(MARCH_1 + d * DAY, 28.0, "02d"))
            .collect();
        assert_eq!(group_by_day_with(&intervals, DayBoundary::Utc, 3).len(), 3);
        assert_eq!(group_by_day_with(&intervals, DayBoundary::Utc, 30).len(), 5);
    }

    #[test]
    fn test_humidity_average_and_wind_conversion() {
        let mut a = interval(MARCH_1, 28.0, "01d");
        a.humidity = 70;
        a.wind_speed = 5.0;
        let mut b = interval(MARCH_1 + 3600, 28.0, "01d");
        b.humidity = 75;
        b.wind_speed = 2.5;

        let days = group_by_day(&[a, b]);
        assert_eq!(days[0].avg_humidity, 73);
        assert!((days[0].max_wind_speed_kmh - 18.0).abs() < 1e-9);
    }

    #[test]
    fn test_night_icons_count_as_day_icons() {
        let icons = ["01n", "04d", "01d", "01n", "01d", "01d"];
        let intervals: Vec<_> = icons
            .iter()
            .enumerate()
            .map(|(i, icon)| interval(MARCH_1 + i as i64 * 3600, 28.0, icon))
            .collect();

        let days = group_by_day(&intervals);
        assert_eq!(days[0].representative_icon, "01d");
    }

    #[test]
    fn test_representative_icon_is_never_a_night_icon() {
        let intervals = vec![
            interval(MARCH_1 + 3600, 26.0, "10n"),
            interval(MARCH_1 + 2 * 3600, 26.0, "10n"),
        ];
        assert_eq!(group_by_day(&intervals)[0].representative_icon, "10d");
    }

    #[test]
    fn test_mode_tie_goes_to_first_seen() {
        assert_eq!(mode(["04d", "10d", "10d", "04d"]), Some("04d"));
        assert_eq!(mode(["light rain", "few clouds"]), Some("light rain"));
        assert_eq!(mode(std::iter::empty::<&str>()), None);
    }

    #[test]
    fn test_utc_midnight_splits_days() {
        let intervals = vec![
            interval(MARCH_1 - 3600, 25.0, "01n"),
            interval(MARCH_1 + 3600, 24.0, "01n"),
        ];
        let days = group_by_day(&intervals);
        assert_eq!(days.len(), 2);
        assert_eq!(days[0].date, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
    }

    #[test]
    fn test_location_boundary_shifts_days() {
        // 23:00Z Feb 29 and 01:00Z Mar 1 are both March 1st in Manila (+8h).
        let intervals = vec![
            interval(MARCH_1 - 3600, 25.0, "01d"),
            interval(MARCH_1 + 3600, 24.0, "01d"),
        ];
        let days = group_by_day_with(&intervals, DayBoundary::Location(8 * 3600), MAX_DAYS);
        assert_eq!(days.len(), 1);
        assert_eq!(days[0].date, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
    }

    #[test]
    fn test_days_keep_first_appearance_order() {
        let intervals = vec![
            interval(MARCH_1 + DAY, 25.0, "01d"),
            interval(MARCH_1, 24.0, "01d"),
        ];
        let days = group_by_day(&intervals);
        assert_eq!(days[0].date, NaiveDate::from_ymd_opt(2024, 3, 2).unwrap());
        assert_eq!(days[1].date, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
    }

    #[test]
    fn test_next_n_truncates_without_reordering() {
        let intervals: Vec<_> = (0..10)
            .map(|i| interval(MARCH_1 + (10 - i) * 3600, i as f64, "01d"))
            .collect();
        let next = next_n(&intervals, 8);
        assert_eq!(next.len(), 8);
        assert_eq!(next[0].temperature, 0.0);
        assert_eq!(next[7].temperature, 7.0);
        assert_eq!(next_n(&intervals[..3], 8).len(), 3);
    }

    #[test]
    fn test_day_icon() {
        assert_eq!(day_icon("01n"), "01d");
        assert_eq!(day_icon("50n"), "50d");
        assert_eq!(day_icon("04d"), "04d");
        assert_eq!(day_icon(""), "");
    }
}
