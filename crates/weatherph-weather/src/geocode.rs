//! Geocoding against a Nominatim-compatible service (OpenStreetMap by default).
//!
//! Reverse lookups never fail from the caller's point of view: they degrade
//! to the display name and then to the raw `"lat,lon"` string.

use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::types::{Coordinate, Place, WeatherError};

/// Address components, in the order they appear in a short address.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct AddressComponents {
    pub road: Option<String>,
    pub barangay: Option<String>,
    pub village: Option<String>,
    pub suburb: Option<String>,
    pub town: Option<String>,
    pub city: Option<String>,
    pub municipality: Option<String>,
    pub state: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ReverseResponse {
    pub address: Option<AddressComponents>,
    pub display_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    lat: String,
    lon: String,
    display_name: String,
}

/// Join every non-empty component in priority order with ", ".
/// Returns an empty string when nothing matched.
pub fn format_short_address(address: &AddressComponents) -> String {
    [
        &address.road,
        &address.barangay,
        &address.village,
        &address.suburb,
        &address.town,
        &address.city,
        &address.municipality,
        &address.state,
    ]
    .into_iter()
    .filter_map(|part| part.as_deref())
    .map(str::trim)
    .filter(|part| !part.is_empty())
    .collect::<Vec<_>>()
    .join(", ")
}

/// A `"lat, lon"` literal typed in place of a place name.
pub fn parse_coordinate_query(query: &str) -> Option<Coordinate> {
    let (lat, lon) = query.split_once(',')?;
    let latitude: f64 = lat.trim().parse().ok()?;
    let longitude: f64 = lon.trim().parse().ok()?;
    if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
        return None;
    }
    Some(Coordinate::new(latitude, longitude))
}

/// Short address, else display name, else the coordinate itself.
pub fn label_for(response: &ReverseResponse, coordinate: Coordinate) -> String {
    let short = response
        .address
        .as_ref()
        .map(format_short_address)
        .unwrap_or_default();
    if !short.is_empty() {
        return short;
    }
    match response.display_name.as_deref().map(str::trim) {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => coordinate.to_string(),
    }
}

#[derive(Debug, Clone)]
pub struct GeoResolver {
    client: Client,
    base_url: String,
    country_codes: String,
}

impl GeoResolver {
    pub fn new(
        base_url: &str,
        user_agent: &str,
        timeout: Duration,
        country_codes: &str,
    ) -> Result<Self, WeatherError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            country_codes: country_codes.to_string(),
        })
    }

    /// Human-readable address for a coordinate. Never fails.
    #[tracing::instrument(skip(self), level = "debug")]
    pub async fn resolve_address(&self, coordinate: Coordinate) -> String {
        match self.reverse(coordinate).await {
            Ok(response) => {
                let label = label_for(&response, coordinate);
                tracing::info!("Reverse geocoded to: {}", label);
                label
            }
            Err(e) => {
                tracing::debug!("Reverse geocode failed, using coordinates: {}", e);
                coordinate.to_string()
            }
        }
    }

    /// Full display name for a coordinate, if the geocoder knows one.
    #[tracing::instrument(skip(self), level = "debug")]
    pub async fn place_name(&self, coordinate: Coordinate) -> Option<String> {
        match self.reverse(coordinate).await {
            Ok(response) => response.display_name.filter(|n| !n.trim().is_empty()),
            Err(e) => {
                tracing::debug!("Place name lookup failed: {}", e);
                None
            }
        }
    }

    /// Resolve a route endpoint: a coordinate literal is taken as-is,
    /// anything else goes through [`search`](Self::search).
    pub async fn locate(&self, query: &str) -> Option<Place> {
        if let Some(coordinate) = parse_coordinate_query(query) {
            return Some(Place {
                coordinate,
                name: query.trim().to_string(),
            });
        }
        self.search(query).await
    }

    /// Forward geocode a free-text query to the best matching place.
    #[tracing::instrument(skip(self), level = "debug")]
    pub async fn search(&self, query: &str) -> Option<Place> {
        let query = query.trim();
        if query.is_empty() {
            return None;
        }

        let url = format!("{}/search", self.base_url);
        let mut params = vec![("q", query), ("format", "json"), ("limit", "1")];
        if !self.country_codes.is_empty() {
            params.push(("countrycodes", self.country_codes.as_str()));
        }

        let results: Vec<SearchResult> = match self.get_json(&url, &params).await {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!("Place search for {:?} failed: {}", query, e);
                return None;
            }
        };

        let first = results.into_iter().next()?;
        let (Ok(latitude), Ok(longitude)) = (first.lat.parse::<f64>(), first.lon.parse::<f64>()) else {
            tracing::debug!("Search result had unparseable coordinates");
            return None;
        };

        Some(Place {
            coordinate: Coordinate::new(latitude, longitude),
            name: first.display_name,
        })
    }

    async fn reverse(&self, coordinate: Coordinate) -> Result<ReverseResponse, WeatherError> {
        let url = format!("{}/reverse", self.base_url);
        let lat = coordinate.latitude.to_string();
        let lon = coordinate.longitude.to_string();
        let params = [("lat", lat.as_str()), ("lon", lon.as_str()), ("format", "json")];
        self.get_json(&url, &params).await
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        params: &[(&str, &str)],
    ) -> Result<T, WeatherError> {
        let response = self.client.get(url).query(params).send().await?;

        if !response.status().is_success() {
            return Err(WeatherError::Status(response.status().as_u16()));
        }

        response
            .json()
            .await
            .map_err(|e| WeatherError::Parse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_city_and_state() {
        let address = AddressComponents {
            city: Some("Quezon City".to_string()),
            state: Some("Metro Manila".to_string()),
            ..Default::default()
        };
        assert_eq!(format_short_address(&address), "Quezon City, Metro Manila");
    }

    #[test]
    fn test_empty_address_is_empty_string() {
        assert_eq!(format_short_address(&AddressComponents::default()), "");
    }

    #[test]
    fn test_components_keep_priority_order() {
        let address = AddressComponents {
            state: Some("Cebu".to_string()),
            road: Some("Osmeña Boulevard".to_string()),
            barangay: Some("".to_string()),
            city: Some("Cebu City".to_string()),
            ..Default::default()
        };
        assert_eq!(
            format_short_address(&address),
            "Osmeña Boulevard, Cebu City, Cebu"
        );
    }

    #[test]
    fn test_coordinate_query() {
        assert_eq!(
            parse_coordinate_query(" 14.6, 121.03 "),
            Some(Coordinate::new(14.6, 121.03))
        );
        assert_eq!(parse_coordinate_query("-7.5,110"), Some(Coordinate::new(-7.5, 110.0)));
        assert_eq!(parse_coordinate_query("Quezon City, Metro Manila"), None);
        assert_eq!(parse_coordinate_query("95, 120"), None);
        assert_eq!(parse_coordinate_query("14.6"), None);
    }

    #[test]
    fn test_label_falls_back_to_display_name() {
        let response = ReverseResponse {
            address: Some(AddressComponents::default()),
            display_name: Some("Pacific Ocean".to_string()),
        };
        assert_eq!(label_for(&response, Coordinate::new(10.0, 130.0)), "Pacific Ocean");
    }

    #[test]
    fn test_label_falls_back_to_coordinates() {
        let response = ReverseResponse::default();
        assert_eq!(label_for(&response, Coordinate::new(10.5, 130.25)), "10.5,130.25");
    }

    #[test]
    fn test_deserialize_ignores_unknown_components() {
        let json = r#"{
            "display_name": "Session Road, Baguio, Benguet, Philippines",
            "address": {"road": "Session Road", "city": "Baguio", "state": "Benguet",
                        "country": "Philippines", "postcode": "2600"}
        }"#;
        let response: ReverseResponse = serde_json::from_str(json).unwrap();
        assert_eq!(
            label_for(&response, Coordinate::new(16.41, 120.59)),
            "Session Road, Baguio, Benguet"
        );
    }
}
