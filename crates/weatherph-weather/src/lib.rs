//! Weather pipeline pieces for the WeatherPH dashboard
//!
//! Geocoding via Nominatim, current/forecast fetches against the dashboard
//! backend, forecast aggregation, travel advisories and HTML fragments.

pub mod advisory;
pub mod aggregate;
pub mod client;
pub mod format;
pub mod geocode;
pub mod icons;
pub mod render;
pub mod types;

pub use advisory::{advise, Advisory, RouteAdvisory, RouteEnd, Severity};
pub use aggregate::{group_by_day, group_by_day_with, next_n, DayBoundary, MAX_DAYS};
pub use client::WeatherClient;
pub use geocode::{format_short_address, parse_coordinate_query, AddressComponents, GeoResolver};
pub use render::Zone;
pub use types::*;
