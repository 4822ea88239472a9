//! Map selection state.
//!
//! Every transition lands in `Selected` and hands back the change that
//! re-runs the weather pipeline. There is no way back to `Unselected`.

use weatherph_core::MapConfig;
use weatherph_weather::{Coordinate, Place};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationSource {
    Geolocation,
    DefaultFallback,
    Search,
    MapClick,
}

/// A new active coordinate, with a label when the source already knows one.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationChange {
    pub coordinate: Coordinate,
    pub label: Option<String>,
    pub source: LocationSource,
}

#[derive(Debug, Clone, PartialEq)]
pub enum MapState {
    Unselected,
    Selected {
        coordinate: Coordinate,
        label: Option<String>,
    },
}

#[derive(Debug, Clone)]
pub struct MapController {
    state: MapState,
    default_coordinate: Coordinate,
    default_label: String,
}

impl MapController {
    pub fn new(config: &MapConfig) -> Self {
        Self {
            state: MapState::Unselected,
            default_coordinate: Coordinate::new(config.default_latitude, config.default_longitude),
            default_label: config.default_label.clone(),
        }
    }

    pub fn state(&self) -> &MapState {
        &self.state
    }

    /// Coordinate of the marker, if one has been placed.
    pub fn selected(&self) -> Option<Coordinate> {
        match &self.state {
            MapState::Selected { coordinate, .. } => Some(*coordinate),
            MapState::Unselected => None,
        }
    }

    pub fn geolocation_success(&mut self, coordinate: Coordinate) -> LocationChange {
        self.select(coordinate, None, LocationSource::Geolocation)
    }

    /// Permission denied or unsupported: fall back to the configured default.
    pub fn geolocation_denied(&mut self) -> LocationChange {
        tracing::info!(
            "Geolocation unavailable, using default location {}",
            self.default_label
        );
        let label = Some(self.default_label.clone());
        self.select(self.default_coordinate, label, LocationSource::DefaultFallback)
    }

    pub fn search_result(&mut self, place: Place) -> LocationChange {
        self.select(place.coordinate, Some(place.name), LocationSource::Search)
    }

    pub fn map_click(&mut self, coordinate: Coordinate) -> LocationChange {
        self.select(coordinate, None, LocationSource::MapClick)
    }

    fn select(
        &mut self,
        coordinate: Coordinate,
        label: Option<String>,
        source: LocationSource,
    ) -> LocationChange {
        tracing::debug!("Map selection {:?} -> {}", source, coordinate);
        self.state = MapState::Selected {
            coordinate,
            label: label.clone(),
        };
        LocationChange {
            coordinate,
            label,
            source,
        }
    }
}
