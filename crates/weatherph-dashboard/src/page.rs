//! The dashboard's render surface: one HTML fragment per zone.

use std::collections::BTreeMap;
use std::fmt::Write;

use weatherph_weather::format::escape_html;
use weatherph_weather::Zone;

use crate::nav::SidebarState;

#[derive(Debug, Clone, Default)]
pub struct Page {
    zones: BTreeMap<Zone, String>,
    /// Label from the location change or geocoder
    label: Option<String>,
    /// Station name reported with the current weather
    station: Option<String>,
}

impl Page {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace a zone's fragment wholesale.
    pub fn set(&mut self, zone: Zone, html: String) {
        self.zones.insert(zone, html);
    }

    pub fn get(&self, zone: Zone) -> Option<&str> {
        self.zones.get(&zone).map(String::as_str)
    }

    /// Location label as plain text.
    pub fn set_location_name(&mut self, name: &str) {
        self.label = Some(name.to_string());
        self.refresh_location_name();
    }

    /// Station name from the weather backend; empty names are ignored.
    pub fn set_station_name(&mut self, name: &str) {
        self.station = Some(name.trim().to_string()).filter(|n| !n.is_empty());
        self.refresh_location_name();
    }

    /// Forget the previous location's label and station name.
    pub fn reset_location(&mut self) {
        self.label = None;
        self.station = None;
        self.zones.remove(&Zone::LocationName);
    }

    /// A qualified label ("City, Province") wins over the station name,
    /// which wins over a bare label. Arrival order does not matter.
    fn refresh_location_name(&mut self) {
        let shown = match (&self.label, &self.station) {
            (Some(label), _) if label.contains(',') => label,
            (_, Some(station)) => station,
            (Some(label), None) => label,
            (None, None) => return,
        };
        let html = escape_html(shown);
        self.set(Zone::LocationName, html);
    }

    /// A standalone document with every rendered zone in its container.
    pub fn render_document(&self, sidebar: SidebarState) -> String {
        let mut html = String::from(
            "<!DOCTYPE html>\n<html lang=\"en\">\n<head><meta charset=\"utf-8\"><title>WeatherPH</title></head>\n<body>\n",
        );
        let _ = writeln!(html, "<aside class=\"{}\"></aside>", sidebar.class());
        html.push_str("<main>\n");
        for zone in Zone::ALL {
            if let Some(fragment) = self.get(zone) {
                let _ = writeln!(html, "<section id=\"{}\">\n{}\n</section>", zone.id(), fragment);
            }
        }
        html.push_str("</main>\n</body>\n</html>\n");
        html
    }
}
