//! WeatherPH dashboard: map selection, the weather update pipeline, and the
//! page it renders into.

pub mod cli;
pub mod error_mapping;
pub mod map;
pub mod nav;
pub mod page;
pub mod services;

pub use map::{LocationChange, LocationSource, MapController, MapState};
pub use nav::{NavigationController, SidebarState};
pub use page::Page;
pub use services::{PipelineSettings, WeatherService, WeatherServiceMessage};
