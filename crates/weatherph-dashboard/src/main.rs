use anyhow::Result;
use clap::Parser;
use parking_lot::Mutex;

use weatherph_core::{AppError, Config};
use weatherph_dashboard::cli::{Cli, Command};
use weatherph_dashboard::services::weather_service::GEOLOCATION_DENIED;
use weatherph_dashboard::{MapController, NavigationController, Page, WeatherService};
use weatherph_weather::{render, Coordinate, Zone};

#[tokio::main]
async fn main() -> Result<()> {
    weatherph_core::init()?;
    let command = Cli::parse().into_command();

    let (config, _) = Config::load_validated().map_err(|e| {
        let err = AppError::from(e);
        tracing::error!(user_message = err.user_message(), "{}", err);
        err
    })?;
    let service = WeatherService::from_config(&config)?;
    let nav = NavigationController::new(&config.navigation);
    let mut map = MapController::new(&config.map);
    let page = Mutex::new(Page::new());

    let change = match command {
        Command::Widget(position) => {
            let html = match position.coordinate() {
                Some(c) => service.local_widget(c).await,
                None => render::message(GEOLOCATION_DENIED),
            };
            page.lock().set(Zone::LocalWidget, html);
            println!("{}", page.lock().render_document(nav.state()));
            return Ok(());
        }
        Command::Route {
            origin,
            destination,
        } => {
            service.update_route(&origin, &destination, &page).await;
            println!("{}", page.lock().render_document(nav.state()));
            return Ok(());
        }
        Command::Dashboard(position) => match position.coordinate() {
            Some(coordinate) => map.geolocation_success(coordinate),
            None => map.geolocation_denied(),
        },
        Command::Click { lat, lon } => map.map_click(Coordinate::new(lat, lon)),
        Command::Search { query } => {
            let query = query.join(" ");
            match service.geocoder().search(&query).await {
                Some(place) => map.search_result(place),
                None => anyhow::bail!("No place found for {:?}", query),
            }
        }
    };

    service.update(&change, &page).await;

    println!("{}", page.lock().render_document(nav.state()));
    tracing::info!("Dashboard rendered for {}", change.coordinate);

    Ok(())
}
