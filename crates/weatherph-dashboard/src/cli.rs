//! Command-line interface for the `weatherph` binary.

use clap::{Args, Parser, Subcommand};

use weatherph_weather::Coordinate;

/// Render the WeatherPH dashboard for a location and print it as HTML.
#[derive(Parser, Debug)]
#[command(name = "weatherph", version, about)]
pub struct Cli {
    /// Without a subcommand, renders the dashboard for the default location.
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Dashboard for the device position (default location without one)
    Dashboard(Position),
    /// Dashboard for a clicked map point
    Click {
        #[arg(value_parser = parse_latitude, allow_negative_numbers = true)]
        lat: f64,
        #[arg(value_parser = parse_longitude, allow_negative_numbers = true)]
        lon: f64,
    },
    /// Dashboard for a searched place
    Search {
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },
    /// Compact local-weather widget
    Widget(Position),
    /// Travel advisory for both ends of a route
    Route { origin: String, destination: String },
}

/// An optional `LAT LON` pair; absent means geolocation is unavailable.
#[derive(Args, Debug, Clone, Copy, PartialEq)]
pub struct Position {
    #[arg(value_parser = parse_latitude, allow_negative_numbers = true, requires = "lon")]
    pub lat: Option<f64>,
    #[arg(value_parser = parse_longitude, allow_negative_numbers = true)]
    pub lon: Option<f64>,
}

impl Position {
    pub fn coordinate(&self) -> Option<Coordinate> {
        Some(Coordinate::new(self.lat?, self.lon?))
    }
}

impl Cli {
    /// The subcommand, with a bare invocation meaning the default dashboard.
    pub fn into_command(self) -> Command {
        self.command.unwrap_or(Command::Dashboard(Position {
            lat: None,
            lon: None,
        }))
    }
}

fn parse_latitude(value: &str) -> Result<f64, String> {
    parse_in_range(value, 90.0)
}

fn parse_longitude(value: &str) -> Result<f64, String> {
    parse_in_range(value, 180.0)
}

fn parse_in_range(value: &str, limit: f64) -> Result<f64, String> {
    let degrees: f64 = value
        .parse()
        .map_err(|_| format!("`{}` is not a number", value))?;
    if !(-limit..=limit).contains(&degrees) {
        return Err(format!("{} is outside -{}..={}", degrees, limit, limit));
    }
    Ok(degrees)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Command, clap::Error> {
        Cli::try_parse_from(std::iter::once("weatherph").chain(args.iter().copied()))
            .map(Cli::into_command)
    }

    #[test]
    fn test_no_args_is_default_dashboard() {
        let command = parse(&[]).unwrap();
        assert!(matches!(command, Command::Dashboard(p) if p.coordinate().is_none()));
    }

    #[test]
    fn test_dashboard_position() {
        match parse(&["dashboard", "10.3157", "123.8854"]).unwrap() {
            Command::Dashboard(position) => {
                assert_eq!(position.coordinate(), Some(Coordinate::new(10.3157, 123.8854)));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_click_accepts_negative_coordinates() {
        assert_eq!(
            parse(&["click", "-33.87", "151.21"]).unwrap(),
            Command::Click {
                lat: -33.87,
                lon: 151.21
            }
        );
        assert!(parse(&["click"]).is_err());
    }

    #[test]
    fn test_search_collects_words() {
        assert_eq!(
            parse(&["search", "Tagaytay", "City"]).unwrap(),
            Command::Search {
                query: vec!["Tagaytay".to_string(), "City".to_string()]
            }
        );
        assert!(parse(&["search"]).is_err());
    }

    #[test]
    fn test_widget_position_is_optional() {
        assert!(matches!(
            parse(&["widget"]).unwrap(),
            Command::Widget(p) if p.coordinate().is_none()
        ));
        assert!(parse(&["widget", "14.5"]).is_err());
    }

    #[test]
    fn test_route_takes_two_places() {
        assert_eq!(
            parse(&["route", "Quezon City", "Baguio City"]).unwrap(),
            Command::Route {
                origin: "Quezon City".to_string(),
                destination: "Baguio City".to_string()
            }
        );
        assert!(parse(&["route", "Quezon City"]).is_err());
    }

    #[test]
    fn test_rejects_out_of_range_and_non_numeric() {
        assert!(parse(&["click", "95", "120"]).is_err());
        assert!(parse(&["click", "14.5", "181"]).is_err());
        assert!(parse(&["dashboard", "north", "east"]).is_err());
        assert!(parse(&["--verbose"]).is_err());
    }
}
