extern crate actix;
extern crate env_logger;
#[macro_use] extern crate log;

use actix::System;
use chrono::Utc;
use futures::future::lazy;
use futures::Future;
use clap::{Parser, Subcommand};
use std::cell::RefCell;
use std::env;
use std::process;
use std::rc::Rc;

use league_widgets::app::league_day::next_league_day;
use league_widgets::app::provider::open_meteo::OpenMeteoProvider;
use league_widgets::app::teams::{CascadingTeamFilter, HttpTeamLookup};
use league_widgets::app::forecast::ForecastSummary;
use league_widgets::app::widget::{WeatherWidget, WidgetError};
use league_widgets::app::ArbiterSpawn;
use league_widgets::dom::{HtmlDocument, SelectBox, SelectField, SelectOption, WeekField};
use league_widgets::settings::Settings;

#[derive(Parser)]
#[command(name = "league_widgets", about = "Run the league page widgets from the command line")]
struct Cli {
    /// Settings file; without it cfg/config.json is used when present
    #[arg(short, long)]
    config: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render the forecast panel for DATE (defaults to the next league day)
    Weather {
        date: Option<String>,

        #[arg(long)]
        element: Option<String>,
    },

    /// Refresh the absent/drawn team selects for WEEK_ID
    Teams {
        week_id: String,

        #[arg(long)]
        absent: Option<String>,

        #[arg(long)]
        drawn: Option<String>,
    },
}

fn main() {
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "league_widgets=info");
    }
    env_logger::init();

    let cli = Cli::parse();
    let loaded = match cli.config {
        Some(ref path) => Settings::load(path),
        None => Settings::load_or_default(Settings::DEFAULT_PATH),
    };
    let settings = loaded.unwrap_or_else(|e| {
        error!("{}", e);
        process::exit(1);
    });

    let mut system = System::new("league_widgets");

    match cli.command {
        Command::Weather { date, element } => {
            let date = match date {
                Some(date) => date,
                None => match settings.weather.league_timezone() {
                    Ok(timezone) => next_league_day(Utc::now(), timezone),
                    Err(e) => {
                        error!("{}", e);
                        process::exit(1);
                    }
                },
            };
            let element = element.unwrap_or_else(|| settings.weather.element_id.clone());

            let document = Rc::new(RefCell::new(HtmlDocument::new().with_element(&element)));
            let widget = WeatherWidget::new(OpenMeteoProvider::from_settings(&settings.weather), document.clone())
                .with_timeout(settings.weather.timeout())
                .with_default_element(&settings.weather.element_id);

            let result = system.block_on(widget.load_forecast(&date, Some(element.as_str())));
            println!("{}", document.borrow().inner_html(&element).unwrap_or_default());

            let code = weather_exit_code(&result);
            if code != 0 {
                process::exit(code);
            }
        }
        Command::Teams { week_id, absent, drawn } => {
            let lookup = HttpTeamLookup::for_page(&settings.teams.page_url, settings.teams.timeout())
                .unwrap_or_else(|e| {
                    error!("Invalid admin page url {}: {}", settings.teams.page_url, e);
                    process::exit(1);
                });

            let absent = Rc::new(RefCell::new(preselected(absent)));
            let drawn = Rc::new(RefCell::new(preselected(drawn)));
            let filter = CascadingTeamFilter::new(lookup, absent.clone(), drawn.clone());

            let week = WeekField::new(Some(week_id.as_str()));

            let settled = system.block_on(lazy(|| {
                let attached = filter.attach(&week, ArbiterSpawn);
                filter.settled().map(move |_| attached.detach())
            }));
            info!("Team refresh for week {} finished: {:?}", week_id, settled);

            print_select("absent_team", &absent.borrow());
            print_select("drawn_team", &drawn.borrow());
        }
    }
}

// a date missing from the feed is not a failure
fn weather_exit_code(result: &Result<Result<ForecastSummary, WidgetError>, ()>) -> i32 {
    match result {
        Ok(Ok(_)) | Ok(Err(WidgetError::NotFound { .. })) => 0,
        Ok(Err(WidgetError::TransportFailure { .. })) | Err(()) => 2,
    }
}

fn preselected(value: Option<String>) -> SelectBox {
    match value {
        Some(value) => SelectBox::with_options(vec![SelectOption::new(&value, &value)], Some(value.as_str())),
        None => SelectBox::new(),
    }
}

fn print_select(name: &str, select: &SelectBox) {
    println!("{} (selected: {})", name, select.value().unwrap_or_default());
    for option in select.options() {
        println!("  [{}] {}", option.value, option.label);
    }
}

#[cfg(test)]
mod main_test {
    use super::*;
    use league_widgets::app::codes;

    #[test]
    fn test_weather_exit_code_flags_transport_failure() {
        let failed = Ok(Err(WidgetError::TransportFailure { reason: String::from("HTTP error! status: 503") }));

        assert_eq!(weather_exit_code(&failed), 2);
        assert_eq!(weather_exit_code(&Err(())), 2);
    }

    #[test]
    fn test_weather_exit_code_accepts_rendered_panels() {
        let rendered = Ok(Ok(ForecastSummary {
            date: String::from("2019-03-05"),
            max_temp: 68,
            min_temp: 51,
            weather: codes::describe(Some(63)),
            precipitation: 0.0,
        }));
        let missing = Ok(Err(WidgetError::NotFound { date: String::from("2019-03-12") }));

        assert_eq!(weather_exit_code(&rendered), 0);
        assert_eq!(weather_exit_code(&missing), 0);
    }
}
