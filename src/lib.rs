use rocket::figment::Figment;
use rocket::fs::{relative, FileServer};
use rocket::{routes, Build, Rocket};
use rocket_dyn_templates::Template;
use serde::{Deserialize, Serialize};

use crate::modules::helpers::handelbars::format_date::FormatDateHelper;
use crate::modules::helpers::handelbars::format_lap_time::FormatLapTime;
use crate::modules::helpers::handelbars::format_position::FormatPosition;
use crate::modules::models::event::Event;
use crate::modules::models::results::{FastestLap, GridRow, StandingRow};
use crate::modules::provider::SessionProvider;

pub mod config;
pub mod errors;
pub mod modules;
pub mod macros {
    pub mod provider_error_handler;
}
pub mod routes {
    pub mod index;
}

#[derive(Clone, Serialize, PartialEq, Deserialize, Debug)]
pub struct TemplateDataWeekend {
    pub season: i32,
    pub gps: Vec<Event>,
    pub selected_gp: u32,
    pub starting_grid: Vec<GridRow>,
    pub final_standings: Vec<StandingRow>,
    pub fastest_lap: Option<FastestLap>,
}

#[derive(Clone, Serialize, PartialEq, Deserialize, Debug)]
pub struct TemplateDataError {
    pub message: String,
}

/// # build the webserver
///
/// ## Arguments
/// * `figment` - the rocket configuration
/// * `provider` - where the schedule and results come from
pub fn build_rocket(figment: Figment, provider: Box<dyn SessionProvider>) -> Rocket<Build> {
    rocket::custom(figment)
        .attach(Template::custom(|engines| {
            engines.handlebars.register_helper("formatDate", Box::new(FormatDateHelper));
            engines.handlebars.register_helper("formatLapTime", Box::new(FormatLapTime));
            engines.handlebars.register_helper("formatPosition", Box::new(FormatPosition));
            engines.handlebars.set_strict_mode(true);
        }))
        .manage(provider)
        .mount("/", routes![
            routes::index::index,
            routes::index::select,
            routes::index::select_default,
        ])
        .mount("/static", FileServer::from(relative!("static")))
}
