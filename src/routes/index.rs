use chrono::Utc;
use log::{error, info, warn};
// rocket imports
use rocket::form::Form;
use rocket::http::Status;
use rocket::{get, post, FromForm, State};
use rocket_dyn_templates::Template;

use crate::config::{SEASON, SESSION_NAME};
use crate::macros::provider_error_handler::provider_handle_error_http;
use crate::modules::helpers::event::EventHelper;
use crate::modules::helpers::results::ResultsHelper;
use crate::modules::provider::SessionProvider;
use crate::{TemplateDataError, TemplateDataWeekend};

pub const NOT_A_RACE_MESSAGE: &str = "The selected event is not a race.";
pub const NO_DATA_MESSAGE: &str = "No data available for this race.";

/// a value that is not a round number is treated as missing
#[derive(FromForm, Debug)]
pub struct GpSelectionForm {
    pub selected_gp: Option<u32>,
}

#[get("/")]
pub async fn index(provider: &State<Box<dyn SessionProvider>>) -> Result<Template, Status> {
    render_weekend(provider.inner().as_ref(), None).await
}

#[post("/", data = "<selection>")]
pub async fn select(
    selection: Form<GpSelectionForm>,
    provider: &State<Box<dyn SessionProvider>>,
) -> Result<Template, Status> {
    render_weekend(provider.inner().as_ref(), selection.into_inner().selected_gp).await
}

/// posts without a form body show the default round
#[post("/", rank = 2)]
pub async fn select_default(provider: &State<Box<dyn SessionProvider>>) -> Result<Template, Status> {
    render_weekend(provider.inner().as_ref(), None).await
}

/// # render the weekend page of a round
/// falls back to the second event of the schedule when no round is selected
async fn render_weekend(provider: &dyn SessionProvider, selected_gp: Option<u32>) -> Result<Template, Status> {
    let schedule = provider_handle_error_http!(
        provider.schedule(SEASON).await,
        "routes/index:render_weekend",
        "schedule"
    );
    let gps = EventHelper::build_event_list(&schedule, Utc::now());

    let selected_gp = match selected_gp {
        Some(round) => round,
        None => provider_handle_error_http!(
            EventHelper::default_round(SEASON, &gps),
            "routes/index:render_weekend",
            "default round"
        ),
    };

    let results = match provider.race_results(SEASON, selected_gp).await {
        Ok(results) => results,
        Err(error) if error.is_testing() => {
            info!(target: "routes/index:render_weekend", "round {} is not a race: {}", selected_gp, error);
            return Ok(render_error(NOT_A_RACE_MESSAGE));
        }
        Err(error) => {
            error!(target: "routes/index:render_weekend", "Error getting {} results of round {}. (error: {})", SESSION_NAME, selected_gp, error);
            return Err(Status::InternalServerError);
        }
    };

    let starting_grid = ResultsHelper::starting_grid(&results.results);
    let final_standings = ResultsHelper::final_standings(&results.results);

    if starting_grid.is_empty() || final_standings.is_empty() {
        warn!(target: "routes/index:render_weekend", "Starting grid or final standings are empty (round: {})", selected_gp);
        return Ok(render_error(NO_DATA_MESSAGE));
    }

    Ok(Template::render(
        "index",
        TemplateDataWeekend {
            season: SEASON,
            gps,
            selected_gp,
            starting_grid,
            final_standings,
            fastest_lap: results.fastest_lap,
        },
    ))
}

fn render_error(message: &str) -> Template {
    Template::render("error", TemplateDataError { message: message.to_string() })
}
