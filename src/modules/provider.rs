use async_trait::async_trait;

use crate::errors::CustomResult;
use crate::modules::models::event::ScheduledEvent;
use crate::modules::models::results::RaceResults;

/// # source of schedule and session data
/// the request handler only talks to this trait, the production implementation is
/// [`JolpicaProvider`](crate::modules::f1_api::JolpicaProvider)
#[async_trait]
pub trait SessionProvider: Send + Sync {
    /// all events of the season, in schedule order
    async fn schedule(&self, season: i32) -> CustomResult<Vec<ScheduledEvent>>;

    /// results of the race session of a round
    ///
    /// ## Errors
    /// * `Error::TestingEvent` - the round is a testing event
    async fn race_results(&self, season: i32, round: u32) -> CustomResult<RaceResults>;
}
