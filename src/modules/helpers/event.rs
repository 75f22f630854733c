use chrono::{DateTime, Utc};

use crate::errors::{CustomResult, Error};
use crate::modules::models::event::{Event, ScheduledEvent};

pub struct EventHelper {}

impl EventHelper {
    /// # build the event list of the page
    ///
    /// ## Arguments
    /// * `schedule` - the events of the season in schedule order
    /// * `now` - the current utc instant
    pub fn build_event_list(schedule: &[ScheduledEvent], now: DateTime<Utc>) -> Vec<Event> {
        schedule
            .iter()
            .map(|event| Event::from_scheduled(event, now))
            .collect()
    }

    /// # the round selected when the visitor did not pick one
    /// this is the second entry of the schedule
    pub fn default_round(season: i32, events: &[Event]) -> CustomResult<u32> {
        events
            .get(1)
            .map(|e| e.round)
            .ok_or(Error::ScheduleTooShort { season, len: events.len() })
    }
}
