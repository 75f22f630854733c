use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EventFormat {
    Conventional,
    Sprint,
    Testing,
}

/// # an event of the season schedule as the provider returns it
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ScheduledEvent {
    pub name: String,
    pub round: u32,
    pub location: String,
    pub format: EventFormat,
    /// start of the race session, always in utc
    pub race_start: DateTime<Utc>,
}

/// # an entry of the event list shown in the page
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Event {
    pub name: String,
    pub round: u32,
    pub location: String,
    pub race_start: DateTime<Utc>,
    pub has_happened: bool,
}

impl Event {
    /// # build the event list entry for a scheduled event
    ///
    /// ## Arguments
    /// * `event` - the event from the schedule
    /// * `now` - the current utc instant
    ///
    /// ## Returns
    /// * `Event` - the event, `has_happened` is set when the race started strictly before `now`
    pub fn from_scheduled(event: &ScheduledEvent, now: DateTime<Utc>) -> Event {
        Event {
            name: event.name.clone(),
            round: event.round,
            location: event.location.clone(),
            race_start: event.race_start,
            has_happened: event.race_start < now,
        }
    }
}
