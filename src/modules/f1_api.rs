use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use log::{debug, info, warn};
use serde::Deserialize;
use snafu::ResultExt;

use crate::errors::{CustomResult, DecodeSnafu, Error, RequestSnafu};
use crate::modules::cache::ResponseCache;
use crate::modules::helpers::math::Math;
use crate::modules::models::event::{EventFormat, ScheduledEvent};
use crate::modules::models::results::{DriverResult, FastestLap, RaceResults};
use crate::modules::provider::SessionProvider;

pub const DEFAULT_API_URL: &str = "https://api.jolpi.ca/ergast/f1";

/// schedules change during the season (postponed races, time changes)
const SCHEDULE_MAX_AGE: Duration = Duration::from_secs(12 * 60 * 60);

/// # provider backed by the jolpica f1 api
/// the api is ergast compatible. responses are kept in a [`ResponseCache`] when one is given.
pub struct JolpicaProvider {
    client: reqwest::Client,
    base_url: String,
    cache: Option<ResponseCache>,
}

impl JolpicaProvider {
    pub fn new(base_url: &str, cache: Option<ResponseCache>) -> CustomResult<JolpicaProvider> {
        let client = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .context(RequestSnafu { url: base_url.to_string() })?;

        Ok(JolpicaProvider {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            cache,
        })
    }

    /// # get a response body, from the cache when possible
    ///
    /// ## Returns
    /// * `(String, bool)` - the body and whether it came from the cache
    async fn fetch(&self, season: i32, key: &str, url: &str, max_age: Option<Duration>) -> CustomResult<(String, bool)> {
        if let Some(cache) = &self.cache {
            match cache.get_data(season, key, max_age).await {
                Ok(Some(body)) => {
                    debug!(target: "f1_api:fetch", "cache hit for {}", url);
                    return Ok((body, true));
                }
                Ok(None) => {}
                Err(error) => {
                    warn!(target: "f1_api:fetch", "failed reading cache, using api. (error: {})", error);
                }
            }
        }

        info!(target: "f1_api:fetch", "Getting {} from api", url);
        let body = self
            .client
            .get(url)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .context(RequestSnafu { url })?
            .text()
            .await
            .context(RequestSnafu { url })?;

        Ok((body, false))
    }

    async fn store(&self, season: i32, key: &str, body: &str) {
        if let Some(cache) = &self.cache {
            if let Err(error) = cache.set_data(season, key, body).await {
                warn!(target: "f1_api:store", "failed writing cache. (error: {})", error);
            }
        }
    }
}

#[async_trait]
impl SessionProvider for JolpicaProvider {
    async fn schedule(&self, season: i32) -> CustomResult<Vec<ScheduledEvent>> {
        let url = format!("{}/{season}.json?limit=100", self.base_url);
        let (body, cached) = self.fetch(season, "schedule", &url, Some(SCHEDULE_MAX_AGE)).await?;

        let events = schedule_from_response(&body, &url)?;
        if !cached {
            self.store(season, "schedule", &body).await;
        }

        Ok(events)
    }

    async fn race_results(&self, season: i32, round: u32) -> CustomResult<RaceResults> {
        // round 0 is reserved for pre-season testing
        if round == 0 {
            return Err(Error::TestingEvent { round });
        }

        let event = self
            .schedule(season)
            .await?
            .into_iter()
            .find(|e| e.round == round)
            .ok_or(Error::UnknownRound { season, round })?;
        if event.format == EventFormat::Testing {
            return Err(Error::TestingEvent { round });
        }

        let key = format!("results-{round}");
        let url = format!("{}/{season}/{round}/results.json?limit=100", self.base_url);
        let (body, cached) = self.fetch(season, &key, &url, None).await?;

        match results_from_response(&body, &url)? {
            Some(results) => {
                if !cached && !results.results.is_empty() {
                    self.store(season, &key, &body).await;
                }
                Ok(results)
            }
            None => {
                info!(target: "f1_api:race_results", "no results yet for round {} of {}", round, season);
                Ok(RaceResults::default())
            }
        }
    }
}

/// # decode a schedule response
pub fn schedule_from_response(body: &str, url: &str) -> CustomResult<Vec<ScheduledEvent>> {
    let response: ApiResponse = serde_json::from_str(body).context(DecodeSnafu { url })?;

    response
        .mr_data
        .race_table
        .races
        .into_iter()
        .map(|race| -> CustomResult<ScheduledEvent> {
            Ok(ScheduledEvent {
                round: parse_round(&race.round)?,
                race_start: parse_race_start(&race.date, race.time.as_deref())?,
                format: if race.sprint.is_some() { EventFormat::Sprint } else { EventFormat::Conventional },
                location: race.circuit.location.locality,
                name: race.race_name,
            })
        })
        .collect()
}

/// # decode a results response
///
/// ## Returns
/// * `Option<RaceResults>` - `None` when the race has no results (yet)
pub fn results_from_response(body: &str, url: &str) -> CustomResult<Option<RaceResults>> {
    let response: ApiResponse = serde_json::from_str(body).context(DecodeSnafu { url })?;

    let race = match response.mr_data.race_table.races.into_iter().next() {
        Some(race) => race,
        None => return Ok(None),
    };

    let mut results = Vec::with_capacity(race.results.len());
    let mut fastest_candidates = Vec::new();

    for result in race.results {
        let abbreviation = abbreviation_of(&result.driver);
        let row = DriverResult {
            driver_number: result.number.clone(),
            abbreviation,
            team_name: result.constructor.name.clone(),
            grid_position: Math::parse_whole_number("grid", &result.grid)?,
            classified_position: classified_position(&result.position_text),
            points: Math::parse_whole_number("points", &result.points)?,
        };

        if let Some(lap) = &result.fastest_lap {
            let lap_time_ms = Math::parse_lap_time_ms(&lap.time.time)?;
            let lap_number: u32 = lap
                .lap
                .parse()
                .map_err(|_| Error::InvalidField { field: "lap", value: lap.lap.clone() })?;
            let average_speed_kph = lap.average_speed.as_ref().and_then(|s| s.speed.parse().ok());

            fastest_candidates.push((
                lap.rank.as_deref() == Some("1"),
                FastestLap {
                    driver_number: row.driver_number.clone(),
                    abbreviation: row.abbreviation.clone(),
                    team_name: row.team_name.clone(),
                    lap_number,
                    lap_time_ms,
                    average_speed_kph,
                },
            ));
        }

        results.push(row);
    }

    let fastest_lap = match fastest_candidates.iter().position(|(ranked_first, _)| *ranked_first) {
        Some(i) => Some(fastest_candidates.swap_remove(i).1),
        None => fastest_candidates
            .into_iter()
            .map(|(_, lap)| lap)
            .min_by_key(|lap| lap.lap_time_ms),
    };

    Ok(Some(RaceResults { results, fastest_lap }))
}

fn parse_round(round: &str) -> CustomResult<u32> {
    round
        .parse()
        .map_err(|_| Error::InvalidField { field: "round", value: round.to_string() })
}

/// the api gives the date and the time of the race separately, the time is utc (`04:00:00Z`)
fn parse_race_start(date: &str, time: Option<&str>) -> CustomResult<DateTime<Utc>> {
    let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| Error::InvalidField { field: "date", value: date.to_string() })?;

    let time = match time {
        Some(t) => NaiveTime::parse_from_str(t.trim_end_matches('Z'), "%H:%M:%S")
            .map_err(|_| Error::InvalidField { field: "time", value: t.to_string() })?,
        None => NaiveTime::MIN,
    };

    Ok(date.and_time(time).and_utc())
}

fn abbreviation_of(driver: &ApiDriver) -> String {
    match &driver.code {
        Some(code) if !code.is_empty() => code.clone(),
        _ => driver.family_name.chars().filter(|c| c.is_alphabetic()).take(3).collect::<String>().to_uppercase(),
    }
}

/// the api uses `R`, `D`, `E`, `W`, `F` and `N` for drivers without a classified position
fn classified_position(position_text: &str) -> String {
    match position_text {
        "R" | "D" | "E" | "W" | "F" | "N" => position_text.to_string(),
        p if p.chars().all(|c| c.is_ascii_digit()) && !p.is_empty() => p.to_string(),
        _ => "N".to_string(),
    }
}

#[derive(Deserialize, Debug)]
struct ApiResponse {
    #[serde(rename = "MRData")]
    pub mr_data: MrData,
}

#[derive(Deserialize, Debug)]
struct MrData {
    #[serde(rename = "RaceTable")]
    pub race_table: RaceTable,
}

#[derive(Deserialize, Debug)]
struct RaceTable {
    #[serde(rename = "Races", default)]
    pub races: Vec<ApiRace>,
}

#[derive(Deserialize, Debug)]
struct ApiRace {
    pub round: String,
    #[serde(rename = "raceName")]
    pub race_name: String,
    #[serde(rename = "Circuit")]
    pub circuit: ApiCircuit,
    pub date: String,
    pub time: Option<String>,
    #[serde(rename = "Sprint")]
    pub sprint: Option<serde_json::Value>,
    #[serde(rename = "Results", default)]
    pub results: Vec<ApiResult>,
}

#[derive(Deserialize, Debug)]
struct ApiCircuit {
    #[serde(rename = "Location")]
    pub location: ApiLocation,
}

#[derive(Deserialize, Debug)]
struct ApiLocation {
    pub locality: String,
}

#[derive(Deserialize, Debug)]
struct ApiResult {
    pub number: String,
    #[serde(rename = "positionText")]
    pub position_text: String,
    pub points: String,
    pub grid: String,
    #[serde(rename = "Driver")]
    pub driver: ApiDriver,
    #[serde(rename = "Constructor")]
    pub constructor: ApiConstructor,
    #[serde(rename = "FastestLap")]
    pub fastest_lap: Option<ApiFastestLap>,
}

#[derive(Deserialize, Debug)]
struct ApiDriver {
    pub code: Option<String>,
    #[serde(rename = "familyName")]
    pub family_name: String,
}

#[derive(Deserialize, Debug)]
struct ApiConstructor {
    pub name: String,
}

#[derive(Deserialize, Debug)]
struct ApiFastestLap {
    pub rank: Option<String>,
    pub lap: String,
    #[serde(rename = "Time")]
    pub time: ApiTime,
    #[serde(rename = "AverageSpeed")]
    pub average_speed: Option<ApiSpeed>,
}

#[derive(Deserialize, Debug)]
struct ApiTime {
    pub time: String,
}

#[derive(Deserialize, Debug)]
struct ApiSpeed {
    pub speed: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const SCHEDULE: &str = r#"{"MRData": {"RaceTable": {"season": "2025", "Races": [
        {"season": "2025", "round": "1", "raceName": "Australian Grand Prix",
         "Circuit": {"circuitId": "albert_park", "circuitName": "Albert Park Grand Prix Circuit",
                     "Location": {"locality": "Melbourne", "country": "Australia"}},
         "date": "2025-03-16", "time": "04:00:00Z"},
        {"season": "2025", "round": "2", "raceName": "Chinese Grand Prix",
         "Circuit": {"circuitId": "shanghai", "circuitName": "Shanghai International Circuit",
                     "Location": {"locality": "Shanghai", "country": "China"}},
         "date": "2025-03-23", "time": "07:00:00Z",
         "Sprint": {"date": "2025-03-22", "time": "03:00:00Z"}}
    ]}}}"#;

    const RESULTS: &str = r#"{"MRData": {"RaceTable": {"season": "2025", "round": "1", "Races": [
        {"season": "2025", "round": "1", "raceName": "Australian Grand Prix",
         "Circuit": {"Location": {"locality": "Melbourne"}},
         "date": "2025-03-16", "time": "04:00:00Z",
         "Results": [
            {"number": "4", "position": "1", "positionText": "1", "points": "25",
             "Driver": {"driverId": "norris", "code": "NOR", "familyName": "Norris"},
             "Constructor": {"name": "McLaren"}, "grid": "1", "status": "Finished",
             "FastestLap": {"rank": "1", "lap": "43", "Time": {"time": "1:22.167"},
                            "AverageSpeed": {"units": "kph", "speed": "232.171"}}},
            {"number": "1", "position": "2", "positionText": "2", "points": "18.0",
             "Driver": {"driverId": "max_verstappen", "code": "VER", "familyName": "Verstappen"},
             "Constructor": {"name": "Red Bull"}, "grid": "3", "status": "Finished",
             "FastestLap": {"rank": "2", "lap": "43", "Time": {"time": "1:22.499"}}},
            {"number": "30", "position": "20", "positionText": "R", "points": "0",
             "Driver": {"driverId": "lawson", "familyName": "Lawson"},
             "Constructor": {"name": "Red Bull"}, "grid": "0", "status": "Retired"}
         ]}
    ]}}}"#;

    #[test]
    fn decodes_schedule() {
        let events = schedule_from_response(SCHEDULE, "test").unwrap();

        assert_eq!(events.len(), 2);
        assert_eq!(events[0].name, "Australian Grand Prix");
        assert_eq!(events[0].round, 1);
        assert_eq!(events[0].location, "Melbourne");
        assert_eq!(events[0].format, EventFormat::Conventional);
        assert_eq!(events[0].race_start, Utc.with_ymd_and_hms(2025, 3, 16, 4, 0, 0).unwrap());
        assert_eq!(events[1].format, EventFormat::Sprint);
    }

    #[test]
    fn decodes_results() {
        let results = results_from_response(RESULTS, "test").unwrap().unwrap();

        assert_eq!(results.results.len(), 3);
        let first = &results.results[0];
        assert_eq!(first.driver_number, "4");
        assert_eq!(first.abbreviation, "NOR");
        assert_eq!(first.team_name, "McLaren");
        assert_eq!(first.grid_position, 1);
        assert_eq!(first.points, 25);
        assert_eq!(results.results[1].points, 18);

        let retired = &results.results[2];
        assert_eq!(retired.classified_position, "R");
        assert_eq!(retired.grid_position, 0);
        assert_eq!(retired.abbreviation, "LAW");

        let fastest = results.fastest_lap.unwrap();
        assert_eq!(fastest.abbreviation, "NOR");
        assert_eq!(fastest.lap_number, 43);
        assert_eq!(fastest.lap_time_ms, 82_167);
        assert_eq!(fastest.average_speed_kph, Some(232.171));
    }

    #[test]
    fn fastest_lap_falls_back_to_minimum_time() {
        let body = RESULTS.replace(r#""rank": "1""#, r#""rank": "5""#);
        let results = results_from_response(&body, "test").unwrap().unwrap();

        assert_eq!(results.fastest_lap.unwrap().abbreviation, "NOR");
    }

    #[test]
    fn race_without_results_is_none() {
        let body = r#"{"MRData": {"RaceTable": {"season": "2025", "round": "24", "Races": []}}}"#;
        assert_eq!(results_from_response(body, "test").unwrap(), None);
    }

    #[test]
    fn garbage_is_a_decode_error() {
        assert!(matches!(
            results_from_response("<html>", "test"),
            Err(Error::Decode { .. })
        ));
    }

    #[tokio::test]
    async fn round_zero_is_testing_without_request() {
        // nothing listens on this address, any request would fail with Error::Request
        let provider = JolpicaProvider::new("http://127.0.0.1:9", None).unwrap();

        let error = provider.race_results(2025, 0).await.unwrap_err();
        assert!(error.is_testing());
    }

    #[tokio::test]
    async fn cached_results_are_used() {
        let dir = std::env::temp_dir().join(format!("f1_race_weekend_api_{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        let cache = ResponseCache::enable(&dir).await.unwrap();
        cache.set_data(2025, "schedule", SCHEDULE).await.unwrap();
        cache.set_data(2025, "results-1", RESULTS).await.unwrap();

        let provider = JolpicaProvider::new("http://127.0.0.1:9", Some(cache)).unwrap();
        let results = provider.race_results(2025, 1).await.unwrap();
        assert_eq!(results.results.len(), 3);

        let error = provider.race_results(2025, 7).await.unwrap_err();
        assert!(matches!(error, Error::UnknownRound { round: 7, .. }));

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
