use serde::{Deserialize, Serialize};

/// # classification of one driver in a race
/// a row of the results table the provider returns, the starting grid and final standings are
/// both views on this table
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DriverResult {
    pub driver_number: String,
    pub abbreviation: String,
    pub team_name: String,
    /// 0 for a pit lane start
    pub grid_position: i32,
    /// finishing position, or a letter for drivers that were not classified
    pub classified_position: String,
    pub points: i32,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct FastestLap {
    pub driver_number: String,
    pub abbreviation: String,
    pub team_name: String,
    pub lap_number: u32,
    pub lap_time_ms: u64,
    pub average_speed_kph: Option<f64>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct RaceResults {
    pub results: Vec<DriverResult>,
    pub fastest_lap: Option<FastestLap>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct GridRow {
    pub grid_position: i32,
    pub driver_number: String,
    pub abbreviation: String,
    pub team_name: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct StandingRow {
    pub classified_position: String,
    pub driver_number: String,
    pub abbreviation: String,
    pub team_name: String,
    pub points: i32,
}
