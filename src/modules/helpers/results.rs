use crate::modules::models::results::{DriverResult, GridRow, StandingRow};

pub struct ResultsHelper {}

impl ResultsHelper {
    /// # starting grid of a race
    /// ordered by grid position, pit lane starters (position 0) go last
    pub fn starting_grid(results: &[DriverResult]) -> Vec<GridRow> {
        let mut grid: Vec<GridRow> = results
            .iter()
            .map(|r| GridRow {
                grid_position: r.grid_position,
                driver_number: r.driver_number.clone(),
                abbreviation: r.abbreviation.clone(),
                team_name: r.team_name.clone(),
            })
            .collect();

        grid.sort_by_key(|row| (row.grid_position == 0, row.grid_position));
        grid
    }

    /// # final standings of a race, in classification order
    pub fn final_standings(results: &[DriverResult]) -> Vec<StandingRow> {
        results
            .iter()
            .map(|r| StandingRow {
                classified_position: r.classified_position.clone(),
                driver_number: r.driver_number.clone(),
                abbreviation: r.abbreviation.clone(),
                team_name: r.team_name.clone(),
                points: r.points,
            })
            .collect()
    }
}
