pub mod cache;
pub mod f1_api;
pub mod provider;

pub mod models {
    pub mod event;
    pub mod results;
}

pub mod helpers {
    pub mod event;
    pub mod results;

    pub mod logging;
    pub mod math;

    pub mod handelbars {
        pub mod format_date;
        pub mod format_lap_time;
        pub mod format_position;
    }
}
