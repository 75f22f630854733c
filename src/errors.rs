use snafu::Snafu;

pub type CustomResult<T> = Result<T, Error>;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    #[snafu(display("request to {url} failed: {source}"))]
    Request { url: String, source: reqwest::Error },

    #[snafu(display("could not decode response of {url}: {source}"))]
    Decode {
        url: String,
        source: serde_json::Error,
    },

    #[snafu(display("field {field} has invalid value {value:?}"))]
    InvalidField { field: &'static str, value: String },

    /// the selected round is a testing event and has no race session
    #[snafu(display("Cannot get testing event by round number! (round: {round})"))]
    TestingEvent { round: u32 },

    #[snafu(display("round {round} is not part of the {season} schedule"))]
    UnknownRound { season: i32, round: u32 },

    #[snafu(display("schedule of {season} has {len} events, at least 2 are needed"))]
    ScheduleTooShort { season: i32, len: usize },

    #[snafu(display("cache error at {path}: {source}"))]
    Cache {
        path: String,
        source: std::io::Error,
    },
}

impl Error {
    /// a non-race (testing) session was requested
    pub fn is_testing(&self) -> bool {
        matches!(self, Error::TestingEvent { .. })
    }
}
