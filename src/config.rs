use std::env;
use std::net::{IpAddr, Ipv4Addr};

use dotenvy::dotenv;
use rocket::figment::Figment;

use crate::errors::{CustomResult, Error};
use crate::modules::f1_api::DEFAULT_API_URL;

/// the season shown by the application
pub const SEASON: i32 = 2025;
/// the only session type shown
pub const SESSION_NAME: &str = "Race";

/// # process configuration
/// loaded once at startup from the environment, a `.env` file is read first when present
///
/// - `PORT` - port to listen on (default `5000`)
/// - `CACHE_DIR` - directory the api responses are cached in (default `cache`)
/// - `F1_API_URL` - base url of the ergast compatible api
/// - `LOGGING_LEVEL` - `OFF`, `ERROR`, `WARN`, `INFO`, `DEBUG` or `TRACE` (default `INFO`)
/// - `LOG_FILE` - file the log is written to (default `program.log`)
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub port: u16,
    pub cache_dir: String,
    pub api_url: String,
    pub logging_level: String,
    pub log_file: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            port: 5000,
            cache_dir: "cache".to_string(),
            api_url: DEFAULT_API_URL.to_string(),
            logging_level: "INFO".to_string(),
            log_file: "program.log".to_string(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> CustomResult<AppConfig> {
        dotenv().ok();
        AppConfig::from_lookup(|key| env::var(key).ok())
    }

    /// # build the configuration from a key lookup
    /// unset keys fall back to the defaults
    pub fn from_lookup<F: Fn(&str) -> Option<String>>(lookup: F) -> CustomResult<AppConfig> {
        let defaults = AppConfig::default();

        let port = match lookup("PORT") {
            Some(port) => port
                .trim()
                .parse()
                .map_err(|_| Error::InvalidField { field: "PORT", value: port })?,
            None => defaults.port,
        };

        Ok(AppConfig {
            port,
            cache_dir: lookup("CACHE_DIR").unwrap_or(defaults.cache_dir),
            api_url: lookup("F1_API_URL").unwrap_or(defaults.api_url),
            logging_level: lookup("LOGGING_LEVEL").unwrap_or(defaults.logging_level),
            log_file: lookup("LOG_FILE").unwrap_or(defaults.log_file),
        })
    }

    /// rocket configuration listening on all interfaces
    pub fn figment(&self) -> Figment {
        rocket::Config::figment()
            .merge(("address", IpAddr::V4(Ipv4Addr::UNSPECIFIED)))
            .merge(("port", self.port))
    }
}
