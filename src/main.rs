use log::info;
use rocket::{launch, Build, Rocket};

use f1_race_weekend::build_rocket;
use f1_race_weekend::config::AppConfig;
use f1_race_weekend::modules::cache::ResponseCache;
use f1_race_weekend::modules::f1_api::JolpicaProvider;
use f1_race_weekend::modules::helpers::logging::setup_logging;

#[launch]
async fn rocket() -> Rocket<Build> {
    let config = AppConfig::from_env().expect("Failed to read configuration");
    setup_logging(&config).expect("Failed to setup logging");

    // the provider keeps its downloaded responses in here
    let cache = ResponseCache::enable(&config.cache_dir)
        .await
        .expect("Failed to create cache directory");
    info!(target: "main", "api responses are cached in {}", cache.dir().display());

    let provider = JolpicaProvider::new(&config.api_url, Some(cache))
        .expect("Failed to create api client");

    build_rocket(config.figment(), Box::new(provider))
}
