use fern::Dispatch;

use crate::config::AppConfig;

pub fn level_from_str(verbosity: &str) -> log::LevelFilter {
    match verbosity.to_uppercase().as_str() {
        "OFF" => log::LevelFilter::Off,
        "ERROR" => log::LevelFilter::Error,
        "WARN" => log::LevelFilter::Warn,
        "DEBUG" => log::LevelFilter::Debug,
        "TRACE" => log::LevelFilter::Trace,
        // default to info
        _ => log::LevelFilter::Info,
    }
}

pub fn setup_logging(config: &AppConfig) -> Result<(), fern::InitError> {
    let base_config = Dispatch::new()
        .level(level_from_str(&config.logging_level))
        // rocket logs every request on its own targets, keep those quiet
        .level_for("rocket", log::LevelFilter::Warn)
        .level_for("_", log::LevelFilter::Warn)
        .format(|out, message, record| {
            out.finish(format_args!(
                "{} [{}][{}] {}",
                chrono::Local::now().format("[%Y-%m-%d][%H:%M:%S]"),
                record.target(),
                record.level(),
                message
            ))
        });

    let file_logger_config = Dispatch::new().chain(fern::log_file(&config.log_file)?);

    base_config
        .chain(std::io::stdout())
        .chain(file_logger_config)
        .apply()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_levels() {
        assert_eq!(level_from_str("OFF"), log::LevelFilter::Off);
        assert_eq!(level_from_str("warn"), log::LevelFilter::Warn);
        assert_eq!(level_from_str("TRACE"), log::LevelFilter::Trace);
        assert_eq!(level_from_str("whatever"), log::LevelFilter::Info);
    }
}
