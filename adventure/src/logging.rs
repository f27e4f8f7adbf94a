use log::*;
use rooms::config::{Config, LOG_VAR};
use simple_logger::SimpleLogger;

/// Both binaries share stdout with the player, so anything below the configured level stays quiet.
pub fn init(config: &Config) -> anyhow::Result<()> {
    SimpleLogger::new().with_level(config.log_level).init()?;
    if let Some(value) = &config.ignored_log_level {
        warn!("ignoring {}={:?}", LOG_VAR, value);
    }
    Ok(())
}
