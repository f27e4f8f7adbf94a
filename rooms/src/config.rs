use crate::error::{Result, RoomsError};
use log::LevelFilter;
use rand::SeedableRng;
use rand_pcg::Pcg64;
use std::env;

pub const LOG_VAR: &str = "ROOMS_LOG";
pub const SEED_VAR: &str = "ROOMS_SEED";

/// Settings shared by both binaries, read from the environment since neither takes arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub log_level: LevelFilter,
    pub seed: Option<u64>,
    /// `ROOMS_LOG` value that was not a level, reported once logging is up.
    pub ignored_log_level: Option<String>,
}
impl Default for Config {
    fn default() -> Self {
        Config {
            log_level: LevelFilter::Warn,
            seed: None,
            ignored_log_level: None,
        }
    }
}
impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_vars(env::var(LOG_VAR).ok(), env::var(SEED_VAR).ok())
    }

    /// An unknown log level falls back to the default, a bad seed is an error.
    pub fn from_vars(log: Option<String>, seed: Option<String>) -> Result<Self> {
        let mut config = Config::default();
        if let Some(level) = log {
            match level.trim().parse() {
                Ok(level) => config.log_level = level,
                Err(_) => config.ignored_log_level = Some(level),
            }
        }
        if let Some(seed) = seed {
            config.seed = Some(seed.trim().parse().map_err(|e| RoomsError::Config {
                key: SEED_VAR,
                value: seed.clone(),
                message: format!("{}", e),
            })?);
        }
        Ok(config)
    }

    pub fn rng(&self) -> Pcg64 {
        match self.seed {
            Some(seed) => Pcg64::seed_from_u64(seed),
            None => Pcg64::from_entropy(),
        }
    }
}
