use std::{env, fmt::Display, path::PathBuf, str::FromStr};

use tracing::info;

use crate::error::ConfigError;

pub const DEFAULT_PORT: &str = "8000";
pub const DEFAULT_REVIEWS_CSV: &str = "data/reviews.csv";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub port: u16,
    pub reviews_csv: PathBuf,
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            port: try_load(&lookup, "PORT", DEFAULT_PORT)?,
            reviews_csv: try_load(&lookup, "REVIEWS_CSV", DEFAULT_REVIEWS_CSV)?,
        })
    }
}

fn try_load<T, F>(lookup: &F, key: &'static str, default: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
    F: Fn(&str) -> Option<String>,
{
    let value = lookup(key).unwrap_or_else(|| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });

    value.parse().map_err(|e: T::Err| ConfigError {
        key,
        message: e.to_string(),
        value,
    })
}
