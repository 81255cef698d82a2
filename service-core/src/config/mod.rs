//! Environment-driven settings loading.
//!
//! Variables are read without a prefix and lower-cased, so `PORT` fills a
//! `port` field. Empty variables count as unset and fall back to the
//! settings type's serde defaults.

use crate::error::AppError;
use config::{Config as Cfg, Environment, Map};
use serde::de::DeserializeOwned;

/// Load settings from the process environment, after reading an optional `.env` file.
pub fn load<T: DeserializeOwned>() -> Result<T, AppError> {
    dotenvy::dotenv().ok();

    let vars = std::env::vars_os()
        .filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?)));

    from_vars(vars)
}

/// Load settings from an explicit list of variables.
pub fn from_vars<T, I, K, V>(vars: I) -> Result<T, AppError>
where
    T: DeserializeOwned,
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    let source: Map<String, String> = vars
        .into_iter()
        .map(|(key, value)| (key.into(), value.into()))
        .collect();

    let config = Cfg::builder()
        .add_source(Environment::default().ignore_empty(true).source(Some(source)))
        .build()?;

    Ok(config.try_deserialize()?)
}
