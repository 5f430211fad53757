use std::path::PathBuf;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

pub use common::config::ApiAppConfig;

/// Where the signed-in session is kept.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct SessionConfig {
    /// Session file. Default: `<config dir>/fellowship/session.toml`.
    #[serde(default)]
    pub file: Option<PathBuf>,
}

/// Console configuration.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiAppConfig,
    #[serde(default)]
    pub session: SessionConfig,
}

impl AppConfig {
    /// Layer defaults, the config file (optional) and `FELLOWSHIP__*` variables.
    pub fn load(path: Option<&str>) -> Result<Self, ConfigError> {
        let config_path = path
            .map(str::to_string)
            .or_else(|| std::env::var("FELLOWSHIP_CONFIG").ok())
            .unwrap_or_else(|| "config/fellowship".to_string());

        let defaults = ApiAppConfig::default();
        let s = Config::builder()
            .set_default("api.base_url", defaults.base_url)?
            .set_default("api.timeout_secs", defaults.timeout_secs as i64)?
            .set_default("api.per_page", defaults.per_page as i64)?
            .add_source(File::with_name(&config_path).required(false))
            .add_source(Environment::with_prefix("FELLOWSHIP").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
