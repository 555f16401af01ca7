//! # fit-config
//!
//! Layered configuration loading for fitgen using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`FITGEN_*` prefix, `__` as separator)
//! 2. Project-level `.fitgen/config.toml`
//! 3. User-level `~/.config/fitgen/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `FITGEN_MODEL__API_KEY` -> `model.api_key`,
//! `FITGEN_DATABASE__PATH` -> `database.path`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use fit_config::FitConfig;
//!
//! let config = FitConfig::load_with_dotenv().expect("config");
//! if config.model.is_configured() {
//!     println!("model: {}", config.model.model);
//! }
//! ```

mod database;
mod error;
mod model;

pub use database::DatabaseConfig;
pub use error::ConfigError;
pub use model::ModelConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct FitConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub model: ModelConfig,
}

impl FitConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] if you need
    /// `.env` file loading.
    pub fn load() -> Result<Self, ConfigError> {
        Self::figment().extract().map_err(ConfigError::from)
    }

    /// Load configuration with `.env` file support.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment or layer providers on top.
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        let local_path = PathBuf::from(".fitgen/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed("FITGEN_").split("__"))
    }

    /// Return the model section, or `NotConfigured` if it cannot make requests.
    pub fn require_model(&self) -> Result<&ModelConfig, ConfigError> {
        if self.model.is_configured() {
            Ok(&self.model)
        } else {
            Err(ConfigError::NotConfigured {
                section: "model".into(),
            })
        }
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("fitgen").join("config.toml"))
    }
}
