//! # otd-config
//!
//! Layered configuration for the on-this-day photo archive, built on figment.
//!
//! Sources, highest priority first:
//! 1. Environment variables (`OTD_*` prefix, `__` between section and key)
//! 2. Project-level `.otd/config.toml`
//! 3. User-level `~/.config/otd/config.toml`
//! 4. Built-in defaults
//!
//! `OTD_CAPTION__API_KEY` maps to `caption.api_key`, `OTD_CATALOG__PAGE_SIZE`
//! to `catalog.page_size`. When `caption.api_key` is still empty after
//! layering, the unprefixed `API_KEY` and then `GEMINI_API_KEY` are tried.
//!
//! ```no_run
//! use otd_config::OtdConfig;
//!
//! let config = OtdConfig::load_with_dotenv().expect("config");
//! if !config.caption.is_configured() {
//!     eprintln!("captions will fail without an API key");
//! }
//! ```

mod caption;
mod catalog;
mod error;
mod general;

pub use caption::{API_KEY_FALLBACK_VARS, CaptionConfig};
pub use catalog::{CatalogConfig, MAX_PAGE_SIZE};
pub use error::ConfigError;
pub use general::GeneralConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Prefix for environment overrides.
pub const ENV_PREFIX: &str = "OTD_";

/// Project-local config file, relative to the working directory.
pub const LOCAL_CONFIG_PATH: &str = ".otd/config.toml";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct OtdConfig {
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub caption: CaptionConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl OtdConfig {
    /// Load configuration from TOML files and environment variables.
    ///
    /// Does not read `.env`; see [`load_with_dotenv`](Self::load_with_dotenv).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] when a source fails to parse and
    /// [`ConfigError::InvalidValue`] when a value is out of range.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config: Self = Self::figment().extract()?;
        config.caption.fill_api_key_from_env();
        config.validate()?;
        Ok(config)
    }

    /// Load `.env` first, then [`load`](Self::load).
    ///
    /// # Errors
    ///
    /// Same as [`load`](Self::load).
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        Self::load_dotenv();
        Self::load()
    }

    /// Build the provider chain.
    ///
    /// Public so tests can inspect it or layer providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = PathBuf::from(LOCAL_CONFIG_PATH);
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Check cross-field constraints after extraction.
    ///
    /// # Errors
    ///
    /// Returns the first invalid value found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.catalog.validate()
    }

    /// Path to the user-global config file.
    #[must_use]
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("otd").join("config.toml"))
    }

    /// Load `.env` from the working directory or a parent. A missing or
    /// malformed file is ignored.
    fn load_dotenv() {
        let _ = dotenvy::dotenv();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = OtdConfig::default();
        assert!(config.catalog.is_configured());
        assert!(!config.caption.is_configured());
        assert_eq!(config.general.default_format, "json");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn figment_builds_without_files() {
        figment::Jail::expect_with(|_jail| {
            let config: OtdConfig = OtdConfig::figment().extract()?;
            assert_eq!(config.catalog.page_size, 500);
            assert_eq!(config.caption.model, "gemini-2.5-flash");
            Ok(())
        });
    }
}
