//! # tuled-config
//!
//! Layered configuration loading for tuled using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`TULED_*` prefix, `__` as separator)
//! 2. Project-level `.tuled/config.toml`
//! 3. User-level `~/.config/tuled/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! `TULED_FILTER__RATIO_THRESHOLD` -> `filter.ratio_threshold`,
//! `TULED_CALIBRATION__REFERENCE_YEAR` -> `calibration.reference_year`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use tuled_config::TuledConfig;
//!
//! let config = TuledConfig::load_with_dotenv().expect("config");
//! println!("ratio threshold: {}", config.filter.ratio_threshold);
//! ```

mod beastling;
mod calibration;
mod error;
mod filter;
mod nexus;
mod paths;

pub use beastling::BeastlingConfig;
pub use calibration::CalibrationConfig;
pub use error::ConfigError;
pub use filter::FilterConfig;
pub use nexus::NexusConfig;
pub use paths::PathsConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct TuledConfig {
    #[serde(default)]
    pub filter: FilterConfig,
    #[serde(default)]
    pub calibration: CalibrationConfig,
    #[serde(default)]
    pub nexus: NexusConfig,
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub beastling: BeastlingConfig,
}

impl TuledConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] if you need `.env` file loading.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] when a source cannot be read or
    /// extracted, and [`ConfigError::InvalidValue`] when validation fails.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Load configuration with an explicit TOML file layered above the
    /// project-local one and below environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingFile`] when `path` is not a file, and
    /// otherwise the same errors as [`Self::load`].
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.is_file() {
            return Err(ConfigError::MissingFile {
                path: path.to_path_buf(),
            });
        }

        let _ = dotenvy::dotenv();
        let config: Self = Self::base_figment()
            .merge(Toml::file(path))
            .merge(Self::env_provider())
            .extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment directly or add providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        Self::base_figment().merge(Self::env_provider())
    }

    /// Defaults plus the user-global and project-local TOML files.
    fn base_figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = PathBuf::from(".tuled/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment
    }

    fn env_provider() -> Env {
        Env::prefixed("TULED_").split("__")
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("tuled").join("config.toml"))
    }

    /// Reject values that would make a run meaningless.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let finite = [
            ("filter.ratio_threshold", self.filter.ratio_threshold),
            ("filter.coverage_threshold", self.filter.coverage_threshold),
            ("calibration.reference_year", self.calibration.reference_year),
            ("calibration.min_age", self.calibration.min_age),
        ];
        for (field, value) in finite {
            if !value.is_finite() {
                return Err(ConfigError::InvalidValue {
                    field: field.to_string(),
                    reason: format!("expected a finite number, got {value}"),
                });
            }
        }

        for (field, name) in [
            ("paths.datafile", &self.paths.datafile),
            ("paths.calibration_file", &self.paths.calibration_file),
        ] {
            if name.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: field.to_string(),
                    reason: "file name is empty".to_string(),
                });
            }
        }

        if self.beastling.program.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "beastling.program".to_string(),
                reason: "program is empty".to_string(),
            });
        }

        Ok(())
    }
}
