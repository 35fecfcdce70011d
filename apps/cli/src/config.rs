//! # Terminal Settings
//!
//! Tunables for the menus, loaded once at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`RETAIL_NEARBY_RADIUS`, `RETAIL_RECENT_LIMIT`, ...)
//! 2. Config file (`--config <file>`, or `retail.toml` in the working directory)
//! 3. Defaults (this file)
//!
//! `.env` files are read by `main` before any of this runs, so values set
//! there arrive as environment variables.
//!
//! ## Example `retail.toml`
//! ```toml
//! nearby_radius = 45.0
//! recent_limit = 10
//! column_width = 24
//! ```
//!
//! Database connection settings come from the command line (see
//! [`Args`](crate::args::Args)), not from here.

use std::path::Path;

use config::{Config, ConfigBuilder, Environment, File};
use config::builder::DefaultState;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default config file, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "retail.toml";

/// Prefix of the environment variables that override settings.
pub const ENV_PREFIX: &str = "RETAIL";

/// Menu settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Stores strictly closer than this are listed and orderable.
    /// Default: 30.0
    pub nearby_radius: f64,

    /// Rows shown by "recent orders" and "recent product updates".
    /// Default: 5
    pub recent_limit: i64,

    /// Rows shown by the popularity reports.
    /// Default: 5
    pub popular_limit: i64,

    /// Width every table cell is padded to.
    /// Default: 20
    pub column_width: usize,

    /// Apply embedded migrations on connect.
    /// Default: true
    pub run_migrations: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            nearby_radius: retail_core::DEFAULT_NEARBY_RADIUS,
            recent_limit: retail_core::DEFAULT_RECENT_LIMIT,
            popular_limit: retail_core::DEFAULT_POPULAR_LIMIT,
            column_width: 20,
            run_migrations: true,
        }
    }
}

impl Settings {
    /// Loads settings from the config file and environment.
    ///
    /// ## Arguments
    /// * `file` - Explicit config file. It must exist. Without one,
    ///   `retail.toml` is used if present.
    pub fn load(file: Option<&Path>) -> Result<Self, ConfigError> {
        let file_source = match file {
            Some(path) => File::from(path).required(true),
            None => File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        Self::build(Config::builder().add_source(file_source), environment())
    }

    /// Layers `env` over `builder`, deserializes and checks ranges.
    fn build(
        builder: ConfigBuilder<DefaultState>,
        env: Environment,
    ) -> Result<Self, ConfigError> {
        let settings: Settings = builder.add_source(env).build()?.try_deserialize()?;

        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !self.nearby_radius.is_finite() || self.nearby_radius <= 0.0 {
            return Err(ConfigError::InvalidValue {
                key: "nearby_radius".to_string(),
                reason: "must be a positive number".to_string(),
            });
        }
        if self.recent_limit < 1 {
            return Err(ConfigError::InvalidValue {
                key: "recent_limit".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        if self.popular_limit < 1 {
            return Err(ConfigError::InvalidValue {
                key: "popular_limit".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        if self.column_width == 0 {
            return Err(ConfigError::InvalidValue {
                key: "column_width".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

/// `RETAIL_*` variables, e.g. `RETAIL_RECENT_LIMIT=10`.
fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX).try_parsing(true)
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Could not load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid configuration value for {key}: {reason}")]
    InvalidValue { key: String, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::{FileFormat, Map};

    fn from_toml(toml: &str) -> Result<Settings, ConfigError> {
        from_toml_and_env(toml, &[])
    }

    fn from_toml_and_env(toml: &str, vars: &[(&str, &str)]) -> Result<Settings, ConfigError> {
        let vars: Map<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        Settings::build(
            Config::builder().add_source(File::from_str(toml, FileFormat::Toml)),
            environment().source(Some(vars)),
        )
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.nearby_radius, 30.0);
        assert_eq!(settings.recent_limit, 5);
        assert_eq!(settings.popular_limit, 5);
        assert_eq!(settings.column_width, 20);
        assert!(settings.run_migrations);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let settings = from_toml("nearby_radius = 45.5\ncolumn_width = 12\n").unwrap();
        assert_eq!(settings.nearby_radius, 45.5);
        assert_eq!(settings.column_width, 12);
        assert_eq!(settings.recent_limit, 5);
    }

    #[test]
    fn test_rejects_nonsense() {
        assert!(matches!(
            from_toml("recent_limit = 0\n"),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(matches!(
            from_toml("nearby_radius = -1.0\n"),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(matches!(
            from_toml("column_width = \"wide\"\n"),
            Err(ConfigError::Load(_))
        ));
    }

    #[test]
    fn test_environment_overrides_file() {
        let settings = from_toml_and_env(
            "recent_limit = 3\nnearby_radius = 45.5\n",
            &[
                ("RETAIL_RECENT_LIMIT", "10"),
                ("RETAIL_RUN_MIGRATIONS", "false"),
                ("OTHER_RECENT_LIMIT", "99"),
            ],
        )
        .unwrap();

        assert_eq!(settings.recent_limit, 10);
        assert!(!settings.run_migrations);
        assert_eq!(settings.nearby_radius, 45.5);
        assert_eq!(settings.popular_limit, 5);
    }

    #[test]
    fn test_environment_values_are_validated() {
        let result = from_toml_and_env("", &[("RETAIL_POPULAR_LIMIT", "0")]);
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn test_missing_explicit_file_fails() {
        let result = Settings::load(Some(Path::new("/definitely/not/here/retail.toml")));
        assert!(matches!(result, Err(ConfigError::Load(_))));
    }
}
