//! # vital-config
//!
//! Layered configuration loading for Salud Vital using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`SALUD_VITAL_*` prefix, `__` as separator)
//! 2. Project-level `.saludvital/config.toml`
//! 3. User-level `~/.config/saludvital/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `SALUD_VITAL_SERVER__PORT` -> `server.port`,
//! `SALUD_VITAL_DATABASE__PATH` -> `database.path`, etc. The `__` (double
//! underscore) separates nested config sections.

mod database;
mod error;
mod server;

pub use database::DatabaseConfig;
pub use error::ConfigError;
pub use server::ServerConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct VitalConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
}

impl VitalConfig {
    /// Load configuration from all sources (TOML files + environment
    /// variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] if you need
    /// `.env` file loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if any layer fails to parse or merge.
    pub fn load() -> Result<Self, ConfigError> {
        Self::figment().extract().map_err(ConfigError::from)
    }

    /// Load configuration with `.env` file support. The typical entry point
    /// for the server binary and tests.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if any layer fails to parse or merge.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        Self::load_dotenv_from_workspace();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// This is public so tests can inspect the figment directly or add
    /// additional providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".saludvital/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment = figment.merge(Env::prefixed("SALUD_VITAL_").split("__"));

        figment
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("saludvital").join("config.toml"))
    }

    /// Load `.env` from the workspace root. Silently does nothing if no
    /// `.env` is found.
    fn load_dotenv_from_workspace() {
        if let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") {
            let mut dir = PathBuf::from(manifest_dir);
            // Walk up at most 3 levels (crate -> crates/ -> workspace root)
            for _ in 0..3 {
                let env_path = dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                    return;
                }
                if !dir.pop() {
                    break;
                }
            }
        }

        let _ = dotenvy::dotenv();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn figment_builds_without_files() {
        let figment = VitalConfig::figment();
        let config: VitalConfig = figment.extract().expect("should extract defaults");
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.database.path, "saludvital.db");
    }

    #[test]
    fn env_overrides_defaults() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("SALUD_VITAL_SERVER__PORT", "9100");
            jail.set_env("SALUD_VITAL_DATABASE__PATH", "/tmp/clinica.db");
            let config: VitalConfig = VitalConfig::figment().extract()?;
            assert_eq!(config.server.port, 9100);
            assert_eq!(config.database.path, "/tmp/clinica.db");
            Ok(())
        });
    }

    #[test]
    fn project_toml_layers_under_env() {
        figment::Jail::expect_with(|jail| {
            jail.create_dir(".saludvital")?;
            jail.create_file(
                ".saludvital/config.toml",
                r#"
                [server]
                port = 9200
                bind = "0.0.0.0"
                "#,
            )?;
            jail.set_env("SALUD_VITAL_SERVER__PORT", "9300");
            let config: VitalConfig = VitalConfig::figment().extract()?;
            // env wins over file; file wins over default
            assert_eq!(config.server.port, 9300);
            assert_eq!(config.server.bind, "0.0.0.0");
            Ok(())
        });
    }
}
