//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section.

pub mod logging;
pub mod persistence;

use serde::{Deserialize, Serialize};

use self::logging::LoggingConfig;
use self::persistence::PersistenceConfig;

use crate::error::AppError;

/// Root application configuration.
///
/// This struct is the top-level deserialization target for the merged
/// TOML configuration files (default.toml + environment overlay). Every
/// section has defaults, so a missing file still produces a usable
/// configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Snapshot persistence settings.
    #[serde(default)]
    pub persistence: PersistenceConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges the default configuration with an environment-specific overlay
    /// and environment variables prefixed with `CABINET__`.
    pub fn load(env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("CABINET")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_document() {
        let config: AppConfig = serde_json::from_str("{}").expect("deserialize");
        assert_eq!(config.persistence.backend, "local");
        assert_eq!(config.persistence.local.path, "data/store.json");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_backend_override() {
        let config: AppConfig =
            serde_json::from_str(r#"{"persistence": {"backend": "redis"}}"#).expect("deserialize");
        assert_eq!(config.persistence.backend, "redis");
        // Untouched sections keep their defaults.
        assert_eq!(config.persistence.redis.key, "cabinet:snapshot");
    }
}
