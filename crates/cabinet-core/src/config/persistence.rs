//! Snapshot persistence configuration.

use serde::{Deserialize, Serialize};

/// Top-level persistence configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersistenceConfig {
    /// Which snapshot substrate to use: `"local"`, `"redis"`, or `"memory"`.
    #[serde(default = "default_backend")]
    pub backend: String,
    /// Local JSON document configuration.
    #[serde(default)]
    pub local: LocalSnapshotConfig,
    /// Redis keyed-store configuration.
    #[serde(default)]
    pub redis: RedisSnapshotConfig,
}

impl Default for PersistenceConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            local: LocalSnapshotConfig::default(),
            redis: RedisSnapshotConfig::default(),
        }
    }
}

/// Local snapshot document configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalSnapshotConfig {
    /// Path of the JSON snapshot document.
    #[serde(default = "default_local_path")]
    pub path: String,
}

impl Default for LocalSnapshotConfig {
    fn default() -> Self {
        Self {
            path: default_local_path(),
        }
    }
}

/// Redis keyed-store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedisSnapshotConfig {
    /// Redis connection URL.
    #[serde(default = "default_redis_url")]
    pub url: String,
    /// The well-known key holding the snapshot document.
    #[serde(default = "default_redis_key")]
    pub key: String,
    /// Bound in seconds on every substrate round-trip.
    #[serde(default = "default_op_timeout")]
    pub op_timeout_seconds: u64,
}

impl Default for RedisSnapshotConfig {
    fn default() -> Self {
        Self {
            url: default_redis_url(),
            key: default_redis_key(),
            op_timeout_seconds: default_op_timeout(),
        }
    }
}

fn default_backend() -> String {
    "local".to_string()
}

fn default_local_path() -> String {
    "data/store.json".to_string()
}

fn default_redis_url() -> String {
    "redis://127.0.0.1:6379".to_string()
}

fn default_redis_key() -> String {
    "cabinet:snapshot".to_string()
}

fn default_op_timeout() -> u64 {
    5
}
