//! # cabinet-persist
//!
//! Persistence backends for the Cabinet snapshot: a local JSON document,
//! a Redis key, and an in-memory variant for tests and ephemeral runs.
//! [`open_backend`] selects one from configuration.

pub mod backends;

pub use backends::local::LocalSnapshotBackend;
pub use backends::memory::MemorySnapshotBackend;
#[cfg(feature = "redis-backend")]
pub use backends::redis::RedisSnapshotBackend;

use std::sync::Arc;

use cabinet_core::config::persistence::PersistenceConfig;
use cabinet_core::error::AppError;
use cabinet_core::result::AppResult;
use cabinet_core::traits::backend::SnapshotBackend;
use cabinet_entity::snapshot::Snapshot;

/// Open the snapshot backend selected by configuration.
///
/// The choice of substrate is a deployment concern; callers receive the
/// trait object and never learn which one is behind it.
pub async fn open_backend(
    config: &PersistenceConfig,
) -> AppResult<Arc<dyn SnapshotBackend<Snapshot>>> {
    match config.backend.as_str() {
        "local" => Ok(Arc::new(
            LocalSnapshotBackend::new(&config.local.path).await?,
        )),
        #[cfg(feature = "redis-backend")]
        "redis" => Ok(Arc::new(
            RedisSnapshotBackend::connect(&config.redis).await?,
        )),
        "memory" => Ok(Arc::new(MemorySnapshotBackend::new())),
        other => Err(AppError::configuration(format!(
            "Unknown persistence backend: {other}"
        ))),
    }
}
