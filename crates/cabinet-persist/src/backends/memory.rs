//! In-memory snapshot backend for tests and ephemeral runs.

use async_trait::async_trait;
use tokio::sync::RwLock;

use cabinet_core::result::AppResult;
use cabinet_core::traits::backend::SnapshotBackend;
use cabinet_entity::snapshot::Snapshot;

/// Snapshot backend holding the serialized document in process memory.
///
/// The snapshot round-trips through its JSON encoding on every load and
/// save, so the backend is observationally equivalent to the durable
/// substrates: a saved value shares no state with the caller's copy, and
/// anything that does not survive serialization does not survive here.
#[derive(Debug, Default)]
pub struct MemorySnapshotBackend {
    /// The serialized snapshot document, if one was ever saved.
    raw: RwLock<Option<String>>,
}

impl MemorySnapshotBackend {
    /// Create a backend with nothing persisted yet.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SnapshotBackend<Snapshot> for MemorySnapshotBackend {
    fn backend_type(&self) -> &str {
        "memory"
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }

    async fn load(&self) -> AppResult<Snapshot> {
        match self.raw.read().await.as_deref() {
            Some(raw) => Ok(serde_json::from_str(raw)?),
            None => Ok(Snapshot::empty()),
        }
    }

    async fn save(&self, snapshot: &Snapshot) -> AppResult<()> {
        let json = serde_json::to_string(snapshot)?;
        *self.raw.write().await = Some(json);
        Ok(())
    }
}
