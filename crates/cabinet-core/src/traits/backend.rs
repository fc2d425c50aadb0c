//! Snapshot backend trait for pluggable persistence substrates.

use async_trait::async_trait;

use crate::result::AppResult;

/// Trait for whole-snapshot persistence substrates.
///
/// The unit of persistence is the complete snapshot: `load` returns the
/// full collection and `save` replaces it. There are no partial writes
/// and no substrate-level locking or transactions; the store consuming a
/// backend owns the concurrency discipline.
///
/// The trait is generic over the snapshot type so that it can be defined
/// here without depending on the entity crate. Implementations exist for
/// a local JSON document, a Redis key, and process memory; the
/// [`SnapshotBackend`] trait is defined here in `cabinet-core` and
/// implemented in `cabinet-persist`.
#[async_trait]
pub trait SnapshotBackend<S>: Send + Sync + std::fmt::Debug + 'static
where
    S: serde::Serialize + serde::de::DeserializeOwned + Send + Sync + 'static,
{
    /// Return the backend type name (e.g., "local", "redis").
    fn backend_type(&self) -> &str;

    /// Check whether the substrate is reachable.
    async fn health_check(&self) -> AppResult<bool>;

    /// Load the complete snapshot.
    ///
    /// A substrate that has never been written to yields the empty
    /// snapshot rather than an error.
    async fn load(&self) -> AppResult<S>;

    /// Replace the persisted snapshot with the given one.
    ///
    /// Must be atomic relative to the previous content: a failed save
    /// leaves the old snapshot readable.
    async fn save(&self, snapshot: &S) -> AppResult<()>;
}
