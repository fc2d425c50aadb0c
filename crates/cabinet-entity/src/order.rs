//! Sibling reorder batch entries.

use serde::{Deserialize, Serialize};

/// One entry in a reorder batch: assign `order` to the record with `id`.
///
/// Entries whose id matches nothing in the snapshot are skipped rather
/// than rejected, so a batch built against a stale listing cannot fail a
/// whole reorder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReorderItem<I> {
    /// Target record.
    pub id: I,
    /// Requested position among siblings.
    pub order: u32,
}
