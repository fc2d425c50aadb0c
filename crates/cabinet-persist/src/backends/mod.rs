//! Snapshot backend implementations.

pub mod local;
pub mod memory;
#[cfg(feature = "redis-backend")]
pub mod redis;
