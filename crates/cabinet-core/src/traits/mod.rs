//! Trait definitions implemented by other Cabinet crates.

pub mod backend;

pub use backend::SnapshotBackend;
