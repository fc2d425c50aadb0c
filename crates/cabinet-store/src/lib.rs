//! # cabinet-store
//!
//! The tree store engine. [`TreeStore`] exposes folder/file CRUD,
//! cascading delete, sibling reordering, and full reset over any
//! snapshot backend, and owns the concurrency discipline that makes
//! read-modify-write safe against substrates with no transactions.

pub mod store;

pub use store::TreeStore;
