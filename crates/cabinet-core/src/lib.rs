//! # cabinet-core
//!
//! Core crate for Cabinet. Contains the snapshot backend trait,
//! configuration schemas, typed identifiers, and the unified error
//! system.
//!
//! This crate has **no** internal dependencies on other Cabinet crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
