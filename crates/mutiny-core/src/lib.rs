//! # mutiny-core
//!
//! Core crate for Mutiny. Contains the persistence and clock traits,
//! configuration schemas, and the unified error system.
//!
//! This crate has **no** internal dependencies on other Mutiny crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;

pub use error::AppError;
pub use result::AppResult;
