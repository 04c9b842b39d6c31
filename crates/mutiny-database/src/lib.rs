//! # mutiny-database
//!
//! Persistence backends for the session and credential collections:
//! PostgreSQL via sqlx, and an in-process map for tests and single-node
//! deployments.

pub mod backend;
pub mod collections;
pub mod memory;

pub use backend::Collections;
pub use memory::MemoryCollection;
