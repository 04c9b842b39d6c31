//! Credential registration, verification, and access-control lists.

pub mod store;

pub use store::AuthStore;
