//! # mutiny-auth
//!
//! Session lifecycle and credential authentication for Mutiny.
//!
//! ## Modules
//!
//! - `session`: sliding-expiry session store and the periodic orphan sweeper
//! - `credential`: registration, login verification, and ACL lookup
//! - `password`: Argon2id password hashing

pub mod credential;
pub mod password;
pub mod session;

pub use credential::AuthStore;
pub use password::PasswordHasher;
pub use session::{SessionCleanup, SessionStore};
