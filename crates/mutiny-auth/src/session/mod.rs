//! Session lifecycle management: creation, sliding-expiry lookup, and
//! deletion.

pub mod cleanup;
pub mod store;

pub use cleanup::SessionCleanup;
pub use store::SessionStore;
