//! Session records.

pub mod filter;
pub mod id;
pub mod model;

pub use filter::{SessionFilter, SessionPatch};
pub use id::SessionId;
pub use model::{Session, SessionData};
