//! # mutiny-entity
//!
//! Record types owned by the session and authentication stores. Each
//! record implements [`Document`](mutiny_core::traits::Document) together
//! with its filter and patch vocabulary.

pub mod credential;
pub mod session;

pub use credential::{AclSet, Credential, CredentialFilter, CredentialPatch};
pub use session::{Session, SessionData, SessionFilter, SessionId, SessionPatch};
