//! Credential records.

pub mod acl;
pub mod model;

pub use acl::AclSet;
pub use model::{Credential, CredentialFilter, CredentialPatch};
