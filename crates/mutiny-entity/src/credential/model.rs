//! Credential entity model.

use serde::{Deserialize, Serialize};

use mutiny_core::traits::Document;

use super::acl::AclSet;

/// Stored login credentials for one user.
///
/// Created by registration and never updated or deleted by the
/// authentication store.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    /// Unique username (primary key).
    pub username: String,
    /// PHC-format password hash.
    pub password_hash: String,
    /// Capability tags assigned at registration.
    pub acl: AclSet,
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("username", &self.username)
            .field("password_hash", &"****")
            .field("acl", &self.acl)
            .finish()
    }
}

/// Selects credential records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialFilter {
    /// The credential for this username.
    Username(String),
    /// Every credential.
    All,
}

/// Partial update of a credential record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialPatch {
    /// Replace the access-control list.
    Acl(AclSet),
}

impl Document for Credential {
    type Filter = CredentialFilter;
    type Patch = CredentialPatch;

    fn primary_key(&self) -> String {
        self.username.clone()
    }

    fn pinned_key(filter: &CredentialFilter) -> Option<String> {
        match filter {
            CredentialFilter::Username(name) => Some(name.clone()),
            CredentialFilter::All => None,
        }
    }

    fn matches(&self, filter: &CredentialFilter) -> bool {
        match filter {
            CredentialFilter::Username(name) => self.username == *name,
            CredentialFilter::All => true,
        }
    }

    fn apply(&mut self, patch: &CredentialPatch) {
        match patch {
            CredentialPatch::Acl(acl) => self.acl = acl.clone(),
        }
    }
}
