//! Form bodies accepted by the handlers.

use serde::Deserialize;

/// Username/password form posted to `/login` and `/register`.
///
/// Missing fields deserialize as empty strings, which the stores reject.
#[derive(Clone, Default, Deserialize)]
pub struct CredentialsForm {
    /// Submitted username.
    #[serde(default)]
    pub username: String,
    /// Submitted plaintext password.
    #[serde(default)]
    pub password: String,
}

impl std::fmt::Debug for CredentialsForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialsForm")
            .field("username", &self.username)
            .field("password", &"****")
            .finish()
    }
}
