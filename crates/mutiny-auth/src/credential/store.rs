//! Credential registration and verification.

use std::sync::Arc;

use tracing::{debug, warn};

use mutiny_core::error::AppError;
use mutiny_core::traits::Collection;
use mutiny_entity::{AclSet, Credential, CredentialFilter};

use crate::password::PasswordHasher;

/// Owns the credential collection.
///
/// Expected negatives (unknown user, wrong password, taken username) are
/// reported as `false` or an empty set. Errors are reserved for storage and
/// hashing faults. Callers cannot tell an unknown user from a wrong
/// password.
#[derive(Debug, Clone)]
pub struct AuthStore {
    /// Credential collection.
    credentials: Arc<dyn Collection<Credential>>,
    /// Password hasher.
    hasher: PasswordHasher,
}

impl AuthStore {
    /// Creates a new authentication store.
    pub fn new(credentials: Arc<dyn Collection<Credential>>, hasher: PasswordHasher) -> Self {
        Self {
            credentials,
            hasher,
        }
    }

    async fn find(&self, username: &str) -> Result<Option<Credential>, AppError> {
        self.credentials
            .find_one(&CredentialFilter::Username(username.to_string()))
            .await
    }

    /// Registers a new user with the given capability tags.
    ///
    /// Returns `false` without side effects when either field is empty or
    /// the username is taken. The lookup is only a fast path; the
    /// collection's primary-key constraint settles concurrent registrations.
    pub async fn register(
        &self,
        username: &str,
        password: &str,
        acls: &[&str],
    ) -> Result<bool, AppError> {
        if username.is_empty() || password.is_empty() {
            debug!("Registration rejected: empty username or password");
            return Ok(false);
        }

        if self.find(username).await?.is_some() {
            debug!(username, "Registration rejected: username taken");
            return Ok(false);
        }

        let hasher = self.hasher.clone();
        let plaintext = password.to_string();
        let password_hash = tokio::task::spawn_blocking(move || hasher.hash_password(&plaintext))
            .await
            .map_err(|e| AppError::internal(format!("Password hashing task failed: {e}")))??;

        let credential = Credential {
            username: username.to_string(),
            password_hash,
            acl: acls.iter().copied().collect::<AclSet>(),
        };

        match self.credentials.insert(&credential).await {
            Ok(()) => {
                debug!(username, acl = ?credential.acl, "Registered user");
                Ok(true)
            }
            Err(e) if e.is_conflict() => {
                debug!(username, "Registration lost a race for the username");
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }

    /// Checks a username/password pair.
    ///
    /// Does not create a session; that is the caller's job.
    pub async fn log_in(&self, username: &str, password: &str) -> Result<bool, AppError> {
        let Some(credential) = self.find(username).await? else {
            debug!(username, "Login failed");
            return Ok(false);
        };

        let hasher = self.hasher.clone();
        let plaintext = password.to_string();
        let valid = tokio::task::spawn_blocking(move || {
            hasher.verify_password(&plaintext, &credential.password_hash)
        })
        .await
        .map_err(|e| AppError::internal(format!("Password verification task failed: {e}")))??;

        if valid {
            debug!(username, "Login succeeded");
        } else {
            debug!(username, "Login failed");
        }
        Ok(valid)
    }

    /// Records a logout. Credentials carry no logged-in state, so nothing is
    /// persisted; session deletion is the session store's job.
    pub async fn log_out(&self, username: &str) {
        debug!(username, "Logged out");
    }

    /// Capability tags of `username`; empty for unknown users.
    pub async fn get_acls(&self, username: &str) -> Result<AclSet, AppError> {
        Ok(self
            .find(username)
            .await?
            .map(|credential| credential.acl)
            .unwrap_or_default())
    }

    /// Whether `username` holds the capability tag `acl`.
    pub async fn has_acl(&self, username: &str, acl: &str) -> Result<bool, AppError> {
        Ok(self.get_acls(username).await?.contains(acl))
    }

    /// Whether no credentials exist yet.
    pub async fn is_empty(&self) -> Result<bool, AppError> {
        Ok(self.credentials.count().await? == 0)
    }

    /// Registers `username` with the `admin` tag if no credentials exist.
    ///
    /// Returns `true` when the account was created.
    pub async fn bootstrap_admin(&self, username: &str, password: &str) -> Result<bool, AppError> {
        if !self.is_empty().await? {
            return Ok(false);
        }

        let created = self.register(username, password, &["admin"]).await?;
        if created {
            warn!(
                username,
                "Created bootstrap administrator; change its password"
            );
        }
        Ok(created)
    }
}
