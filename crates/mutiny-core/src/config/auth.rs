//! Authentication configuration.

use serde::{Deserialize, Serialize};

/// Argon2 iteration count (`t_cost`) used for every stored credential.
pub const DEFAULT_HASH_ITERATIONS: u32 = 3;

/// Argon2 memory cost in KiB.
pub const DEFAULT_HASH_MEMORY_KIB: u32 = 19_456;

/// Credential hashing and bootstrap configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Argon2 iteration count.
    #[serde(default = "default_hash_iterations")]
    pub hash_iterations: u32,
    /// Argon2 memory cost in KiB.
    #[serde(default = "default_hash_memory")]
    pub hash_memory_kib: u32,
    /// Account registered when the credential collection is empty at startup.
    #[serde(default)]
    pub bootstrap_admin: BootstrapAdminConfig,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            hash_iterations: default_hash_iterations(),
            hash_memory_kib: default_hash_memory(),
            bootstrap_admin: BootstrapAdminConfig::default(),
        }
    }
}

/// Credentials for the first administrator account.
#[derive(Clone, Serialize, Deserialize)]
pub struct BootstrapAdminConfig {
    /// Administrator username.
    #[serde(default = "default_admin")]
    pub username: String,
    /// Administrator password.
    #[serde(default = "default_admin")]
    pub password: String,
}

impl Default for BootstrapAdminConfig {
    fn default() -> Self {
        Self {
            username: default_admin(),
            password: default_admin(),
        }
    }
}

impl std::fmt::Debug for BootstrapAdminConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BootstrapAdminConfig")
            .field("username", &self.username)
            .field("password", &"****")
            .finish()
    }
}

fn default_hash_iterations() -> u32 {
    DEFAULT_HASH_ITERATIONS
}

fn default_hash_memory() -> u32 {
    DEFAULT_HASH_MEMORY_KIB
}

fn default_admin() -> String {
    "admin".to_string()
}
