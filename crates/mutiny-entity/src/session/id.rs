//! Opaque session identifier.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A 128-bit random session identifier.
///
/// Renders as 32 lowercase hex digits (the cookie value). Parsing accepts
/// that form as well as the hyphenated one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(Uuid);

impl SessionId {
    /// Generate a fresh random (v4) identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID.
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// The underlying UUID.
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }

    /// Parse client-supplied text, returning `None` when it is not a UUID.
    pub fn parse(raw: &str) -> Option<Self> {
        raw.trim().parse().ok()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.simple())
    }
}

impl FromStr for SessionId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

impl From<Uuid> for SessionId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_simple_hex() {
        let id = SessionId::from_uuid(Uuid::nil());
        assert_eq!(id.to_string(), "00000000000000000000000000000000");
    }

    #[test]
    fn test_parse_accepts_both_forms() {
        let id = SessionId::generate();
        let simple = id.to_string();
        let hyphenated = id.as_uuid().hyphenated().to_string();
        assert_eq!(SessionId::parse(&simple), Some(id));
        assert_eq!(SessionId::parse(&hyphenated), Some(id));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(SessionId::parse(""), None);
        assert_eq!(SessionId::parse("not-a-session"), None);
        assert_eq!(SessionId::parse("1234"), None);
    }

    #[test]
    fn test_generated_ids_differ() {
        assert_ne!(SessionId::generate(), SessionId::generate());
    }
}
