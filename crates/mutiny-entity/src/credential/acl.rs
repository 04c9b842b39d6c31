//! Flat access-control lists.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// A flat set of capability tags assigned to a user.
///
/// Tags carry no hierarchy; membership is the only question asked of them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AclSet(BTreeSet<String>);

impl AclSet {
    /// An empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `tag` is a member.
    pub fn contains(&self, tag: &str) -> bool {
        self.0.contains(tag)
    }

    /// Whether the set has no tags.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of tags.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Tags in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Tags as an owned vector (the SQL `text[]` shape).
    pub fn to_vec(&self) -> Vec<String> {
        self.0.iter().cloned().collect()
    }
}

impl<S: Into<String>> FromIterator<S> for AclSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_membership() {
        let acl: AclSet = ["admin", "editor", "admin"].into_iter().collect();
        assert_eq!(acl.len(), 2);
        assert!(acl.contains("admin"));
        assert!(!acl.contains("viewer"));
        assert_eq!(acl.iter().collect::<Vec<_>>(), vec!["admin", "editor"]);
    }

    #[test]
    fn test_serializes_as_array() {
        let acl: AclSet = ["b", "a"].into_iter().collect();
        assert_eq!(serde_json::to_string(&acl).unwrap(), r#"["a","b"]"#);
    }
}
