//! Query vocabulary for the session collection.

use chrono::{DateTime, Utc};

use mutiny_core::traits::Document;

use super::id::SessionId;
use super::model::Session;

/// Selects session records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionFilter {
    /// The session with this id.
    Id(SessionId),
    /// The session with this id, only if refreshed strictly after `cutoff`.
    FreshSince {
        id: SessionId,
        cutoff: DateTime<Utc>,
    },
    /// Every session refreshed at or before `cutoff`.
    StaleAsOf(DateTime<Utc>),
    /// Every session.
    All,
}

/// Partial update of a session record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionPatch {
    /// Set the refresh timestamp.
    Touch(DateTime<Utc>),
}

impl Document for Session {
    type Filter = SessionFilter;
    type Patch = SessionPatch;

    fn primary_key(&self) -> String {
        self.id.to_string()
    }

    fn pinned_key(filter: &SessionFilter) -> Option<String> {
        match filter {
            SessionFilter::Id(id) | SessionFilter::FreshSince { id, .. } => Some(id.to_string()),
            SessionFilter::StaleAsOf(_) | SessionFilter::All => None,
        }
    }

    fn matches(&self, filter: &SessionFilter) -> bool {
        match filter {
            SessionFilter::Id(id) => self.id == *id,
            SessionFilter::FreshSince { id, cutoff } => {
                self.id == *id && self.refreshed_at > *cutoff
            }
            SessionFilter::StaleAsOf(cutoff) => self.refreshed_at <= *cutoff,
            SessionFilter::All => true,
        }
    }

    fn apply(&mut self, patch: &SessionPatch) {
        match patch {
            SessionPatch::Touch(at) => self.refreshed_at = *at,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;
    use crate::session::SessionData;

    #[test]
    fn test_stale_and_fresh_filters_partition_on_cutoff() {
        let now = Utc::now();
        let session = Session::new(SessionId::generate(), SessionData::for_user("a"), now);

        let at_cutoff = SessionFilter::StaleAsOf(now);
        let fresh = SessionFilter::FreshSince {
            id: session.id,
            cutoff: now,
        };
        assert!(session.matches(&at_cutoff));
        assert!(!session.matches(&fresh));

        let earlier = now - Duration::seconds(1);
        assert!(!session.matches(&SessionFilter::StaleAsOf(earlier)));
        assert!(session.matches(&SessionFilter::FreshSince {
            id: session.id,
            cutoff: earlier,
        }));
    }

    #[test]
    fn test_touch_patch() {
        let now = Utc::now();
        let mut session = Session::new(SessionId::generate(), SessionData::for_user("a"), now);
        let later = now + Duration::seconds(30);
        session.apply(&SessionPatch::Touch(later));
        assert_eq!(session.refreshed_at, later);
    }

    #[test]
    fn test_pinned_key() {
        let id = SessionId::generate();
        assert_eq!(
            Session::pinned_key(&SessionFilter::Id(id)),
            Some(id.to_string())
        );
        assert_eq!(Session::pinned_key(&SessionFilter::All), None);
    }
}
