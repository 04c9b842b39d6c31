//! Document collection traits for pluggable persistence backends.

use std::fmt::Debug;

use async_trait::async_trait;

use crate::result::AppResult;

/// A record stored in a [`Collection`].
///
/// Each document type names its own filter and patch vocabulary so that
/// backends can translate them (to SQL, or to in-process predicates) without
/// an untyped query language.
pub trait Document: Clone + Debug + Send + Sync + 'static {
    /// Selects records for `find_one`, `update_one`, and `delete_many`.
    type Filter: Debug + Send + Sync;
    /// Describes a partial update applied by `update_one`.
    type Patch: Debug + Send + Sync;

    /// Primary key. Must be unique within the collection.
    fn primary_key(&self) -> String;

    /// The primary key a filter pins down, if it selects by key.
    ///
    /// Backends use this to turn a scan into a point lookup.
    fn pinned_key(filter: &Self::Filter) -> Option<String>;

    /// Whether this record is selected by `filter`.
    fn matches(&self, filter: &Self::Filter) -> bool;

    /// Apply a patch in place.
    fn apply(&mut self, patch: &Self::Patch);
}

/// A single logical collection of documents.
///
/// Implementations must be safe for concurrent use. Every method is a
/// self-contained operation; there are no multi-step transactions.
#[async_trait]
pub trait Collection<D: Document>: Send + Sync + Debug + 'static {
    /// Insert a new record.
    ///
    /// Fails with [`ErrorKind::Conflict`](crate::error::ErrorKind::Conflict)
    /// when a record with the same primary key already exists.
    async fn insert(&self, record: &D) -> AppResult<()>;

    /// Return the first record matching `filter`.
    async fn find_one(&self, filter: &D::Filter) -> AppResult<Option<D>>;

    /// Delete every record matching `filter`. Returns the number removed.
    async fn delete_many(&self, filter: &D::Filter) -> AppResult<u64>;

    /// Apply `patch` to the first record matching `filter`.
    ///
    /// The match and the write happen atomically. Returns `true` if a record
    /// was updated.
    async fn update_one(&self, filter: &D::Filter, patch: &D::Patch) -> AppResult<bool>;

    /// Count all records.
    async fn count(&self) -> AppResult<u64>;
}
