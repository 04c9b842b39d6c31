//! In-process collection backed by a concurrent hash map.

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tracing::debug;

use mutiny_core::error::AppError;
use mutiny_core::result::AppResult;
use mutiny_core::traits::{Collection, Document};

/// A [`Collection`] held entirely in memory.
///
/// Records are keyed by [`Document::primary_key`]. Inserts go through the
/// map's entry API, so two concurrent inserts of the same key cannot both
/// succeed. Updates hold the shard lock between the filter check and the
/// write.
#[derive(Debug)]
pub struct MemoryCollection<D: Document> {
    /// Collection name, used in log and error messages.
    name: &'static str,
    records: DashMap<String, D>,
}

impl<D: Document> MemoryCollection<D> {
    /// Create an empty collection.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            records: DashMap::new(),
        }
    }

    /// Keys of the records a filter selects.
    fn matching_keys(&self, filter: &D::Filter) -> Vec<String> {
        match D::pinned_key(filter) {
            Some(key) => vec![key],
            None => self
                .records
                .iter()
                .filter(|entry| entry.value().matches(filter))
                .map(|entry| entry.key().clone())
                .collect(),
        }
    }
}

#[async_trait]
impl<D: Document> Collection<D> for MemoryCollection<D> {
    async fn insert(&self, record: &D) -> AppResult<()> {
        match self.records.entry(record.primary_key()) {
            Entry::Occupied(_) => Err(AppError::conflict(format!(
                "Duplicate key in '{}' collection",
                self.name
            ))),
            Entry::Vacant(slot) => {
                slot.insert(record.clone());
                Ok(())
            }
        }
    }

    async fn find_one(&self, filter: &D::Filter) -> AppResult<Option<D>> {
        if let Some(key) = D::pinned_key(filter) {
            return Ok(self
                .records
                .get(&key)
                .filter(|entry| entry.value().matches(filter))
                .map(|entry| entry.value().clone()));
        }

        Ok(self
            .records
            .iter()
            .find(|entry| entry.value().matches(filter))
            .map(|entry| entry.value().clone()))
    }

    async fn delete_many(&self, filter: &D::Filter) -> AppResult<u64> {
        let mut removed = 0u64;
        for key in self.matching_keys(filter) {
            // Re-check under the shard lock; the record may have changed
            // since the scan.
            if self
                .records
                .remove_if(&key, |_, record| record.matches(filter))
                .is_some()
            {
                removed += 1;
            }
        }

        if removed > 0 {
            debug!(collection = self.name, removed, "Deleted records");
        }
        Ok(removed)
    }

    async fn update_one(&self, filter: &D::Filter, patch: &D::Patch) -> AppResult<bool> {
        for key in self.matching_keys(filter) {
            if let Some(mut record) = self.records.get_mut(&key) {
                if record.matches(filter) {
                    record.apply(patch);
                    return Ok(true);
                }
            }
        }
        Ok(false)
    }

    async fn count(&self) -> AppResult<u64> {
        Ok(self.records.len() as u64)
    }
}
