use std::sync::Arc;

use async_trait::async_trait;
use models::{Record, RecordId, RecordPatch};

use crate::errors::ServiceError;
use crate::pagination::Pagination;
use crate::records::store::RecordStore;
use crate::storage::json_doc_store::{Change, JsonDocStore};

/// Record store over an ordered document collection.
///
/// Matching is first-wins in insertion order. Whether anything reaches disk
/// depends on the collection: [`DocRecordStore::in_memory`] keeps it in memory,
/// the file-backed store hands in one opened from a path.
#[derive(Clone)]
pub struct DocRecordStore {
    docs: Arc<JsonDocStore<Record>>,
}

impl DocRecordStore {
    /// A store without persistence, for tests and throwaway instances.
    pub fn in_memory() -> Arc<Self> {
        Arc::new(Self::with_docs(JsonDocStore::in_memory()))
    }

    pub(crate) fn with_docs(docs: Arc<JsonDocStore<Record>>) -> Self {
        Self { docs }
    }
}

#[async_trait]
impl RecordStore for DocRecordStore {
    async fn list(&self, page: Pagination) -> Result<Vec<Record>, ServiceError> {
        Ok(self.docs.read(|docs| page.apply(docs.iter().map(|r| Record::clone(r))).collect()).await)
    }

    async fn count(&self) -> Result<usize, ServiceError> {
        Ok(self.docs.read(|docs| docs.len()).await)
    }

    async fn insert(&self, record: Record) -> Result<(), ServiceError> {
        self.docs
            .mutate(|docs| {
                docs.push(Arc::new(record));
                Ok(Change::Written(()))
            })
            .await
    }

    async fn insert_unique(&self, record: Record) -> Result<bool, ServiceError> {
        self.docs
            .mutate(|docs| {
                if docs.iter().any(|r| r.id == record.id) {
                    return Ok(Change::Unchanged(false));
                }
                docs.push(Arc::new(record));
                Ok(Change::Written(true))
            })
            .await
    }

    async fn update_one(&self, id: &RecordId, patch: &RecordPatch) -> Result<bool, ServiceError> {
        self.docs
            .mutate(|docs| {
                let Some(record) = docs.iter_mut().find(|r| &r.id == id) else {
                    return Ok(Change::Unchanged(false));
                };
                if patch.is_empty() {
                    return Ok(Change::Unchanged(true));
                }
                Arc::make_mut(record).apply(patch);
                Ok(Change::Written(true))
            })
            .await
    }

    async fn delete_one(&self, id: &RecordId) -> Result<bool, ServiceError> {
        self.docs
            .mutate(|docs| match docs.iter().position(|r| &r.id == id) {
                Some(idx) => {
                    docs.remove(idx);
                    Ok(Change::Written(true))
                }
                None => Ok(Change::Unchanged(false)),
            })
            .await
    }
}
