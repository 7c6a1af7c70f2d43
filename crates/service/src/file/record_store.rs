use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use models::{Record, RecordId, RecordPatch};
use tracing::info;

use crate::errors::ServiceError;
use crate::pagination::Pagination;
use crate::records::{DocRecordStore, RecordStore};
use crate::storage::json_doc_store::JsonDocStore;

/// File-backed record store. All records live in one JSON array on disk,
/// rewritten after every mutation.
#[derive(Clone)]
pub struct FileRecordStore {
    records: DocRecordStore,
}

impl FileRecordStore {
    /// Open the store at `path`. Creates the file if missing.
    pub async fn open<P: Into<PathBuf>>(path: P) -> Result<Arc<Self>, ServiceError> {
        let file_path = path.into();
        let docs = JsonDocStore::<Record>::open(&file_path).await?;
        let store = Self { records: DocRecordStore::with_docs(docs) };
        info!(path = %file_path.display(), records = store.records.count().await?, "record store opened");
        Ok(Arc::new(store))
    }
}

#[async_trait]
impl RecordStore for FileRecordStore {
    async fn list(&self, page: Pagination) -> Result<Vec<Record>, ServiceError> { self.records.list(page).await }
    async fn count(&self) -> Result<usize, ServiceError> { self.records.count().await }
    async fn insert(&self, record: Record) -> Result<(), ServiceError> { self.records.insert(record).await }
    async fn insert_unique(&self, record: Record) -> Result<bool, ServiceError> { self.records.insert_unique(record).await }
    async fn update_one(&self, id: &RecordId, patch: &RecordPatch) -> Result<bool, ServiceError> { self.records.update_one(id, patch).await }
    async fn delete_one(&self, id: &RecordId) -> Result<bool, ServiceError> { self.records.delete_one(id).await }
}
