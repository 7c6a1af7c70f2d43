use async_trait::async_trait;
use models::{Record, RecordId, RecordPatch};

use crate::errors::ServiceError;
use crate::pagination::Pagination;

/// Trait abstraction for record persistence.
/// Implementations can be file-backed, in-memory, or a remote document database.
///
/// Lookups by id act on the first matching record in store order.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn list(&self, page: Pagination) -> Result<Vec<Record>, ServiceError>;
    async fn count(&self) -> Result<usize, ServiceError>;
    async fn insert(&self, record: Record) -> Result<(), ServiceError>;
    /// Insert unless a record with the same id exists; returns whether it was inserted.
    async fn insert_unique(&self, record: Record) -> Result<bool, ServiceError>;
    /// Merge `patch` into the first record with `id`; returns whether one matched.
    async fn update_one(&self, id: &RecordId, patch: &RecordPatch) -> Result<bool, ServiceError>;
    /// Remove the first record with `id`; returns whether one existed.
    async fn delete_one(&self, id: &RecordId) -> Result<bool, ServiceError>;
}
