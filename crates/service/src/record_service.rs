use std::sync::{
    atomic::{AtomicI64, Ordering},
    Arc,
};

use chrono::Utc;
use models::{errors::ModelError, schema::ID_FIELD, Record, RecordId, RecordPatch, RecordSchema};
use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::{errors::ServiceError, pagination::Pagination, records::RecordStore};

/// Record CRUD on top of an injected [`RecordStore`].
///
/// Translates wire payloads (JSON objects with data-URI images) into stored
/// records and back.
#[derive(Clone)]
pub struct RecordService {
    store: Arc<dyn RecordStore>,
    schema: RecordSchema,
    reject_duplicate_ids: bool,
    // last generated id, shared by clones so ids stay strictly increasing
    last_generated: Arc<AtomicI64>,
}

impl RecordService {
    pub fn new(store: Arc<dyn RecordStore>, schema: RecordSchema) -> Self {
        Self { store, schema, reject_duplicate_ids: false, last_generated: Arc::new(AtomicI64::new(0)) }
    }

    /// Refuse creates whose id is already stored instead of keeping both.
    pub fn reject_duplicate_ids(mut self, reject: bool) -> Self {
        self.reject_duplicate_ids = reject;
        self
    }

    /// List records in store order, rendered for the wire.
    pub async fn list(&self, page: Pagination) -> Result<Vec<Value>, ServiceError> {
        let records = self.store.list(page).await?;
        debug!(count = records.len(), offset = page.offset, limit = ?page.limit, "records listed");
        Ok(records.iter().map(Record::to_wire).collect())
    }

    /// Store a new record. A missing id is replaced by the current Unix time in
    /// milliseconds, bumped past the previous generated id when they collide.
    pub async fn create(&self, payload: &Value) -> Result<RecordId, ServiceError> {
        let body = as_object(payload)?;
        let id = RecordId::from_payload(body).unwrap_or_else(|| self.generated_id());
        let record = Record::from_create_payload(&self.schema, body, id.clone());
        let images = record.images.len();

        if self.reject_duplicate_ids {
            if !self.store.insert_unique(record).await? {
                return Err(ServiceError::Conflict(format!("record with id {id} already exists")));
            }
        } else {
            self.store.insert(record).await?;
        }
        info!(%id, images, "record created");
        Ok(id)
    }

    /// Merge the schema fields present in `payload` into the record it names.
    pub async fn update(&self, payload: &Value) -> Result<RecordId, ServiceError> {
        let body = as_object(payload)?;
        let id = required_id(body)?;
        let patch = RecordPatch::from_update_payload(&self.schema, body);
        if !self.store.update_one(&id, &patch).await? {
            return Err(ServiceError::not_found("document"));
        }
        info!(%id, fields = patch.fields.len(), images = patch.images.len(), "record updated");
        Ok(id)
    }

    pub async fn delete(&self, payload: &Value) -> Result<RecordId, ServiceError> {
        let body = as_object(payload)?;
        let id = required_id(body)?;
        if !self.store.delete_one(&id).await? {
            return Err(ServiceError::not_found("document"));
        }
        info!(%id, "record deleted");
        Ok(id)
    }

    pub async fn count(&self) -> Result<usize, ServiceError> {
        self.store.count().await
    }

    fn generated_id(&self) -> RecordId {
        let now = Utc::now().timestamp_millis();
        let prev = self
            .last_generated
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| Some(now.max(last + 1)))
            .unwrap_or_else(|last| last);
        RecordId::from(now.max(prev + 1))
    }
}

fn as_object(payload: &Value) -> Result<&Map<String, Value>, ServiceError> {
    payload
        .as_object()
        .ok_or_else(|| ServiceError::Validation("request body must be a JSON object".into()))
}

fn required_id(body: &Map<String, Value>) -> Result<RecordId, ServiceError> {
    RecordId::from_payload(body).ok_or_else(|| ModelError::missing_field(ID_FIELD).into())
}
