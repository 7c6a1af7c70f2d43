use std::{path::{Path, PathBuf}, sync::Arc};
use tokio::{fs, sync::RwLock};
use tracing::debug;

use crate::errors::ServiceError;

/// Outcome of a [`JsonDocStore::mutate`] closure.
pub enum Change<R> {
    /// The documents were modified; persist before returning.
    Written(R),
    /// Nothing changed; skip the write.
    Unchanged(R),
}

/// Ordered document collection, optionally persisted to a JSON file.
///
/// Documents keep insertion order, which is the iteration order listings and
/// pagination rely on. Every successful mutation rewrites the whole file.
/// Documents sit behind `Arc` so a mutation copies pointers, not payloads;
/// edit one in place with [`Arc::make_mut`].
pub struct JsonDocStore<T> {
    inner: RwLock<Vec<Arc<T>>>,
    file_path: Option<PathBuf>,
}

impl<T> JsonDocStore<T>
where
    T: serde::Serialize + serde::de::DeserializeOwned + Clone + Send + Sync,
{
    /// Load documents from `path`, creating the file with an empty array if missing.
    pub async fn open<P: Into<PathBuf>>(path: P) -> Result<Arc<Self>, ServiceError> {
        let file_path = path.into();
        if let Some(parent) = file_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await.map_err(ServiceError::storage)?;
            }
        }

        let docs: Vec<T> = match fs::read(&file_path).await {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => Vec::new(),
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|e| {
                ServiceError::Storage(format!("corrupt store file {}: {e}", file_path.display()))
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                write_atomic(&file_path, b"[]").await?;
                Vec::new()
            }
            Err(e) => return Err(ServiceError::storage(e)),
        };
        debug!(path = %file_path.display(), count = docs.len(), "document store loaded");

        let docs = docs.into_iter().map(Arc::new).collect();
        Ok(Arc::new(Self { inner: RwLock::new(docs), file_path: Some(file_path) }))
    }

    /// A store that lives only in memory.
    pub fn in_memory() -> Arc<Self> {
        Arc::new(Self { inner: RwLock::new(Vec::new()), file_path: None })
    }

    /// Run `f` against a read-only view of the documents.
    pub async fn read<R, F>(&self, f: F) -> R
    where
        F: FnOnce(&[Arc<T>]) -> R,
    {
        let docs = self.inner.read().await;
        f(docs.as_slice())
    }

    /// Apply a mutation and persist it before it becomes visible.
    ///
    /// The closure works on a shallow copy of the list; documents it edits
    /// through `Arc::make_mut` are cloned individually. If the closure or the
    /// file write fails the in-memory state is left untouched.
    pub async fn mutate<R, F>(&self, f: F) -> Result<R, ServiceError>
    where
        F: FnOnce(&mut Vec<Arc<T>>) -> Result<Change<R>, ServiceError>,
    {
        let mut docs = self.inner.write().await;
        let mut next = docs.clone();
        match f(&mut next)? {
            Change::Unchanged(r) => Ok(r),
            Change::Written(r) => {
                if let Some(path) = &self.file_path {
                    let plain: Vec<&T> = next.iter().map(Arc::as_ref).collect();
                    let data = serde_json::to_vec(&plain).map_err(ServiceError::storage)?;
                    write_atomic(path, &data).await?;
                }
                *docs = next;
                Ok(r)
            }
        }
    }
}

async fn write_atomic(path: &Path, data: &[u8]) -> Result<(), ServiceError> {
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, data).await.map_err(ServiceError::storage)?;
    fs::rename(&tmp, path).await.map_err(ServiceError::storage)?;
    Ok(())
}
