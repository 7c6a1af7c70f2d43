//! Runtime environment helpers
//!
//! Thin wrapper around `common::env` so the server crate derives the data
//! directory from the configured store path in one place.

use std::path::Path;

/// Ensure the store's parent directory exists; warn on a missing static directory.
pub async fn ensure_env(static_dir: &Path, records_path: &Path) -> anyhow::Result<()> {
    let data_dir = records_path.parent().unwrap_or_else(|| Path::new(""));
    common::env::ensure_env(static_dir, data_dir).await
}
