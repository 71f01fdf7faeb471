//! Durable key-value store backed by one JSON document.
//!
//! Every key is a top-level property of the document:
//!
//! ```json
//! {
//!   "customBlockfrostConfig": { "Preprod": { "status": true, ... } },
//!   "backgroundStorage": { "customBlockfrostBaseUrl": "..." }
//! }
//! ```
//!
//! Writes go to a sibling temp file that is then renamed over the document,
//! so a crash mid-write leaves the previous document intact.  Writes through
//! one store instance are serialised; separate instances pointing at the same
//! file are not coordinated.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::{Map, Value};
use tokio::sync::Mutex;
use tracing::debug;

use crate::application::ports::{KeyValueStore, StorageError};

/// File name used by [`JsonFileStore::in_dir`].
pub const STORAGE_FILE_NAME: &str = "storage.json";

/// [`KeyValueStore`] persisted as a JSON file.
pub struct JsonFileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    /// Store backed by the document at `path`.  The file need not exist yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Store backed by `dir/storage.json`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(dir.as_ref().join(STORAGE_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the whole document; a missing file is an empty document.
    async fn load_document(&self) -> Result<Map<String, Value>, StorageError> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(source) => {
                return Err(StorageError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        if content.trim().is_empty() {
            return Ok(Map::new());
        }

        match serde_json::from_str::<Value>(&content)? {
            Value::Object(map) => Ok(map),
            _ => Err(StorageError::Backend(format!(
                "{} does not contain a JSON object",
                self.path.display()
            ))),
        }
    }

    async fn persist_document(&self, document: &Map<String, Value>) -> Result<(), StorageError> {
        if let Some(dir) = self.path.parent() {
            tokio::fs::create_dir_all(dir)
                .await
                .map_err(|source| StorageError::Io {
                    path: dir.to_path_buf(),
                    source,
                })?;
        }

        let content = serde_json::to_string_pretty(document)?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, content)
            .await
            .map_err(|source| StorageError::Io {
                path: tmp.clone(),
                source,
            })?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|source| StorageError::Io {
                path: self.path.clone(),
                source,
            })?;
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for JsonFileStore {
    async fn read(&self, key: &str) -> Result<Option<Value>, StorageError> {
        let mut document = self.load_document().await?;
        Ok(document.remove(key))
    }

    async fn write(&self, key: &str, value: Value) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock().await;
        let mut document = self.load_document().await?;
        document.insert(key.to_string(), value);
        self.persist_document(&document).await?;
        debug!(key, path = %self.path.display(), "storage document written");
        Ok(())
    }
}
