//! Background-process storage snapshot kept in a key-value store.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;

use crate::application::ports::{BackgroundSnapshot, BackgroundStorage, KeyValueStore, StorageError};

/// Storage key holding the background snapshot.
pub const BACKGROUND_STORAGE_KEY: &str = "backgroundStorage";

/// [`BackgroundStorage`] stored as one JSON value in a [`KeyValueStore`].
pub struct StoreBackgroundStorage {
    store: Arc<dyn KeyValueStore>,
}

impl StoreBackgroundStorage {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl BackgroundStorage for StoreBackgroundStorage {
    async fn get(&self) -> Result<BackgroundSnapshot, StorageError> {
        match self.store.read(BACKGROUND_STORAGE_KEY).await? {
            None => Ok(BackgroundSnapshot::default()),
            Some(value) => Ok(BackgroundSnapshot::deserialize(&value)?),
        }
    }

    async fn set(&self, snapshot: BackgroundSnapshot) -> Result<(), StorageError> {
        let value = serde_json::to_value(&snapshot)?;
        self.store.write(BACKGROUND_STORAGE_KEY, value).await
    }
}
