//! CustomEndpointApi: get/update over the network-keyed configuration map.
//!
//! The whole map lives under a single storage key:
//!
//! ```text
//! customBlockfrostConfig → { "<Network>": { status, projectId, baseUrl }, ... }
//! ```
//!
//! The accessor caches nothing; every call re-reads storage.  `update` is a
//! read-modify-write of the whole map, so it is serialised through an async
//! lock owned by the accessor.  Concurrent updates issued through the same
//! accessor therefore all survive; [`CustomEndpointApi::modify`] derives the
//! new entry from the current one inside that lock.  Writers that go
//! around the accessor are not covered by the lock.

use std::sync::Arc;

use endpoint_core::{CustomEndpointConfig, Network};
use serde_json::{Map, Value};
use tokio::sync::Mutex;
use tracing::{debug, warn};

use super::ports::{KeyValueStore, StorageError};

/// Storage key holding the configuration map.
pub const CONFIG_STORAGE_KEY: &str = "customBlockfrostConfig";

/// Accessor for per-network custom endpoint settings.
pub struct CustomEndpointApi {
    store: Arc<dyn KeyValueStore>,
    write_lock: Mutex<()>,
}

impl CustomEndpointApi {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            write_lock: Mutex::new(()),
        }
    }

    /// Returns the stored settings for `network` with each missing field
    /// defaulted.
    ///
    /// Never fails: an unreadable store, a missing map, a missing key or a
    /// malformed entry all produce [`CustomEndpointConfig::default`].
    pub async fn get_for_network(&self, network: Network) -> CustomEndpointConfig {
        let map = match self.store.read(CONFIG_STORAGE_KEY).await {
            Ok(value) => as_map(value),
            Err(e) => {
                warn!(%network, error = %e, "could not read custom endpoint config; using defaults");
                return CustomEndpointConfig::default();
            }
        };

        match CustomEndpointConfig::from_stored(map.get(network.as_key())) {
            Ok(cfg) => cfg,
            Err(e) => {
                warn!(%network, error = %e, "malformed custom endpoint entry; using defaults");
                CustomEndpointConfig::default()
            }
        }
    }

    /// Replaces the entry for `network` with `data`, leaving every other key
    /// in the map untouched.
    ///
    /// # Errors
    ///
    /// Returns the storage error if the map cannot be read or written back.
    pub async fn update(
        &self,
        network: Network,
        data: CustomEndpointConfig,
    ) -> Result<(), StorageError> {
        self.modify(network, move |_| data).await.map(|_| ())
    }

    /// Rewrites the entry for `network` from its current value, under the
    /// same lock as [`update`](Self::update).
    ///
    /// `f` receives the current entry (defaulted like
    /// [`get_for_network`](Self::get_for_network)) and returns the new one.
    /// The previous entry is returned so callers can restore it.
    ///
    /// # Errors
    ///
    /// Returns the storage error if the map cannot be read or written back.
    pub async fn modify<F>(
        &self,
        network: Network,
        f: F,
    ) -> Result<CustomEndpointConfig, StorageError>
    where
        F: FnOnce(CustomEndpointConfig) -> CustomEndpointConfig + Send,
    {
        let _guard = self.write_lock.lock().await;

        let mut map = as_map(self.store.read(CONFIG_STORAGE_KEY).await?);
        let previous = match CustomEndpointConfig::from_stored(map.get(network.as_key())) {
            Ok(cfg) => cfg,
            Err(e) => {
                warn!(%network, error = %e, "malformed custom endpoint entry; replacing it");
                CustomEndpointConfig::default()
            }
        };
        let next = f(previous.clone());
        map.insert(network.as_key().to_string(), next.to_stored());
        self.store
            .write(CONFIG_STORAGE_KEY, Value::Object(map))
            .await?;

        debug!(%network, status = next.status, "custom endpoint config updated");
        Ok(previous)
    }
}

/// Interprets the stored document as a map.  Anything that is not a JSON
/// object (absent, `null`, or corrupted) counts as an empty map.
fn as_map(value: Option<Value>) -> Map<String, Value> {
    match value {
        Some(Value::Object(map)) => map,
        None | Some(Value::Null) => Map::new(),
        Some(other) => {
            warn!(found = %other, "custom endpoint config is not an object; treating as empty");
            Map::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::storage::memory::MemoryStore;
    use async_trait::async_trait;
    use serde_json::json;
    use std::time::Duration;

    fn make_api() -> (CustomEndpointApi, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        let api = CustomEndpointApi::new(Arc::clone(&store) as Arc<dyn KeyValueStore>);
        (api, store)
    }

    // ── Test doubles ──────────────────────────────────────────────────────────

    /// Store whose reads and writes always fail.
    struct BrokenStore;

    #[async_trait]
    impl KeyValueStore for BrokenStore {
        async fn read(&self, _key: &str) -> Result<Option<Value>, StorageError> {
            Err(StorageError::Backend("disk unavailable".to_string()))
        }
        async fn write(&self, _key: &str, _value: Value) -> Result<(), StorageError> {
            Err(StorageError::Backend("disk unavailable".to_string()))
        }
    }

    /// Store that reads fine but refuses writes.
    struct ReadOnlyStore;

    #[async_trait]
    impl KeyValueStore for ReadOnlyStore {
        async fn read(&self, _key: &str) -> Result<Option<Value>, StorageError> {
            Ok(None)
        }
        async fn write(&self, _key: &str, _value: Value) -> Result<(), StorageError> {
            Err(StorageError::Backend("quota exceeded".to_string()))
        }
    }

    /// Store that sleeps between read and write so interleavings are visible.
    struct SlowStore {
        inner: MemoryStore,
    }

    #[async_trait]
    impl KeyValueStore for SlowStore {
        async fn read(&self, key: &str) -> Result<Option<Value>, StorageError> {
            let value = self.inner.read(key).await;
            tokio::time::sleep(Duration::from_millis(20)).await;
            value
        }
        async fn write(&self, key: &str, value: Value) -> Result<(), StorageError> {
            self.inner.write(key, value).await
        }
    }

    // ── get_for_network ───────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_unwritten_network_returns_defaults() {
        let (api, _) = make_api();
        for network in Network::ALL {
            let cfg = api.get_for_network(network).await;
            assert_eq!(cfg, CustomEndpointConfig::default());
        }
    }

    #[tokio::test]
    async fn test_partial_entry_is_filled_per_field() {
        // Arrange
        let (api, store) = make_api();
        store
            .write(CONFIG_STORAGE_KEY, json!({ "Preview": { "projectId": "prev123" } }))
            .await
            .unwrap();

        // Act
        let cfg = api.get_for_network(Network::Preview).await;

        // Assert
        assert!(!cfg.status);
        assert_eq!(cfg.project_id, "prev123");
        assert_eq!(cfg.base_url, "");
    }

    #[tokio::test]
    async fn test_read_failure_yields_defaults() {
        let api = CustomEndpointApi::new(Arc::new(BrokenStore));
        let cfg = api.get_for_network(Network::Mainnet).await;
        assert_eq!(cfg, CustomEndpointConfig::default());
    }

    #[tokio::test]
    async fn test_malformed_entry_yields_defaults() {
        let (api, store) = make_api();
        store
            .write(CONFIG_STORAGE_KEY, json!({ "Mainnet": { "status": "on" } }))
            .await
            .unwrap();
        assert_eq!(
            api.get_for_network(Network::Mainnet).await,
            CustomEndpointConfig::default()
        );
    }

    #[tokio::test]
    async fn test_non_object_document_yields_defaults() {
        let (api, store) = make_api();
        store.write(CONFIG_STORAGE_KEY, json!("garbage")).await.unwrap();
        assert_eq!(
            api.get_for_network(Network::Preprod).await,
            CustomEndpointConfig::default()
        );
    }

    // ── update ────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_update_then_get_round_trips() {
        // Arrange
        let (api, _) = make_api();
        let data = CustomEndpointConfig::enabled("abc123", "https://api.example.com");

        // Act
        api.update(Network::Preprod, data.clone()).await.unwrap();

        // Assert
        assert_eq!(api.get_for_network(Network::Preprod).await, data);
    }

    #[tokio::test]
    async fn test_update_does_not_touch_other_networks() {
        // Arrange
        let (api, _) = make_api();
        let mainnet = CustomEndpointConfig::enabled("main", "https://main.example");
        api.update(Network::Mainnet, mainnet.clone()).await.unwrap();

        // Act
        api.update(Network::Preview, CustomEndpointConfig::enabled("prev", "https://prev.example"))
            .await
            .unwrap();

        // Assert
        assert_eq!(api.get_for_network(Network::Mainnet).await, mainnet);
        assert_eq!(
            api.get_for_network(Network::Preprod).await,
            CustomEndpointConfig::default()
        );
    }

    #[tokio::test]
    async fn test_update_replaces_whole_entry() {
        let (api, _) = make_api();
        api.update(Network::Mainnet, CustomEndpointConfig::enabled("old", "https://old.example"))
            .await
            .unwrap();

        let replacement = CustomEndpointConfig {
            status: false,
            project_id: String::new(),
            base_url: "https://new.example".to_string(),
        };
        api.update(Network::Mainnet, replacement.clone()).await.unwrap();

        assert_eq!(api.get_for_network(Network::Mainnet).await, replacement);
    }

    #[tokio::test]
    async fn test_update_preserves_unknown_keys() {
        // Arrange: a key written by some other build
        let (api, store) = make_api();
        store
            .write(CONFIG_STORAGE_KEY, json!({ "Devnet": { "status": true, "extra": 1 } }))
            .await
            .unwrap();

        // Act
        api.update(Network::Mainnet, CustomEndpointConfig::default())
            .await
            .unwrap();

        // Assert
        let doc = store.read(CONFIG_STORAGE_KEY).await.unwrap().unwrap();
        assert_eq!(doc["Devnet"], json!({ "status": true, "extra": 1 }));
        assert!(doc.get("Mainnet").is_some());
    }

    #[tokio::test]
    async fn test_update_creates_map_on_first_write() {
        let (api, store) = make_api();
        assert!(store.read(CONFIG_STORAGE_KEY).await.unwrap().is_none());

        api.update(Network::Sanchonet, CustomEndpointConfig::default())
            .await
            .unwrap();

        let doc = store.read(CONFIG_STORAGE_KEY).await.unwrap().unwrap();
        assert_eq!(doc.as_object().map(|m| m.len()), Some(1));
    }

    #[tokio::test]
    async fn test_update_propagates_write_failure() {
        let api = CustomEndpointApi::new(Arc::new(ReadOnlyStore));
        let result = api
            .update(Network::Mainnet, CustomEndpointConfig::default())
            .await;
        assert!(matches!(result, Err(StorageError::Backend(_))));
    }

    #[tokio::test]
    async fn test_update_propagates_read_failure() {
        let api = CustomEndpointApi::new(Arc::new(BrokenStore));
        let result = api
            .update(Network::Mainnet, CustomEndpointConfig::default())
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_concurrent_updates_on_different_networks_both_survive() {
        // Arrange
        let store = Arc::new(SlowStore {
            inner: MemoryStore::new(),
        });
        let api = CustomEndpointApi::new(store);
        let a = CustomEndpointConfig::enabled("a", "https://a.example");
        let b = CustomEndpointConfig::enabled("b", "https://b.example");

        // Act
        let (ra, rb) = tokio::join!(
            api.update(Network::Mainnet, a.clone()),
            api.update(Network::Preview, b.clone())
        );

        // Assert
        ra.unwrap();
        rb.unwrap();
        assert_eq!(api.get_for_network(Network::Mainnet).await, a);
        assert_eq!(api.get_for_network(Network::Preview).await, b);
    }

    // ── modify ────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_modify_returns_previous_entry() {
        // Arrange
        let (api, _) = make_api();
        let before = CustomEndpointConfig::enabled("abc", "https://a.example");
        api.update(Network::Preprod, before.clone()).await.unwrap();

        // Act
        let previous = api
            .modify(Network::Preprod, |cfg| CustomEndpointConfig {
                status: false,
                ..cfg
            })
            .await
            .unwrap();

        // Assert
        assert_eq!(previous, before);
        let after = api.get_for_network(Network::Preprod).await;
        assert!(!after.status);
        assert_eq!(after.project_id, "abc");
    }

    #[tokio::test]
    async fn test_concurrent_modifies_on_same_network_both_apply() {
        // Arrange
        let store = Arc::new(SlowStore {
            inner: MemoryStore::new(),
        });
        let api = CustomEndpointApi::new(store);

        // Act
        let (ra, rb) = tokio::join!(
            api.modify(Network::Mainnet, |cfg| CustomEndpointConfig {
                project_id: "pid".to_string(),
                ..cfg
            }),
            api.modify(Network::Mainnet, |cfg| CustomEndpointConfig {
                base_url: "https://b.example".to_string(),
                ..cfg
            })
        );

        // Assert
        ra.unwrap();
        rb.unwrap();
        let cfg = api.get_for_network(Network::Mainnet).await;
        assert_eq!(cfg.project_id, "pid");
        assert_eq!(cfg.base_url, "https://b.example");
    }
}
