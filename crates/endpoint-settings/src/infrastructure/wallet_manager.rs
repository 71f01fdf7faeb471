//! Local wallet manager: switches the active endpoint by persisting it.
//!
//! Enabling writes an active entry through the [`CustomEndpointApi`] and
//! publishes the endpoint to the background snapshot, which is what the
//! wallet's data provider reads on start-up.  Disabling marks the entry
//! inactive but keeps its stored URL and project id, then clears the snapshot
//! so the network falls back to its default endpoint.
//!
//! The entry is written first.  If the snapshot write then fails, the previous
//! entry is written back so a failed switch leaves the stored state as it was.

use std::sync::Arc;

use async_trait::async_trait;
use endpoint_core::{CustomEndpointConfig, Network};
use tracing::{error, info};

use crate::application::custom_endpoint_api::CustomEndpointApi;
use crate::application::ports::{ApplyError, BackgroundSnapshot, BackgroundStorage, WalletManager};

/// [`WalletManager`] backed by local storage.
pub struct LocalWalletManager {
    api: Arc<CustomEndpointApi>,
    background: Arc<dyn BackgroundStorage>,
}

impl LocalWalletManager {
    pub fn new(api: Arc<CustomEndpointApi>, background: Arc<dyn BackgroundStorage>) -> Self {
        Self { api, background }
    }

    /// Publishes `snapshot`; if that fails, puts `previous` back for `network`
    /// so the stored entry matches what the background process still uses.
    async fn publish_or_restore(
        &self,
        network: Network,
        snapshot: BackgroundSnapshot,
        previous: CustomEndpointConfig,
    ) -> Result<(), ApplyError> {
        let Err(e) = self.background.set(snapshot).await else {
            return Ok(());
        };
        error!(%network, error = %e, "background snapshot write failed; restoring previous entry");
        if let Err(restore) = self.api.update(network, previous).await {
            error!(%network, error = %restore, "could not restore previous custom endpoint entry");
        }
        Err(e.into())
    }
}

#[async_trait]
impl WalletManager for LocalWalletManager {
    async fn enable_custom_endpoint(
        &self,
        network: Network,
        project_id: Option<String>,
        base_url: Option<String>,
    ) -> Result<(), ApplyError> {
        match (project_id, base_url) {
            (Some(project_id), Some(base_url)) => {
                let entry = CustomEndpointConfig::enabled(project_id.clone(), base_url.clone());
                let previous = self.api.modify(network, move |_| entry).await?;
                let snapshot = BackgroundSnapshot {
                    custom_blockfrost_base_url: Some(base_url),
                    custom_blockfrost_project_id: Some(project_id),
                };
                self.publish_or_restore(network, snapshot, previous).await?;
                info!(%network, "custom endpoint enabled");
            }
            (None, None) => {
                let previous = self
                    .api
                    .modify(network, |cfg| CustomEndpointConfig {
                        status: false,
                        ..cfg
                    })
                    .await?;
                self.publish_or_restore(network, BackgroundSnapshot::default(), previous)
                    .await?;
                info!(%network, "custom endpoint disabled; using default endpoint");
            }
            _ => {
                return Err(ApplyError::Rejected(
                    "project id and base URL must be given together".to_string(),
                ))
            }
        }
        Ok(())
    }
}
