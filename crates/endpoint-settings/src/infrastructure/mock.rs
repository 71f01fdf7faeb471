//! Recording test doubles for the application-layer collaborator traits.
//!
//! Used by unit tests and by the integration tests in `tests/` to observe
//! what the panel did without a real toast area, analytics client or wallet.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use endpoint_core::Network;
use tokio::sync::Notify;

use crate::application::ports::{
    Analytics, AnalyticsEvent, ApplyError, BackgroundSnapshot, BackgroundStorage, Notification,
    Notifier, StorageError, WalletManager,
};

/// One recorded `enable_custom_endpoint` call.
pub type EnableCall = (Network, Option<String>, Option<String>);

/// [`Notifier`] that keeps every notification.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    notifications: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    /// Returns all notifications shown so far, oldest first.
    pub fn notifications(&self) -> Vec<Notification> {
        self.notifications.lock().expect("lock poisoned").clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.notifications
            .lock()
            .expect("lock poisoned")
            .push(notification);
    }
}

/// [`Analytics`] sink that keeps every event.
#[derive(Debug, Default)]
pub struct RecordingAnalytics {
    events: Mutex<Vec<AnalyticsEvent>>,
}

impl RecordingAnalytics {
    pub fn events(&self) -> Vec<AnalyticsEvent> {
        self.events.lock().expect("lock poisoned").clone()
    }
}

#[async_trait]
impl Analytics for RecordingAnalytics {
    async fn send_event(&self, event: AnalyticsEvent) {
        self.events.lock().expect("lock poisoned").push(event);
    }
}

/// [`WalletManager`] that records calls and optionally fails or blocks.
#[derive(Default)]
pub struct RecordingWalletManager {
    calls: Mutex<Vec<EnableCall>>,
    should_fail: bool,
    gate: Option<Arc<Notify>>,
}

impl RecordingWalletManager {
    /// Every call fails with a storage error.
    pub fn failing() -> Self {
        Self {
            should_fail: true,
            ..Self::default()
        }
    }

    /// Every call blocks until [`release`](Self::release) is called.
    pub fn gated() -> Self {
        Self {
            gate: Some(Arc::new(Notify::new())),
            ..Self::default()
        }
    }

    /// Lets one blocked call complete.
    pub fn release(&self) {
        if let Some(gate) = &self.gate {
            gate.notify_one();
        }
    }

    pub fn calls(&self) -> Vec<EnableCall> {
        self.calls.lock().expect("lock poisoned").clone()
    }
}

#[async_trait]
impl WalletManager for RecordingWalletManager {
    async fn enable_custom_endpoint(
        &self,
        network: Network,
        project_id: Option<String>,
        base_url: Option<String>,
    ) -> Result<(), ApplyError> {
        self.calls
            .lock()
            .expect("lock poisoned")
            .push((network, project_id, base_url));
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        if self.should_fail {
            return Err(ApplyError::Storage(StorageError::Backend(
                "injected failure".to_string(),
            )));
        }
        Ok(())
    }
}

/// [`BackgroundStorage`] returning a fixed snapshot, an error, or blocking.
#[derive(Default)]
pub struct StubBackgroundStorage {
    snapshot: Mutex<BackgroundSnapshot>,
    should_fail: bool,
    reject_writes: bool,
    gate: Option<Arc<Notify>>,
}

impl StubBackgroundStorage {
    pub fn with_snapshot(snapshot: BackgroundSnapshot) -> Self {
        Self {
            snapshot: Mutex::new(snapshot),
            ..Self::default()
        }
    }

    /// Every `get` fails.
    pub fn failing() -> Self {
        Self {
            should_fail: true,
            ..Self::default()
        }
    }

    /// Every `set` fails; `get` returns the default snapshot.
    pub fn rejecting_writes() -> Self {
        Self {
            reject_writes: true,
            ..Self::default()
        }
    }

    /// `get` blocks until [`release`](Self::release) is called.
    pub fn gated(snapshot: BackgroundSnapshot) -> Self {
        Self {
            snapshot: Mutex::new(snapshot),
            gate: Some(Arc::new(Notify::new())),
            ..Self::default()
        }
    }

    pub fn release(&self) {
        if let Some(gate) = &self.gate {
            gate.notify_one();
        }
    }
}

#[async_trait]
impl BackgroundStorage for StubBackgroundStorage {
    async fn get(&self) -> Result<BackgroundSnapshot, StorageError> {
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        if self.should_fail {
            return Err(StorageError::Backend("injected failure".to_string()));
        }
        Ok(self.snapshot.lock().expect("lock poisoned").clone())
    }

    async fn set(&self, snapshot: BackgroundSnapshot) -> Result<(), StorageError> {
        if self.reject_writes {
            return Err(StorageError::Backend("injected write failure".to_string()));
        }
        *self.snapshot.lock().expect("lock poisoned") = snapshot;
        Ok(())
    }
}
