//! Collaborator traits for the application layer.
//!
//! Each trait stands for something the settings feature uses but does not
//! own: the key-value persistence engine, the background-process storage
//! snapshot, the wallet manager that actually switches endpoints, and the
//! presentation sinks (notifications, analytics, translated strings).
//!
//! Infrastructure implementations live in `crate::infrastructure`; tests use
//! the recording doubles in `crate::infrastructure::mock`.

use std::path::PathBuf;

use async_trait::async_trait;
use endpoint_core::Network;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

// ── Errors ────────────────────────────────────────────────────────────────────

/// Error type for key-value storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// A file system I/O error occurred.
    #[error("I/O error accessing storage at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The stored document is not valid JSON or has an unexpected shape.
    #[error("malformed stored JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Any other backend failure.
    #[error("storage backend failure: {0}")]
    Backend(String),
}

/// Error returned by [`WalletManager::enable_custom_endpoint`].
#[derive(Debug, Error)]
pub enum ApplyError {
    /// Persisting the new endpoint selection failed.
    #[error("failed to persist endpoint selection: {0}")]
    Storage(#[from] StorageError),

    /// The wallet refused to switch endpoints.
    #[error("wallet rejected endpoint switch: {0}")]
    Rejected(String),
}

// ── Storage ───────────────────────────────────────────────────────────────────

/// Durable key-value storage holding JSON documents.
///
/// Implementations must treat a missing key as `Ok(None)`, never as an error.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Returns the value stored under `key`, if any.
    async fn read(&self, key: &str) -> Result<Option<Value>, StorageError>;

    /// Stores `value` under `key`, replacing any previous value.
    async fn write(&self, key: &str, value: Value) -> Result<(), StorageError>;
}

/// Snapshot of the endpoint values the background process is currently using.
///
/// Both fields are absent while the default endpoint is in use.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackgroundSnapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_blockfrost_base_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_blockfrost_project_id: Option<String>,
}

/// Storage shared with the wallet's background process.
#[async_trait]
pub trait BackgroundStorage: Send + Sync {
    /// Reads the current snapshot.  A never-written snapshot is the default.
    async fn get(&self) -> Result<BackgroundSnapshot, StorageError>;

    /// Replaces the snapshot.
    async fn set(&self, snapshot: BackgroundSnapshot) -> Result<(), StorageError>;
}

// ── Wallet manager ────────────────────────────────────────────────────────────

/// The capability that switches which endpoint the wallet uses at runtime.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WalletManager: Send + Sync {
    /// Activates the custom endpoint for `network` when both values are
    /// `Some`, or returns the network to its default endpoint when both are
    /// `None`.
    async fn enable_custom_endpoint(
        &self,
        network: Network,
        project_id: Option<String>,
        base_url: Option<String>,
    ) -> Result<(), ApplyError>;
}

// ── Presentation sinks ────────────────────────────────────────────────────────

/// Icon shown next to a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationIcon {
    Switch,
    Error,
}

/// A transient user-facing notification ("toast").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub text: String,
    pub icon: NotificationIcon,
    pub with_progress_bar: bool,
}

/// Shows notifications to the user.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Product analytics events emitted by the settings feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalyticsEvent {
    /// The user successfully enabled a custom endpoint.
    SettingsCustomEndpointEnableClick,
}

impl AnalyticsEvent {
    /// Event name as sent to the analytics back end.
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalyticsEvent::SettingsCustomEndpointEnableClick => {
                "settings | custom blockfrost | enable | click"
            }
        }
    }
}

/// Receives analytics events.  Delivery failures are the sink's concern.
#[async_trait]
pub trait Analytics: Send + Sync {
    async fn send_event(&self, event: AnalyticsEvent);
}

/// Looks up translated strings by key.
pub trait Translator: Send + Sync {
    fn t(&self, key: &str) -> String;
}
