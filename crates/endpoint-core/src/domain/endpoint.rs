//! Per-network custom endpoint record.
//!
//! Stored as one entry of a JSON object keyed by network name:
//!
//! ```json
//! {
//!   "Preprod": { "status": true, "projectId": "preprodAbc", "baseUrl": "https://my-node.example" },
//!   "Mainnet": { "status": false, "projectId": "", "baseUrl": "" }
//! }
//! ```
//!
//! Entries written by older builds may lack fields or carry `null`; the read
//! path fills each one from the defaults independently.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Custom endpoint settings for a single network.
///
/// `Default` is the "nothing configured" record: inactive, empty project id,
/// empty base URL.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomEndpointConfig {
    /// Whether the custom endpoint is active for this network.
    pub status: bool,
    /// Opaque credential sent to the endpoint.
    pub project_id: String,
    /// Endpoint root URL.
    pub base_url: String,
}

/// Wire shape of a stored entry with every field optional.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredEntry {
    #[serde(default)]
    status: Option<bool>,
    #[serde(default)]
    project_id: Option<String>,
    #[serde(default)]
    base_url: Option<String>,
}

impl CustomEndpointConfig {
    /// Builds an active record from user-supplied values.
    pub fn enabled(project_id: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            status: true,
            project_id: project_id.into(),
            base_url: base_url.into(),
        }
    }

    /// Decodes a stored entry, filling absent or `null` fields with defaults.
    ///
    /// `None` and `null` both decode to [`CustomEndpointConfig::default`].
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error when the entry is present but has the
    /// wrong shape (e.g. `status` is a string).
    pub fn from_stored(entry: Option<&Value>) -> Result<Self, serde_json::Error> {
        let stored = match entry {
            None | Some(Value::Null) => StoredEntry::default(),
            Some(value) => StoredEntry::deserialize(value)?,
        };
        Ok(Self {
            status: stored.status.unwrap_or(false),
            project_id: stored.project_id.unwrap_or_default(),
            base_url: stored.base_url.unwrap_or_default(),
        })
    }

    /// Encodes this record as a stored entry.
    pub fn to_stored(&self) -> Value {
        serde_json::json!({
            "status": self.status,
            "projectId": self.project_id,
            "baseUrl": self.base_url,
        })
    }
}
